//! Transport layer.
//!
//! - `machine`: the sans-IO connection state machine
//! - `connector`: the seam a socket implementation plugs into
//! - `ws`: the tokio-tungstenite connector
//! - `reconnecting`: the driver that runs the machine on tokio

pub mod codec;
pub mod connector;
pub mod machine;
pub mod reconnecting;
pub mod ws;

pub use connector::{Connection, Connector, Peer};
pub use machine::{ConnectionState, LinkAction, LinkEvent, LinkMachine, Phase, DEFAULT_RECONNECT_DELAY};
pub use reconnecting::Transport;
pub use ws::WsConnector;
