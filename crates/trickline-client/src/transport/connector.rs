//! Seam between the reconnect driver and a concrete socket.

use async_trait::async_trait;
use tokio::sync::mpsc;

use trickline_core::protocol::Frame;
use trickline_core::Result;

/// Opens one connection per call.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn open(&self, endpoint: &str) -> Result<Connection>;
}

/// Client side of an open connection.
///
/// Dropping `outbound` asks the socket to close; `inbound` yielding `None`
/// means the socket is gone.
#[derive(Debug)]
pub struct Connection {
    pub outbound: mpsc::UnboundedSender<Frame>,
    pub inbound: mpsc::UnboundedReceiver<Frame>,
}

/// The other end of a [`Connection`], held by a socket pump or a test.
#[derive(Debug)]
pub struct Peer {
    pub from_client: mpsc::UnboundedReceiver<Frame>,
    pub to_client: mpsc::UnboundedSender<Frame>,
}

impl Connection {
    pub fn pair() -> (Connection, Peer) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        (
            Connection {
                outbound: out_tx,
                inbound: in_rx,
            },
            Peer {
                from_client: out_rx,
                to_client: in_tx,
            },
        )
    }
}
