//! trickline client library entry.
//!
//! This crate wires the reconnecting transport, the dispatcher, and the
//! reconciliation store into a [`Session`]. It is consumed by the binary
//! (`main.rs`), by UIs, and by integration tests.

pub mod config;
pub mod dispatch;
pub mod listeners;
pub mod obs;
pub mod session;
pub mod store;
pub mod transport;

pub use listeners::{Listeners, Subscription};
pub use session::Session;
