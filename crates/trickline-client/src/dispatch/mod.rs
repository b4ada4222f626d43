//! Inbound event dispatch.

pub mod dispatcher;

pub use dispatcher::{Dispatched, Dispatcher, TrickCompleted};
