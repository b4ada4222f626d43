//! Top-level facade crate for trickline.
//!
//! Re-exports the core protocol/rules types and the client session library so
//! users can depend on a single crate.

pub mod core {
    pub use trickline_core::*;
}

pub mod client {
    pub use trickline_client::*;
}
