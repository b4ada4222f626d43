//! trickline core: transport-agnostic protocol, card model, and rule engine.
//!
//! This crate defines the wire-level contracts, the card/snapshot model, and
//! the pure rule engine shared by the client session layer and any UI built on
//! top of it. It carries no transport or runtime dependencies so the rules can
//! be queried from any context.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `TricklineError`/`Result` or as structured
//! validation results, so malformed server traffic or user input never
//! crashes a session.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cards;
pub mod error;
pub mod model;
pub mod protocol;
pub mod rules;

/// Shared result type.
pub use error::{ErrorCode, Result, TricklineError};
