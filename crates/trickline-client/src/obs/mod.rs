//! Observability primitives.

pub mod metrics;

pub use metrics::{ClientMetrics, CounterVec};
