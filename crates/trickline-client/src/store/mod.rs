//! Reconciliation store: the single owner of session state.
//!
//! - `store`: snapshots, trick history, join/error state
//! - `scores`: cumulative cross-round scores and their persistence slots
//! - `event_log`: bounded diagnostic trail

pub mod event_log;
pub mod scores;
#[allow(clippy::module_inception)]
pub mod store;

pub use event_log::{EventLog, EventLogEntry, EVENT_LOG_CAPACITY};
pub use scores::{CumulativeScores, FileSlot, MemorySlot, ScoreSlot, ScoreTable};
pub use store::{JoinInfo, ReconciliationStore, TrickUpsert};
