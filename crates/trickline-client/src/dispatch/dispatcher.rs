//! Routes decoded inbound events into the store.
//!
//! Each event produces exactly one store mutation, performed under the
//! session's store lock so events apply in arrival order. Observers are
//! notified after the lock is released.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use trickline_core::model::{PlayerId, RoundOutcome, Snapshot, TrickRecord};
use trickline_core::protocol::Inbound;

use crate::listeners::{Listeners, Subscription};
use crate::store::{JoinInfo, ReconciliationStore};

/// Trick observer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickCompleted {
    pub record: TrickRecord,
    /// False when this trick index had already been recorded.
    pub fresh: bool,
    /// Winner's cumulative score after this trick.
    pub cumulative_total: i64,
}

/// What a dispatch did, for callers and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Joined,
    SnapshotReplaced,
    TrickRecorded { trick_index: u32, fresh: bool },
    RoundCompleted { winner: PlayerId },
    ErrorRecorded,
    Ignored,
}

pub struct Dispatcher {
    store: Arc<Mutex<ReconciliationStore>>,
    tricks: Listeners<TrickCompleted>,
    rounds: Listeners<RoundOutcome>,
    errors: Listeners<String>,
}

impl Dispatcher {
    pub fn new(store: Arc<Mutex<ReconciliationStore>>) -> Self {
        Self {
            store,
            tricks: Listeners::new(),
            rounds: Listeners::new(),
            errors: Listeners::new(),
        }
    }

    pub fn store(&self) -> &Arc<Mutex<ReconciliationStore>> {
        &self.store
    }

    pub fn dispatch(&self, inbound: &Inbound) -> Dispatched {
        match inbound {
            Inbound::Joined(p) => {
                info!(game = %p.game_id, player = p.player_id, "joined");
                self.store.lock().record_join(JoinInfo::from(p.clone()));
                Dispatched::Joined
            }
            Inbound::StateUpdate(p) => {
                self.store.lock().apply_snapshot(Snapshot::from(p.clone()));
                Dispatched::SnapshotReplaced
            }
            Inbound::TrickComplete(p) => {
                let record = TrickRecord::from(p.clone());
                let trick_index = record.trick_index;
                let event = {
                    let mut store = self.store.lock();
                    let fresh = store.record_trick(record.clone()).is_fresh();
                    // scores count each trick index once
                    let cumulative_total = if fresh {
                        store.accumulate_score(record.winner, record.points)
                    } else {
                        store.score(record.winner)
                    };
                    TrickCompleted {
                        record,
                        fresh,
                        cumulative_total,
                    }
                };
                let fresh = event.fresh;
                self.tricks.emit(&event);
                Dispatched::TrickRecorded { trick_index, fresh }
            }
            Inbound::RoundComplete(p) => {
                let outcome = RoundOutcome::from(p.clone());
                let winner = outcome.winner;
                info!(game = %outcome.table_id, winner, "round complete");
                self.store.lock().record_round(outcome.clone());
                self.rounds.emit(&outcome);
                Dispatched::RoundCompleted { winner }
            }
            Inbound::Error(p) => {
                self.store.lock().record_error(p.message.clone());
                self.errors.emit(&p.message);
                Dispatched::ErrorRecorded
            }
            Inbound::Unknown { kind } => {
                debug!(kind = %kind, "unknown inbound kind ignored");
                Dispatched::Ignored
            }
        }
    }

    pub fn on_trick_complete(
        &self,
        f: impl Fn(&TrickCompleted) + Send + Sync + 'static,
    ) -> Subscription {
        self.tricks.subscribe(f)
    }

    pub fn on_round_complete(
        &self,
        f: impl Fn(&RoundOutcome) + Send + Sync + 'static,
    ) -> Subscription {
        self.rounds.subscribe(f)
    }

    pub fn on_error(&self, f: impl Fn(&String) + Send + Sync + 'static) -> Subscription {
        self.errors.subscribe(f)
    }
}
