//! Per-client session state: snapshots, trick history, round outcome and scores.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use trickline_core::model::{PlayerId, RoundOutcome, Snapshot, TrickRecord};
use trickline_core::protocol::JoinedPayload;

use crate::store::event_log::{EventLog, EventLogEntry};
use crate::store::scores::{CumulativeScores, ScoreSlot, ScoreTable};

/// Join confirmation from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinInfo {
    pub table_id: String,
    pub viewer: PlayerId,
    pub connected: Vec<PlayerId>,
}

impl From<JoinedPayload> for JoinInfo {
    fn from(p: JoinedPayload) -> Self {
        Self {
            table_id: p.game_id,
            viewer: p.player_id,
            connected: p.connected_players,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickUpsert {
    Inserted,
    /// A record for this index already existed and was overwritten.
    Replaced,
}

impl TrickUpsert {
    pub fn is_fresh(self) -> bool {
        self == TrickUpsert::Inserted
    }
}

/// Session state. Not synchronized; the session wraps it in a mutex.
#[derive(Debug)]
pub struct ReconciliationStore {
    joined: Option<JoinInfo>,
    error: Option<String>,
    snapshots: HashMap<(String, PlayerId), Snapshot>,
    latest: Option<(String, PlayerId)>,
    tricks: BTreeMap<u32, TrickRecord>,
    /// Set by `round_complete`; the next new trick opens a fresh history.
    round_closed: bool,
    last_round: Option<RoundOutcome>,
    scores: CumulativeScores,
    events: EventLog,
}

impl ReconciliationStore {
    pub fn new(slot: Box<dyn ScoreSlot>) -> Self {
        Self {
            joined: None,
            error: None,
            snapshots: HashMap::new(),
            latest: None,
            tricks: BTreeMap::new(),
            round_closed: false,
            last_round: None,
            scores: CumulativeScores::load(slot),
            events: EventLog::default(),
        }
    }

    // --------------------
    // Mutations
    // --------------------

    pub fn record_join(&mut self, info: JoinInfo) {
        let connected = info
            .connected
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.events
            .push(format!("Joined {}. Connected: {connected}", info.table_id));
        self.error = None;
        self.joined = Some(info);
    }

    /// Replace the snapshot for its (table, viewer) wholesale and clear the error.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let key = snapshot.key();
        self.snapshots.insert(key.clone(), snapshot);
        self.latest = Some(key);
        self.error = None;
    }

    /// Upsert by trick index. History stays sorted by index.
    ///
    /// After a round completes, a replay of a trick already held is still a
    /// replacement; any other trick starts the next round's history.
    pub fn record_trick(&mut self, record: TrickRecord) -> TrickUpsert {
        self.events.push(record.summary());
        if self.round_closed && self.tricks.get(&record.trick_index) != Some(&record) {
            debug!(tricks = self.tricks.len(), "new round, trick history cleared");
            self.tricks.clear();
            self.round_closed = false;
        }
        match self.tricks.insert(record.trick_index, record) {
            None => TrickUpsert::Inserted,
            Some(prev) => {
                debug!(trick = prev.trick_index, "trick record replaced");
                TrickUpsert::Replaced
            }
        }
    }

    /// Returns the player's new cumulative total.
    pub fn accumulate_score(&mut self, winner: PlayerId, points: i64) -> i64 {
        self.scores.add(winner, points)
    }

    pub fn record_round(&mut self, outcome: RoundOutcome) {
        self.events
            .push(format!("Round complete. Winner: P{}", outcome.winner));
        self.last_round = Some(outcome);
        self.round_closed = true;
    }

    /// Server-reported error: stored and logged.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.events.push(format!("Error: {message}"));
        self.error = Some(message);
    }

    /// Local error (e.g. a rejected send): stored only.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn log(&mut self, text: impl Into<String>) -> u64 {
        self.events.push(text)
    }

    /// New round: drop trick history and the last outcome. Scores survive.
    pub fn reset_round(&mut self) {
        self.tricks.clear();
        self.round_closed = false;
        self.last_round = None;
    }

    /// Leave the table. Cumulative scores survive; the connection is not touched.
    pub fn reset_session(&mut self) {
        self.joined = None;
        self.error = None;
        self.events.clear();
        self.snapshots.clear();
        self.latest = None;
        self.reset_round();
    }

    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    // --------------------
    // Queries
    // --------------------

    pub fn joined(&self) -> Option<&JoinInfo> {
        self.joined.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self, table_id: &str, viewer: PlayerId) -> Option<&Snapshot> {
        self.snapshots.get(&(table_id.to_owned(), viewer))
    }

    /// Snapshot for the joined seat, else the most recently applied one.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        if let Some(j) = &self.joined {
            if let Some(s) = self.snapshot(&j.table_id, j.viewer) {
                return Some(s);
            }
        }
        self.latest.as_ref().and_then(|k| self.snapshots.get(k))
    }

    /// Ascending by trick index.
    pub fn completed_tricks(&self) -> Vec<TrickRecord> {
        self.tricks.values().cloned().collect()
    }

    pub fn trick(&self, index: u32) -> Option<&TrickRecord> {
        self.tricks.get(&index)
    }

    pub fn last_round(&self) -> Option<&RoundOutcome> {
        self.last_round.as_ref()
    }

    pub fn round_winner(&self) -> Option<PlayerId> {
        self.last_round.as_ref().map(|r| r.winner)
    }

    pub fn scores(&self) -> &ScoreTable {
        self.scores.totals()
    }

    pub fn score(&self, player: PlayerId) -> i64 {
        self.scores.get(player)
    }

    pub fn events(&self) -> Vec<EventLogEntry> {
        self.events.entries()
    }

    /// Seats for deck prediction; the join confirmation's connected list.
    pub fn connected_players(&self) -> usize {
        self.joined.as_ref().map(|j| j.connected.len()).unwrap_or(0)
    }
}
