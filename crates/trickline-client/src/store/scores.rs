//! Cumulative per-player scores across rounds.
//!
//! The tally lives in memory and is mirrored to a [`ScoreSlot`] after every
//! change. Slot failures are logged and never interrupt the session.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use trickline_core::model::PlayerId;
use trickline_core::{Result, TricklineError};

pub type ScoreTable = BTreeMap<PlayerId, i64>;

/// External key-value slot holding the persisted tally.
pub trait ScoreSlot: Send + Sync {
    fn load(&self) -> Result<ScoreTable>;
    fn save(&self, table: &ScoreTable) -> Result<()>;
}

/// In-process slot. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    stored: Arc<Mutex<ScoreTable>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: ScoreTable) -> Self {
        Self {
            stored: Arc::new(Mutex::new(table)),
        }
    }

    /// What was last saved.
    pub fn stored(&self) -> ScoreTable {
        self.stored.lock().clone()
    }
}

impl ScoreSlot for MemorySlot {
    fn load(&self) -> Result<ScoreTable> {
        Ok(self.stored.lock().clone())
    }

    fn save(&self, table: &ScoreTable) -> Result<()> {
        *self.stored.lock() = table.clone();
        Ok(())
    }
}

/// JSON file slot. A missing file loads as an empty table.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreSlot for FileSlot {
    fn load(&self) -> Result<ScoreTable> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScoreTable::new()),
            Err(e) => return Err(TricklineError::Internal(format!("read scores failed: {e}"))),
        };
        serde_json::from_str(&s)
            .map_err(|e| TricklineError::Decode(format!("invalid scores json: {e}")))
    }

    fn save(&self, table: &ScoreTable) -> Result<()> {
        let s = serde_json::to_string(table)
            .map_err(|e| TricklineError::Internal(format!("encode scores failed: {e}")))?;
        fs::write(&self.path, s)
            .map_err(|e| TricklineError::Internal(format!("write scores failed: {e}")))
    }
}

pub struct CumulativeScores {
    table: ScoreTable,
    slot: Box<dyn ScoreSlot>,
}

impl CumulativeScores {
    /// Start from whatever the slot holds; an unreadable slot starts empty.
    pub fn load(slot: Box<dyn ScoreSlot>) -> Self {
        let table = slot.load().unwrap_or_else(|e| {
            warn!(error = %e, "score slot load failed; starting empty");
            ScoreTable::new()
        });
        Self { table, slot }
    }

    /// Add `points` to `player` and return the new total.
    pub fn add(&mut self, player: PlayerId, points: i64) -> i64 {
        let total = self.table.entry(player).or_insert(0);
        *total = total.saturating_add(points);
        let total = *total;
        self.persist();
        total
    }

    pub fn reset(&mut self) {
        self.table.clear();
        self.persist();
    }

    pub fn get(&self, player: PlayerId) -> i64 {
        self.table.get(&player).copied().unwrap_or(0)
    }

    pub fn totals(&self) -> &ScoreTable {
        &self.table
    }

    fn persist(&self) {
        if let Err(e) = self.slot.save(&self.table) {
            warn!(error = %e, "score slot save failed");
        }
    }
}

impl std::fmt::Debug for CumulativeScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CumulativeScores")
            .field("table", &self.table)
            .finish()
    }
}
