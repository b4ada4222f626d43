//! Bounded, append-only event trail.

use std::collections::VecDeque;

/// Only the most recent entries are kept.
pub const EVENT_LOG_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogEntry {
    pub sequence: u64,
    pub text: String,
}

#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    next_sequence: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            next_sequence: 1,
        }
    }
}

impl EventLog {
    /// Append and return the entry's sequence number; evicts the oldest when full.
    pub fn push(&mut self, text: impl Into<String>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(EventLogEntry {
            sequence,
            text: text.into(),
        });
        sequence
    }

    /// Oldest first.
    pub fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence numbers keep counting after a clear.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
