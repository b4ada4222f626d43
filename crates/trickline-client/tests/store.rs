#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use trickline_client::store::{
    CumulativeScores, EventLog, FileSlot, JoinInfo, MemorySlot, ReconciliationStore, ScoreSlot,
    ScoreTable, TrickUpsert, EVENT_LOG_CAPACITY,
};
use trickline_core::model::{PlayedCard, RoundOutcome, Snapshot, TrickRecord};

fn trick(index: u32, winner: u32, points: i64) -> TrickRecord {
    TrickRecord {
        trick_index: index,
        lead_suit: None,
        plays: vec![PlayedCard::new(2, "7H"), PlayedCard::new(winner, "AH")],
        winner,
        winning_card: "AH".into(),
        points,
        winner_round_total: points,
    }
}

fn snapshot(table: &str, viewer: u32, trick_index: u32) -> Snapshot {
    Snapshot {
        table_id: table.into(),
        viewer,
        leader: 1,
        to_act: viewer,
        trick_index,
        lead_suit: None,
        current_trick: vec![],
        hand: vec!["AH".into()],
        seats: vec![],
    }
}

fn store_with(slot: &MemorySlot) -> ReconciliationStore {
    ReconciliationStore::new(Box::new(slot.clone()))
}

#[test]
fn event_log_keeps_most_recent_twenty() {
    let mut log = EventLog::default();
    for i in 0..25 {
        log.push(format!("e{i}"));
    }
    let entries = log.entries();
    assert_eq!(entries.len(), EVENT_LOG_CAPACITY);
    assert_eq!(entries[0].text, "e5");
    assert_eq!(entries[0].sequence, 6);
    assert_eq!(entries.last().unwrap().sequence, 25);

    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.push("after"), 26);
}

#[test]
fn record_trick_upserts_by_index() {
    let slot = MemorySlot::new();
    let mut store = store_with(&slot);
    assert_eq!(store.record_trick(trick(1, 1, 2)), TrickUpsert::Inserted);
    assert_eq!(store.record_trick(trick(0, 2, 1)), TrickUpsert::Inserted);
    assert_eq!(store.record_trick(trick(1, 2, 5)), TrickUpsert::Replaced);

    let tricks = store.completed_tricks();
    assert_eq!(tricks.len(), 2);
    assert_eq!(tricks[0].trick_index, 0);
    assert_eq!(tricks[1].winner, 2);
    assert_eq!(store.trick(1).unwrap().points, 5);
}

#[test]
fn snapshots_keyed_by_table_and_viewer() {
    let mut store = store_with(&MemorySlot::new());
    store.apply_snapshot(snapshot("g1", 1, 0));
    store.apply_snapshot(snapshot("g1", 2, 0));
    store.apply_snapshot(snapshot("g1", 1, 3));

    assert_eq!(store.snapshot("g1", 1).unwrap().trick_index, 3);
    assert_eq!(store.snapshot("g1", 2).unwrap().trick_index, 0);
    assert!(store.snapshot("g2", 1).is_none());
}

#[test]
fn current_snapshot_prefers_joined_seat() {
    let mut store = store_with(&MemorySlot::new());
    store.record_join(JoinInfo {
        table_id: "g1".into(),
        viewer: 1,
        connected: vec![1, 2],
    });
    store.apply_snapshot(snapshot("g1", 1, 4));
    store.apply_snapshot(snapshot("g1", 2, 9));
    assert_eq!(store.current_snapshot().unwrap().viewer, 1);
    assert_eq!(store.connected_players(), 2);
}

#[test]
fn reset_round_keeps_scores() {
    let slot = MemorySlot::new();
    let mut store = store_with(&slot);
    store.record_trick(trick(0, 1, 2));
    store.accumulate_score(1, 2);
    store.record_round(RoundOutcome {
        table_id: "g1".into(),
        winner: 1,
        final_scores: BTreeMap::new(),
        winner_total_points: 2,
    });

    store.reset_round();
    assert!(store.completed_tricks().is_empty());
    assert_eq!(store.round_winner(), None);
    assert_eq!(store.score(1), 2);
}

#[test]
fn reset_session_clears_session_state_but_not_scores() {
    let slot = MemorySlot::new();
    let mut store = store_with(&slot);
    store.record_join(JoinInfo {
        table_id: "g1".into(),
        viewer: 1,
        connected: vec![1],
    });
    store.apply_snapshot(snapshot("g1", 1, 0));
    store.record_error("boom");
    store.record_trick(trick(0, 1, 2));
    store.accumulate_score(1, 2);

    store.reset_session();
    assert!(store.joined().is_none());
    assert!(store.error().is_none());
    assert!(store.events().is_empty());
    assert!(store.current_snapshot().is_none());
    assert!(store.completed_tricks().is_empty());
    assert_eq!(store.score(1), 2);
    assert_eq!(slot.stored().get(&1), Some(&2));
}

#[test]
fn reset_scores_persists_empty_table() {
    let slot = MemorySlot::with_table(ScoreTable::from([(1, 10), (2, 3)]));
    let mut store = store_with(&slot);
    assert_eq!(store.score(1), 10);

    store.reset_scores();
    assert!(store.scores().is_empty());
    assert!(slot.stored().is_empty());
}

#[test]
fn scores_accumulate_across_rounds() {
    let slot = MemorySlot::new();
    let mut scores = CumulativeScores::load(Box::new(slot.clone()));
    assert_eq!(scores.add(1, 2), 2);
    assert_eq!(scores.add(2, 1), 1);
    assert_eq!(scores.add(1, 3), 5);
    assert_eq!(scores.get(3), 0);
    assert_eq!(slot.stored(), ScoreTable::from([(1, 5), (2, 1)]));
}

#[test]
fn score_total_saturates() {
    let slot = MemorySlot::with_table(ScoreTable::from([(1, i64::MAX - 1)]));
    let mut scores = CumulativeScores::load(Box::new(slot.clone()));
    assert_eq!(scores.add(1, 10), i64::MAX);
    assert_eq!(slot.stored().get(&1), Some(&i64::MAX));
}

#[test]
fn round_complete_starts_fresh_history_on_next_trick() {
    let slot = MemorySlot::new();
    let mut store = store_with(&slot);
    store.record_trick(trick(0, 1, 2));
    store.record_trick(trick(1, 2, 1));
    store.record_round(RoundOutcome {
        table_id: "g1".into(),
        winner: 1,
        final_scores: BTreeMap::new(),
        winner_total_points: 2,
    });
    assert_eq!(store.completed_tricks().len(), 2);

    assert_eq!(store.record_trick(trick(0, 2, 4)), TrickUpsert::Inserted);
    assert_eq!(store.completed_tricks().len(), 1);
    assert!(store.last_round().is_some());
}

#[test]
fn file_slot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let slot = FileSlot::new(&path);
    assert!(slot.load().unwrap().is_empty());

    let mut scores = CumulativeScores::load(Box::new(slot));
    scores.add(1, 4);
    scores.add(7, -1);

    let reloaded = CumulativeScores::load(Box::new(FileSlot::new(&path)));
    assert_eq!(reloaded.get(1), 4);
    assert_eq!(reloaded.get(7), -1);
}

#[test]
fn corrupt_file_slot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "{not json").unwrap();

    let slot = FileSlot::new(&path);
    assert_eq!(slot.load().unwrap_err().code().as_str(), "DECODE_FAILED");

    let scores = CumulativeScores::load(Box::new(slot));
    assert!(scores.totals().is_empty());
}
