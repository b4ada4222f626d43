//! Session commands against an in-memory connection.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use std::time::Duration;

use trickline_client::config::{self, ClientConfig};
use trickline_client::session::NOT_SENT_MESSAGE;
use trickline_client::store::MemorySlot;
use trickline_client::transport::{ConnectionState, Peer};
use trickline_client::Session;
use trickline_core::rules::{ExclusionRule, IllegalReason};
use trickline_core::{ErrorCode, TricklineError};

use scripted::{next_sent, push, settle, ScriptedConnector};

const JOINED: &str =
    r#"{"type":"joined","payload":{"gameId":"g1","playerId":1,"connectedPlayers":[1,2]}}"#;

fn cfg(extra: &str) -> ClientConfig {
    config::load_from_str(&format!(
        r#"
version: 1
server:
  endpoint: "ws://test/ws"
table:
  game_id: "g1"
  player_id: 1
{extra}"#
    ))
    .unwrap()
}

async fn connected(extra: &str) -> (Session, Peer, MemorySlot) {
    let (connector, mut peers) = ScriptedConnector::new();
    let slot = MemorySlot::new();
    let session = Session::with_parts(cfg(extra), connector, Box::new(slot.clone())).unwrap();
    session.connect();
    let peer = peers.recv().await.unwrap();
    settle().await;
    assert!(session.is_connected());
    (session, peer, slot)
}

#[tokio::test(start_paused = true)]
async fn send_without_connection_records_error() {
    let (connector, _peers) = ScriptedConnector::new();
    let session = Session::with_parts(cfg(""), connector, Box::new(MemorySlot::new())).unwrap();

    let err = session.join().unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotConnected);
    assert_eq!(session.error().as_deref(), Some(NOT_SENT_MESSAGE));

    session.clear_error();
    assert_eq!(session.error(), None);
}

#[tokio::test(start_paused = true)]
async fn join_sends_configured_identity() {
    let (session, mut peer, _) = connected("").await;
    session.join().unwrap();
    let sent = next_sent(&mut peer).await;
    assert_eq!(sent["type"], "join_game");
    assert_eq!(sent["payload"]["gameId"], "g1");
    assert_eq!(sent["payload"]["playerId"], 1);

    push(&peer, JOINED);
    settle().await;
    assert_eq!(session.joined().unwrap().connected, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn start_round_requires_join() {
    let (session, _peer, _) = connected("").await;
    let err = session.start_round().unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
}

#[tokio::test(start_paused = true)]
async fn start_round_without_exclusions_omits_rules() {
    let (session, mut peer, _) = connected("round:\n  seed: 9\n").await;
    push(&peer, JOINED);
    settle().await;

    session.start_round().unwrap();
    let sent = next_sent(&mut peer).await;
    assert_eq!(sent["type"], "start_round");
    assert_eq!(sent["payload"], serde_json::json!({ "seed": 9 }));
}

#[tokio::test(start_paused = true)]
async fn start_round_with_exclusions_sends_rules() {
    let (session, mut peer, _) = connected("").await;
    push(&peer, JOINED);
    settle().await;

    let rule = ExclusionRule::from_csv("2,3,a", "as, kh");
    session.start_round_with(&rule, None).unwrap();
    let sent = next_sent(&mut peer).await;
    assert_eq!(
        sent["payload"],
        serde_json::json!({
            "rules": { "excludedRanks": ["2", "3", "A"], "excludedCards": ["AS", "KH"] }
        })
    );
}

#[tokio::test(start_paused = true)]
async fn start_round_refused_when_deck_too_small() {
    let (session, mut peer, _) = connected("").await;
    push(&peer, JOINED);
    settle().await;

    let rule = ExclusionRule::from_csv("2,3,4,5,6,7,8,9,10,J,Q", "");
    let plan = session.round_plan(&rule);
    assert_eq!(plan.deck.size, 8);
    assert_eq!(plan.deck.minimum_required, 10);
    assert!(!plan.ready());

    match session.start_round_with(&rule, None) {
        Err(TricklineError::Validation(errors)) => {
            assert_eq!(errors, vec!["Deck too small: 8 cards, 10 required"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let bad = ExclusionRule::from_csv("1", "ZZ");
    let err = session.start_round_with(&bad, None).unwrap_err();
    assert!(err.to_string().contains("Invalid excluded rank: 1"));
    assert!(err.to_string().contains("Invalid excluded card: ZZ"));

    session.get_state().unwrap();
    // only the get_state went out
    assert_eq!(next_sent(&mut peer).await["type"], "get_state");
}

#[tokio::test(start_paused = true)]
async fn start_round_clears_round_state() {
    let (session, mut peer, _) = connected("").await;
    push(&peer, JOINED);
    push(
        &peer,
        r#"{"type":"trick_complete","payload":{"gameId":"g1","trickNumber":0,"leadSuit":"H",
            "plays":[],"winnerPlayerId":1,"winnerCard":"AH","trickPoints":2,"winnerScoreTotal":2}}"#,
    );
    push(
        &peer,
        r#"{"type":"round_complete","payload":{"gameId":"g1","winnerPlayerId":1,
            "finalScores":{"1":2},"winnerTotalPoints":2}}"#,
    );
    settle().await;
    assert_eq!(session.completed_tricks().len(), 1);
    assert_eq!(session.round_winner(), Some(1));

    session.start_round().unwrap();
    let _ = next_sent(&mut peer).await;
    assert!(session.completed_tricks().is_empty());
    assert_eq!(session.round_winner(), None);
    assert_eq!(session.scores().get(&1), Some(&2));
}

#[tokio::test(start_paused = true)]
async fn play_card_checks_legality_first() {
    let (session, mut peer, _) = connected("").await;
    assert!(!session.can_play());
    assert_eq!(
        session.play_card("AH").unwrap_err().to_string(),
        "illegal play: not your turn"
    );

    push(
        &peer,
        r#"{"type":"state_update","payload":{"gameId":"g1","you":1,"leaderPlayerId":2,
            "currentTurnPlayerId":1,"trickNumber":0,"leadSuit":"H",
            "currentTrick":[{"playerId":2,"card":"7H"}],"yourHand":["AH","KS"]}}"#,
    );
    settle().await;
    assert!(session.can_play());

    let legality = session.can_play_card("ks");
    assert_eq!(legality.reason, Some(IllegalReason::MustFollowSuit));
    assert_eq!(
        session.play_card("KS").unwrap_err().code(),
        ErrorCode::IllegalPlay
    );

    session.play_card(" ah ").unwrap();
    let sent = next_sent(&mut peer).await;
    assert_eq!(sent["type"], "play_card");
    assert_eq!(sent["payload"]["card"], "AH");
}

#[tokio::test(start_paused = true)]
async fn exit_session_disconnects_and_keeps_scores() {
    let (connector, mut peers) = ScriptedConnector::new();
    let slot = MemorySlot::new();
    let session =
        Session::with_parts(cfg(""), connector.clone(), Box::new(slot.clone())).unwrap();
    session.connect();
    let peer = peers.recv().await.unwrap();
    settle().await;

    push(&peer, JOINED);
    push(
        &peer,
        r#"{"type":"trick_complete","payload":{"gameId":"g1","trickNumber":0,"leadSuit":"H",
            "plays":[],"winnerPlayerId":1,"winnerCard":"AH","trickPoints":2,"winnerScoreTotal":2}}"#,
    );
    settle().await;

    session.exit_session();
    assert!(session.joined().is_none());
    assert!(session.events().is_empty());
    assert_eq!(session.connection_state(), ConnectionState::Disconnected);
    assert_eq!(session.scores().get(&1), Some(&2));

    // no reconnect after a deliberate exit
    tokio::time::sleep(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(connector.opens(), 1);
    assert_eq!(session.connection_state(), ConnectionState::Disconnected);

    session.reset_scores();
    assert!(session.scores().is_empty());
    assert!(slot.stored().is_empty());
}

#[tokio::test(start_paused = true)]
async fn metrics_text_renders_counters() {
    let (session, peer, _) = connected("").await;
    push(&peer, JOINED);
    push(&peer, "garbage");
    settle().await;

    let text = session.metrics_text();
    assert!(text.contains("# TYPE trickline_frames_in_total counter"));
    assert!(text.contains("trickline_frames_in_total{kind=\"joined\"} 1"));
    assert!(text.contains("trickline_frames_in_total{kind=\"malformed\"} 1"));
    assert!(text.contains("trickline_transport_events_total{event=\"opened\"} 1"));
}
