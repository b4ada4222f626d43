#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use trickline_client::config;

const MINIMAL: &str = r#"
version: 1
server:
  endpoint: "ws://localhost:8080/ws"
table:
  game_id: "table-1"
  player_id: 1
"#;

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str(MINIMAL).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.reconnect_delay(), Duration::from_millis(1500));
    assert_eq!(cfg.table.game_id, "table-1");
    assert_eq!(cfg.round.seed, None);
    assert!(cfg.round.exclusions().is_empty());
    assert!(cfg.scores.path.is_none());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  endpoint: "wss://cards.example/ws"
  reconnect_delay_ms: 250
table:
  game_id: "g7"
  player_id: 3
round:
  seed: 42
  excluded_ranks: "2, 3"
  excluded_cards: "as,KH"
scores:
  path: "scores.json"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.reconnect_delay(), Duration::from_millis(250));
    assert_eq!(cfg.round.seed, Some(42));
    let rule = cfg.round.exclusions();
    assert_eq!(rule.ranks, vec!["2", "3"]);
    assert_eq!(rule.cards, vec!["AS", "KH"]);
    assert_eq!(cfg.scores.path.as_deref(), Some("scores.json"));
}

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  endpoint: "ws://localhost:8080/ws"
  reconect_delay_ms: 100 # typo should fail
table:
  game_id: "table-1"
  player_id: 1
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn unsupported_version() {
    let bad = MINIMAL.replace("version: 1", "version: 2");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn endpoint_must_be_websocket() {
    let bad = MINIMAL.replace("ws://localhost", "http://localhost");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert!(err.to_string().contains("server.endpoint"));
}

#[test]
fn reconnect_delay_range() {
    for delay in ["50", "60001"] {
        let bad = MINIMAL.replace(
            "endpoint: \"ws://localhost:8080/ws\"",
            &format!("endpoint: \"ws://localhost:8080/ws\"\n  reconnect_delay_ms: {delay}"),
        );
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert!(err.to_string().contains("reconnect_delay_ms"), "{err}");
    }
}

#[test]
fn player_id_zero_rejected() {
    let bad = MINIMAL.replace("player_id: 1", "player_id: 0");
    let err = config::load_from_str(&bad).expect_err("must fail");
    assert!(err.to_string().contains("player_id"));
}

#[test]
fn invalid_exclusions_rejected() {
    let bad = format!("{MINIMAL}round:\n  excluded_ranks: \"1, B\"\n");
    let err = config::load_from_str(&bad).expect_err("must fail");
    let msg = err.to_string();
    assert!(msg.contains("Invalid excluded rank: 1"), "{msg}");
    assert!(msg.contains("Invalid excluded rank: B"), "{msg}");
}
