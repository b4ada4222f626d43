//! trickline interactive client.
//!
//! Reads a YAML config (first argument, default `trickline.yaml`), then takes
//! one command per stdin line. Server events are reported as they arrive.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use trickline_client::{config, Session};

const HELP: &str = "commands: connect | disconnect | reconnect | join | start | state | \
play <card> | hand | tricks | scores | reset-scores | events | metrics | exit | quit";

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "trickline.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            std::process::exit(2);
        }
    };

    let session = match Session::new(cfg) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "session setup failed");
            std::process::exit(2);
        }
    };

    let _status = session.on_status(|up| {
        println!("[{}]", if *up { "connected" } else { "disconnected" });
    });
    let _tricks = session.on_trick_complete(|t| {
        println!("{} (total {})", t.record.summary(), t.cumulative_total);
    });
    let _rounds = session.on_round_complete(|r| {
        println!("Round complete. Winner: P{}", r.winner);
    });
    let _errors = session.on_error(|msg| println!("Error: {msg}"));

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else { continue };

        let outcome = match cmd {
            "connect" => {
                session.connect();
                Ok(())
            }
            "disconnect" => {
                session.disconnect();
                Ok(())
            }
            "reconnect" => {
                session.reconnect_now();
                Ok(())
            }
            "join" => session.join(),
            "start" => session.start_round(),
            "state" => session.get_state(),
            "play" => match words.next() {
                Some(card) => session.play_card(card),
                None => {
                    println!("usage: play <card>");
                    Ok(())
                }
            },
            "hand" => {
                print_hand(&session);
                Ok(())
            }
            "tricks" => {
                for t in session.completed_tricks() {
                    println!("{}", t.summary());
                }
                Ok(())
            }
            "scores" => {
                for (player, total) in session.scores() {
                    println!("P{player}: {total}");
                }
                Ok(())
            }
            "reset-scores" => {
                session.reset_scores();
                Ok(())
            }
            "events" => {
                for e in session.events() {
                    println!("#{} {}", e.sequence, e.text);
                }
                Ok(())
            }
            "metrics" => {
                print!("{}", session.metrics_text());
                Ok(())
            }
            "exit" => {
                session.exit_session();
                Ok(())
            }
            "quit" => break,
            _ => {
                println!("{HELP}");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("! {e}");
        }
    }

    session.disconnect();
}

fn print_hand(session: &Session) {
    let Some(snap) = session.current_snapshot() else {
        println!("no state yet");
        return;
    };
    let lead = snap
        .effective_lead_suit()
        .map(|s| s.name())
        .unwrap_or("none");
    println!(
        "trick {} | to act: P{} | lead suit: {lead}",
        snap.trick_index, snap.to_act
    );
    for card in &snap.hand {
        let legality = session.can_play_card(card);
        match legality.reason {
            None => println!("  {card}"),
            Some(reason) => println!("  {card} ({reason})"),
        }
    }
}
