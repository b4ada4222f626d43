use std::time::Duration;

use serde::Deserialize;
use trickline_core::model::PlayerId;
use trickline_core::rules::{validate_card_tokens, validate_rank_tokens, ExclusionRule};
use trickline_core::{Result, TricklineError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub server: ServerSection,

    pub table: TableSection,

    #[serde(default)]
    pub round: RoundSection,

    #[serde(default)]
    pub scores: ScoresSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TricklineError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.table.validate()?;
        self.round.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub endpoint: String,

    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
            return Err(TricklineError::BadRequest(
                "server.endpoint must start with ws:// or wss://".into(),
            ));
        }
        if !(100..=60000).contains(&self.reconnect_delay_ms) {
            return Err(TricklineError::BadRequest(
                "server.reconnect_delay_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

fn default_reconnect_delay_ms() -> u64 {
    1500
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSection {
    pub game_id: String,
    pub player_id: PlayerId,
}

impl TableSection {
    pub fn validate(&self) -> Result<()> {
        if self.game_id.trim().is_empty() {
            return Err(TricklineError::BadRequest(
                "table.game_id must not be empty".into(),
            ));
        }
        if self.player_id == 0 {
            return Err(TricklineError::BadRequest(
                "table.player_id must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Round defaults. Exclusions are comma-separated, as typed by a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundSection {
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub excluded_ranks: String,

    #[serde(default)]
    pub excluded_cards: String,
}

impl RoundSection {
    pub fn validate(&self) -> Result<()> {
        let rule = self.exclusions();
        let mut errors = validate_rank_tokens(rule.ranks.as_slice()).errors;
        errors.extend(validate_card_tokens(rule.cards.as_slice()).errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TricklineError::BadRequest(format!(
                "round exclusions invalid: {}",
                errors.join("; ")
            )))
        }
    }

    pub fn exclusions(&self) -> ExclusionRule {
        ExclusionRule::from_csv(&self.excluded_ranks, &self.excluded_cards)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoresSection {
    /// JSON file for cumulative scores; in-memory when absent.
    #[serde(default)]
    pub path: Option<String>,
}
