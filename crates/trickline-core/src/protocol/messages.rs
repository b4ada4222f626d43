//! Typed payloads for every message kind.
//!
//! Field names follow the wire (camelCase). Both directions derive
//! `Serialize` and `Deserialize` so test servers can speak the same structs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{PlayedCard, PlayerId, SeatView};
use crate::protocol::envelope::MessageKind;

// --------------------
// Outbound (client -> server)
// --------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGamePayload {
    pub game_id: String,
    pub player_id: PlayerId,
}

/// Exclusion lists sent with `start_round`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_ranks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_cards: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRoundPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<ExclusionPayload>,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayCardPayload {
    pub card: String,
}

/// Client commands. Serializes to the `{"type", "payload"}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Outbound {
    JoinGame(JoinGamePayload),
    StartRound(StartRoundPayload),
    GetState(EmptyPayload),
    PlayCard(PlayCardPayload),
}

impl Outbound {
    pub fn kind(&self) -> MessageKind {
        match self {
            Outbound::JoinGame(_) => MessageKind::JoinGame,
            Outbound::StartRound(_) => MessageKind::StartRound,
            Outbound::GetState(_) => MessageKind::GetState,
            Outbound::PlayCard(_) => MessageKind::PlayCard,
        }
    }
}

// --------------------
// Inbound (server -> client)
// --------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedPayload {
    pub game_id: String,
    pub player_id: PlayerId,
    #[serde(default)]
    pub connected_players: Vec<PlayerId>,
}

/// Authoritative round view for one player.
///
/// The list fields are optional on the wire; [`crate::model::Snapshot`]
/// normalizes them to empty sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdatePayload {
    pub game_id: String,
    pub you: PlayerId,
    pub leader_player_id: PlayerId,
    pub current_turn_player_id: PlayerId,
    pub trick_number: u32,
    #[serde(default)]
    pub lead_suit: Option<String>,
    #[serde(default)]
    pub current_trick: Option<Vec<PlayedCard>>,
    #[serde(default)]
    pub your_hand: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<SeatView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickCompletePayload {
    pub game_id: String,
    pub trick_number: u32,
    #[serde(default)]
    pub lead_suit: String,
    #[serde(default)]
    pub plays: Vec<PlayedCard>,
    pub winner_player_id: PlayerId,
    pub winner_card: String,
    pub trick_points: i64,
    pub winner_score_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundCompletePayload {
    pub game_id: String,
    pub winner_player_id: PlayerId,
    /// Keyed by player id rendered as a string, as on the wire.
    #[serde(default)]
    pub final_scores: BTreeMap<String, i64>,
    #[serde(default)]
    pub winner_total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Decoded server event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Joined(JoinedPayload),
    StateUpdate(StateUpdatePayload),
    TrickComplete(TrickCompletePayload),
    RoundComplete(RoundCompletePayload),
    Error(ErrorPayload),
    /// Kind this client does not understand; carried for logging only.
    Unknown { kind: String },
}

impl Inbound {
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            Inbound::Joined(_) => Some(MessageKind::Joined),
            Inbound::StateUpdate(_) => Some(MessageKind::StateUpdate),
            Inbound::TrickComplete(_) => Some(MessageKind::TrickComplete),
            Inbound::RoundComplete(_) => Some(MessageKind::RoundComplete),
            Inbound::Error(_) => Some(MessageKind::Error),
            Inbound::Unknown { .. } => None,
        }
    }

    /// Wire tag, or the unrecognized tag as received.
    pub fn tag(&self) -> &str {
        match self {
            Inbound::Unknown { kind } => kind,
            other => other.kind().map(MessageKind::as_str).unwrap_or_default(),
        }
    }
}
