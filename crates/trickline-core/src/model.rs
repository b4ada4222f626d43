//! Reconciled game-state model.
//!
//! These are the normalized forms of the server payloads that the client
//! keeps. A `Snapshot` is always built from one complete `state_update`; it
//! has no setters because it is only ever replaced as a whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{suit_of, Suit};
use crate::protocol::messages::{RoundCompletePayload, StateUpdatePayload, TrickCompletePayload};

/// Seat/player identifier assigned by the server.
pub type PlayerId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub player_id: PlayerId,
    pub card: String,
}

impl PlayedCard {
    pub fn new(player_id: PlayerId, card: impl Into<String>) -> Self {
        Self {
            player_id,
            card: card.into(),
        }
    }
}

/// Public view of one seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub player_id: PlayerId,
    pub hand_count: u32,
    pub score: i64,
}

/// Latest authoritative view of the round for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub table_id: String,
    pub viewer: PlayerId,
    pub leader: PlayerId,
    pub to_act: PlayerId,
    pub trick_index: u32,
    /// `None` until a card has been led.
    pub lead_suit: Option<Suit>,
    /// Cards played this trick, in play order.
    pub current_trick: Vec<PlayedCard>,
    pub hand: Vec<String>,
    pub seats: Vec<SeatView>,
}

impl Snapshot {
    /// Store key.
    pub fn key(&self) -> (String, PlayerId) {
        (self.table_id.clone(), self.viewer)
    }

    pub fn is_viewers_turn(&self) -> bool {
        self.to_act == self.viewer
    }

    /// Suit to follow: the announced lead suit, else the first card's suit.
    pub fn effective_lead_suit(&self) -> Option<Suit> {
        self.lead_suit.or_else(|| {
            self.current_trick
                .first()
                .and_then(|play| suit_of(&play.card))
        })
    }

    pub fn holds(&self, card: &str) -> bool {
        self.hand.iter().any(|c| c == card)
    }

    pub fn holds_suit(&self, suit: Suit) -> bool {
        self.hand.iter().any(|c| suit_of(c) == Some(suit))
    }
}

impl From<StateUpdatePayload> for Snapshot {
    fn from(p: StateUpdatePayload) -> Self {
        Self {
            table_id: p.game_id,
            viewer: p.you,
            leader: p.leader_player_id,
            to_act: p.current_turn_player_id,
            trick_index: p.trick_number,
            lead_suit: p.lead_suit.as_deref().and_then(Suit::from_wire),
            current_trick: p.current_trick.unwrap_or_default(),
            hand: p.your_hand.unwrap_or_default(),
            seats: p.players.unwrap_or_default(),
        }
    }
}

/// One completed trick. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickRecord {
    pub trick_index: u32,
    pub lead_suit: Option<Suit>,
    /// Plays in table order.
    pub plays: Vec<PlayedCard>,
    pub winner: PlayerId,
    pub winning_card: String,
    pub points: i64,
    /// Winner's running total for the round, as reported by the server.
    pub winner_round_total: i64,
}

impl TrickRecord {
    /// Event-trail line, e.g. `Trick 0 winner: P1 (P2:7H, P1:AH)`.
    pub fn summary(&self) -> String {
        let plays = self
            .plays
            .iter()
            .map(|p| format!("P{}:{}", p.player_id, p.card))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Trick {} winner: P{} ({plays})", self.trick_index, self.winner)
    }
}

impl From<TrickCompletePayload> for TrickRecord {
    fn from(p: TrickCompletePayload) -> Self {
        Self {
            trick_index: p.trick_number,
            lead_suit: Suit::from_wire(&p.lead_suit),
            plays: p.plays,
            winner: p.winner_player_id,
            winning_card: p.winner_card,
            points: p.trick_points,
            winner_round_total: p.winner_score_total,
        }
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub table_id: String,
    pub winner: PlayerId,
    /// Final per-player scores; entries whose key is not a player id are dropped.
    pub final_scores: BTreeMap<PlayerId, i64>,
    pub winner_total_points: i64,
}

impl From<RoundCompletePayload> for RoundOutcome {
    fn from(p: RoundCompletePayload) -> Self {
        let final_scores = p
            .final_scores
            .into_iter()
            .filter_map(|(k, v)| k.trim().parse::<PlayerId>().ok().map(|id| (id, v)))
            .collect();
        Self {
            table_id: p.game_id,
            winner: p.winner_player_id,
            final_scores,
            winner_total_points: p.winner_total_points,
        }
    }
}
