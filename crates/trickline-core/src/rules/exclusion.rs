//! Exclusion rule supplied before a round starts.

use crate::protocol::messages::ExclusionPayload;
use crate::rules::deck::{compute_effective_deck_size, DeckInfo};
use crate::rules::tokens::{parse_tokens, validate_card_tokens, validate_rank_tokens, Validation};

/// Deck prediction never assumes fewer seats than this.
pub const MIN_PLAYERS_FOR_PREDICTION: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRule {
    pub ranks: Vec<String>,
    pub cards: Vec<String>,
}

impl ExclusionRule {
    /// Build from the comma-separated inputs a user types.
    pub fn from_csv(ranks: &str, cards: &str) -> Self {
        Self {
            ranks: parse_tokens(ranks),
            cards: parse_tokens(cards),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty() && self.cards.is_empty()
    }

    /// Validate both lists and predict the deck for `connected_players` seats.
    pub fn plan(&self, connected_players: usize) -> RoundPlan {
        let players = u32::try_from(connected_players)
            .unwrap_or(u32::MAX)
            .max(MIN_PLAYERS_FOR_PREDICTION);
        let ranks = validate_rank_tokens(self.ranks.as_slice());
        let cards = validate_card_tokens(self.cards.as_slice());
        let deck = compute_effective_deck_size(ranks.values.as_slice(), cards.values.as_slice(), players);
        RoundPlan { ranks, cards, deck }
    }

    /// Wire form; `None` when nothing is excluded.
    pub fn to_payload(&self) -> Option<ExclusionPayload> {
        if self.is_empty() {
            return None;
        }
        Some(ExclusionPayload {
            excluded_ranks: Some(self.ranks.clone()),
            excluded_cards: Some(self.cards.clone()),
        })
    }
}

/// Everything a UI needs to decide whether "start round" is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    pub ranks: Validation,
    pub cards: Validation,
    pub deck: DeckInfo,
}

impl RoundPlan {
    pub fn ready(&self) -> bool {
        self.ranks.is_valid() && self.cards.is_valid() && self.deck.enough_for_round
    }

    /// All reasons the round cannot start, in display order.
    pub fn errors(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .ranks
            .errors
            .iter()
            .chain(self.cards.errors.iter())
            .cloned()
            .collect();
        if !self.deck.enough_for_round {
            out.push(format!(
                "Deck too small: {} cards, {} required",
                self.deck.size, self.deck.minimum_required
            ));
        }
        out
    }
}
