//! Deck-composition arithmetic.

use std::collections::BTreeSet;

pub const STANDARD_DECK_SIZE: u32 = 52;
/// Cards dealt to each seated player at round start.
pub const CARDS_PER_PLAYER: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckInfo {
    pub size: u32,
    pub minimum_required: u32,
    pub enough_for_round: bool,
}

/// Predict the deck the server will build from these exclusions.
///
/// Works on the distinct raw tokens, valid or not, so the prediction matches
/// what the user typed even before validation passes. Each rank token removes
/// four cards. A card token removes one more unless the text before its last
/// character is itself an excluded rank token.
pub fn compute_effective_deck_size<R, C>(
    excluded_ranks: &[R],
    excluded_cards: &[C],
    player_count: u32,
) -> DeckInfo
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    let ranks: BTreeSet<&str> = excluded_ranks.iter().map(|t| t.as_ref()).collect();
    let cards: BTreeSet<&str> = excluded_cards
        .iter()
        .map(|t| t.as_ref())
        .filter(|c| !ranks.contains(rank_part(c)))
        .collect();

    let removed = ranks.len() as u32 * 4 + cards.len() as u32;
    let size = STANDARD_DECK_SIZE.saturating_sub(removed);
    let minimum_required = player_count.saturating_mul(CARDS_PER_PLAYER);

    DeckInfo {
        size,
        minimum_required,
        enough_for_round: size >= minimum_required,
    }
}

/// Token without its final (suit) character.
fn rank_part(card: &str) -> &str {
    card.char_indices()
        .last()
        .map(|(i, _)| &card[..i])
        .unwrap_or_default()
}
