//! Rule engine: pure functions, no I/O.
//!
//! - Tokens: CSV parsing and validation of exclusion lists.
//! - Deck: effective deck size after exclusions.
//! - Exclusion: the rule value supplied before a round, and its readiness plan.
//! - Legality: advisory per-card prediction against the latest snapshot.
//!
//! Nothing here is binding. The server re-checks every move and every round
//! start; these answers only let a UI disable actions early.

pub mod deck;
pub mod exclusion;
pub mod legality;
pub mod tokens;

pub use deck::{compute_effective_deck_size, DeckInfo, CARDS_PER_PLAYER, STANDARD_DECK_SIZE};
pub use exclusion::{ExclusionRule, RoundPlan, MIN_PLAYERS_FOR_PREDICTION};
pub use legality::{can_act, predict_card_legality, IllegalReason, Legality};
pub use tokens::{parse_tokens, validate_card_tokens, validate_rank_tokens, Validation};
