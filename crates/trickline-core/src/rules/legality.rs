//! Advisory move legality.
//!
//! Mirrors the server's follow-suit check so illegal cards can be disabled
//! locally. The server remains authoritative; there is no trump or rank
//! ordering here because the client never decides trick winners.

use std::fmt;

use crate::cards::suit_of;
use crate::model::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    NotYourTurn,
    MustFollowSuit,
    NotInHand,
}

impl IllegalReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IllegalReason::NotYourTurn => "not your turn",
            IllegalReason::MustFollowSuit => "must follow suit",
            IllegalReason::NotInHand => "card not in hand",
        }
    }
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legality {
    pub allowed: bool,
    pub reason: Option<IllegalReason>,
}

impl Legality {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: IllegalReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// True when the viewer is to act and still holds cards.
pub fn can_act(snapshot: Option<&Snapshot>) -> bool {
    snapshot.is_some_and(|s| s.is_viewers_turn() && !s.hand.is_empty())
}

pub fn predict_card_legality(snapshot: Option<&Snapshot>, card: &str) -> Legality {
    let Some(snap) = snapshot.filter(|s| can_act(Some(*s))) else {
        return Legality::denied(IllegalReason::NotYourTurn);
    };

    let card = card.trim().to_uppercase();
    if !snap.holds(&card) {
        return Legality::denied(IllegalReason::NotInHand);
    }

    // nothing led yet
    if snap.current_trick.is_empty() {
        return Legality::allowed();
    }

    match snap.effective_lead_suit() {
        Some(lead) if snap.holds_suit(lead) && suit_of(&card) != Some(lead) => {
            Legality::denied(IllegalReason::MustFollowSuit)
        }
        _ => Legality::allowed(),
    }
}
