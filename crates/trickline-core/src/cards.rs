//! Card tokens as they appear on the wire (`"AH"`, `"10D"`).
//!
//! A token is a rank (`2`-`10`, `J`, `Q`, `K`, `A`) followed by a single suit
//! letter (`C`, `D`, `H`, `S`). Parsing is strict and upper-case only; callers
//! normalize user input with [`crate::rules::parse_tokens`] first.

use std::fmt;
use std::str::FromStr;

use crate::error::TricklineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Wire token for this rank.
    pub fn token(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_token(token: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.token() == token)
    }
}

impl FromStr for Rank {
    type Err = TricklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::from_token(s).ok_or_else(|| TricklineError::BadRequest(format!("invalid rank: {s}")))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn from_letter(c: char) -> Option<Suit> {
        match c {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Parse a one-letter wire suit (`"H"`); empty or unknown yields `None`.
    pub fn from_wire(s: &str) -> Option<Suit> {
        let mut chars = s.trim().chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Suit::from_letter(c)
    }

    /// Human-readable name, e.g. for "Lead Suit: Hearts".
    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

/// Suit letter of a card token, without validating the rank.
///
/// Hand entries come from the server and are compared by suffix, so a token
/// with an unknown rank still has a suit as long as its last letter is one.
pub fn suit_of(token: &str) -> Option<Suit> {
    token.chars().last().and_then(Suit::from_letter)
}

impl FromStr for Card {
    type Err = TricklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TricklineError::BadRequest(format!("invalid card: {s}"));

        // rank is one or two chars, suit exactly one
        if s.chars().count() < 2 {
            return Err(invalid());
        }
        let (split, suit_ch) = s.char_indices().last().ok_or_else(invalid)?;
        let suit = Suit::from_letter(suit_ch).ok_or_else(invalid)?;
        let rank = Rank::from_token(&s[..split]).ok_or_else(invalid)?;
        Ok(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
