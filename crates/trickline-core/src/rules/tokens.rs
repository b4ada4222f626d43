//! Exclusion token parsing and validation.

use crate::cards::{Card, Rank};

/// Outcome of validating a token list.
///
/// `values` always echoes every parsed token, valid or not, so a UI can show
/// what was typed next to the errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub values: Vec<String>,
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Split on commas, trim, upper-case, drop empty tokens. Order is kept and
/// duplicates are not removed.
pub fn parse_tokens(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input
        .split(',')
        .map(|item| item.trim().to_uppercase())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn validate_rank_tokens<S: AsRef<str>>(tokens: &[S]) -> Validation {
    let values: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    let errors = values
        .iter()
        .filter(|t| Rank::from_token(t).is_none())
        .map(|t| format!("Invalid excluded rank: {t}"))
        .collect();
    Validation { values, errors }
}

pub fn validate_card_tokens<S: AsRef<str>>(tokens: &[S]) -> Validation {
    let values: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    let errors = values
        .iter()
        .filter(|t| t.parse::<Card>().is_err())
        .map(|t| format!("Invalid excluded card: {t}"))
        .collect();
    Validation { values, errors }
}
