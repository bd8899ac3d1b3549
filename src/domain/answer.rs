//! Free-form answers collected alongside drawings

use serde::{Deserialize, Serialize};

/// Highest star rating a question accepts
pub const MAX_RATING: u8 = 5;

/// A primitive answer value keyed by question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Flag(bool),
    Rating(u8),
}

impl Answer {
    /// Build a rating, clamped to 1..=MAX_RATING
    pub fn rating(stars: u8) -> Self {
        Answer::Rating(stars.clamp(1, MAX_RATING))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Flag value; anything other than a set flag reads as false
    pub fn is_set(&self) -> bool {
        matches!(self, Answer::Flag(true))
    }
}
