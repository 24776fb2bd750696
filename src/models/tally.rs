//! Slapped-card scoring.

use serde::Serialize;

use super::card::Card;

/// Final score of a game: slapped jacks versus everything else slapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub jacks: usize,
    pub other: usize,
}

impl Tally {
    /// Partition cards by whether they are jacks.
    pub fn from_cards(cards: &[Card]) -> Self {
        let jacks = cards.iter().filter(|c| c.is_jack()).count();
        Self {
            jacks,
            other: cards.len() - jacks,
        }
    }

    /// Total number of slapped cards.
    pub fn total(&self) -> usize {
        self.jacks + self.other
    }
}
