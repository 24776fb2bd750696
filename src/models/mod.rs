//! Data models for the deck and the cards drawn from it.

pub mod card;
pub mod deck;
pub mod tally;

pub use card::{Card, JACK};
pub use deck::{Deck, DECK_TTL_SECS, FULL_DECK};
pub use tally::Tally;
