//! Deck model and its expiry rules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::card::Card;

/// Number of cards in a full, freshly shuffled deck.
pub const FULL_DECK: u8 = 52;

/// A deck untouched for longer than this is expired (14 days).
pub const DECK_TTL_SECS: i64 = 1_209_600;

/// The session's single active deck.
///
/// The `id` comes from the remote service and never changes once set.
/// `cards_remaining` is a local cache of the service's count and is kept
/// within `0..=52` by every mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    id: String,
    cards_remaining: u8,
    /// When the deck was created on the service
    pub date_created: DateTime<Utc>,
    /// Last time the deck was loaded or drawn from
    pub last_accessed: DateTime<Utc>,
    /// Cards slapped during the current game
    #[serde(default)]
    pub slapped_cards: Vec<Card>,
    /// The most recently drawn card, restored on startup
    #[serde(default)]
    pub last_card: Option<Card>,
}

impl Deck {
    /// Create a deck record for a newly created remote deck.
    pub fn new(id: impl Into<String>, cards_remaining: u8) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            cards_remaining: cards_remaining.min(FULL_DECK),
            date_created: now,
            last_accessed: now,
            slapped_cards: Vec::new(),
            last_card: None,
        }
    }

    /// Remote identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Cards left according to the last successful draw or shuffle.
    pub fn cards_remaining(&self) -> u8 {
        self.cards_remaining
    }

    /// Update the remaining count, clamped to a full deck.
    pub fn set_cards_remaining(&mut self, remaining: u8) {
        self.cards_remaining = remaining.min(FULL_DECK);
    }

    /// Refresh `last_accessed` to now.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    /// Check if the deck has gone untouched for longer than `ttl` at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_accessed) > ttl
    }

    /// Check if the deck is past the default 14 day expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now(), Duration::seconds(DECK_TTL_SECS))
    }

    /// No cards left to draw.
    pub fn is_exhausted(&self) -> bool {
        self.cards_remaining == 0
    }

    /// A game is in progress: the deck is neither full nor empty.
    pub fn is_mid_game(&self) -> bool {
        self.cards_remaining != 0 && self.cards_remaining != FULL_DECK
    }

    /// Check the record is usable after being read back from storage.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.cards_remaining <= FULL_DECK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_clamps_remaining() {
        let deck = Deck::new("abc", 80);
        assert_eq!(deck.cards_remaining(), FULL_DECK);
        assert_eq!(deck.id(), "abc");
        assert!(deck.slapped_cards.is_empty());
        assert!(deck.last_card.is_none());
    }

    #[test]
    fn test_set_cards_remaining_clamps() {
        let mut deck = Deck::new("abc", 52);
        deck.set_cards_remaining(10);
        assert_eq!(deck.cards_remaining(), 10);
        deck.set_cards_remaining(200);
        assert_eq!(deck.cards_remaining(), 52);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut deck = Deck::new("abc", 52);
        let now = Utc::now();
        let ttl = Duration::seconds(DECK_TTL_SECS);

        deck.last_accessed = now - Duration::seconds(DECK_TTL_SECS);
        assert!(!deck.is_expired_at(now, ttl));

        deck.last_accessed = now - Duration::seconds(DECK_TTL_SECS + 1);
        assert!(deck.is_expired_at(now, ttl));
    }

    #[test]
    fn test_fresh_deck_not_expired() {
        let deck = Deck::new("abc", 52);
        assert!(!deck.is_expired());
    }

    #[test]
    fn test_mid_game() {
        let mut deck = Deck::new("abc", 52);
        assert!(!deck.is_mid_game());
        deck.set_cards_remaining(0);
        assert!(!deck.is_mid_game());
        assert!(deck.is_exhausted());
        deck.set_cards_remaining(30);
        assert!(deck.is_mid_game());
    }

    #[test]
    fn test_is_valid() {
        assert!(Deck::new("abc", 52).is_valid());
        assert!(!Deck::new("", 52).is_valid());

        let json = r#"{"id":"abc","cards_remaining":99,
            "date_created":"2024-01-01T00:00:00Z","last_accessed":"2024-01-01T00:00:00Z"}"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert!(!deck.is_valid());
    }
}
