//! Card model.

use serde::{Deserialize, Serialize};

/// Card value that scores as a jack when slapped.
pub const JACK: &str = "JACK";

/// A single card drawn from the remote deck.
///
/// Cards are transient: one is created for every draw and only persisted
/// when it is slapped (kept in [`Deck::slapped_cards`](super::Deck)) or as
/// the deck's last-card bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Suit as reported by the service, e.g. `"HEARTS"`
    pub suit: String,
    /// Value as reported by the service, e.g. `"JACK"` or `"7"`
    pub value: String,
    /// Remote image reference, resolved lazily
    pub image_url: String,
    /// Whether this instance already counts toward the slapped tally
    #[serde(default)]
    pub was_slapped: bool,
}

impl Card {
    /// Create a fresh, unslapped card.
    pub fn new(
        suit: impl Into<String>,
        value: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            suit: suit.into(),
            value: value.into(),
            image_url: image_url.into(),
            was_slapped: false,
        }
    }

    /// Check if this card is a jack.
    pub fn is_jack(&self) -> bool {
        self.value == JACK
    }

    /// Human readable name, e.g. `"JACK of SPADES"`.
    pub fn label(&self) -> String {
        format!("{} of {}", self.value, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_unslapped() {
        let card = Card::new("HEARTS", "7", "https://cards/7H.png");
        assert!(!card.was_slapped);
        assert_eq!(card.suit, "HEARTS");
        assert_eq!(card.value, "7");
    }

    #[test]
    fn test_is_jack() {
        assert!(Card::new("SPADES", "JACK", "x").is_jack());
        assert!(!Card::new("SPADES", "QUEEN", "x").is_jack());
        // Only the exact service spelling counts
        assert!(!Card::new("SPADES", "jack", "x").is_jack());
    }

    #[test]
    fn test_label() {
        let card = Card::new("CLUBS", "ACE", "x");
        assert_eq!(card.label(), "ACE of CLUBS");
    }

    #[test]
    fn test_was_slapped_defaults_when_missing() {
        let json = r#"{"suit":"HEARTS","value":"2","image_url":"x"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(!card.was_slapped);
    }
}
