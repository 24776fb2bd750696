//! Deck service trait abstraction.
//!
//! The remote deck-of-cards API is an external collaborator. The lifecycle
//! manager only depends on this trait so tests can swap in a simulated deck.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ServiceError;
use crate::models::Card;

/// A deck freshly created by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeck {
    /// Remote deck identifier
    pub id: String,
    /// Cards in the new deck (52 for a standard deck)
    pub remaining: u8,
}

/// Acknowledgement of a successful shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShuffleAck {
    /// Count reported alongside the shuffle, when the service sends one
    pub remaining: Option<u8>,
}

/// Result of drawing one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    /// Cards left in the remote deck after this draw
    pub remaining: u8,
    /// The card that was drawn
    pub card: Card,
}

/// Operations the game needs from the remote deck service.
///
/// Every method either returns its payload or a [`ServiceError`]; a body
/// that does not have the expected shape is an error exactly like a
/// transport failure.
#[async_trait]
pub trait DeckService: Send + Sync {
    /// Create a new deck.
    async fn create_deck(&self) -> Result<NewDeck, ServiceError>;

    /// Return all cards to the deck and shuffle it.
    async fn shuffle(&self, deck_id: &str) -> Result<ShuffleAck, ServiceError>;

    /// Draw the top card.
    async fn draw_one(&self, deck_id: &str) -> Result<DrawnCard, ServiceError>;

    /// Download a card image.
    async fn fetch_image(&self, url: &str) -> Result<Bytes, ServiceError>;
}
