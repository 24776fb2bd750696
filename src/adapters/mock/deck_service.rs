//! Simulated deck service for testing.
//!
//! Keeps one ordered 52-card pile per deck id in memory. Shuffling restores
//! the full pile in a fixed order so draws are predictable.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ServiceError;
use crate::models::{Card, FULL_DECK};
use crate::traits::{DeckService, DrawnCard, NewDeck, ShuffleAck};

/// Smallest byte sequence recognised as a PNG.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

const SUITS: [&str; 4] = ["SPADES", "HEARTS", "DIAMONDS", "CLUBS"];
const VALUES: [&str; 13] = [
    "ACE", "2", "3", "4", "5", "6", "7", "8", "9", "10", "JACK", "QUEEN", "KING",
];

/// Every card of a standard deck, suit by suit.
pub fn standard_cards() -> VecDeque<Card> {
    SUITS
        .iter()
        .flat_map(|suit| {
            VALUES.iter().map(move |value| {
                Card::new(
                    *suit,
                    *value,
                    format!("https://cards.test/static/img/{}{}.png", value, suit),
                )
            })
        })
        .collect()
}

#[derive(Debug, Default)]
struct FakeState {
    decks: HashMap<String, VecDeque<Card>>,
    create_calls: usize,
    shuffle_calls: usize,
    draw_calls: usize,
    image_calls: usize,
    create_should_fail: bool,
    shuffle_should_fail: bool,
    draw_should_fail: bool,
    image_should_fail: bool,
    omit_shuffle_remaining: bool,
    draw_delay: Option<Duration>,
}

/// In-memory [`DeckService`] with call counters and failure switches.
///
/// # Example
///
/// ```ignore
/// use slapjack::adapters::mock::FakeDeckService;
///
/// let service = FakeDeckService::new();
/// let deck = service.create_deck().await?;
/// service.shuffle(&deck.id).await?;
/// let drawn = service.draw_one(&deck.id).await?;
/// assert_eq!(drawn.remaining, 51);
/// assert_eq!(service.draw_calls(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeDeckService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDeckService {
    /// Create a service with no decks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a remote deck with `remaining` cards left.
    ///
    /// The remaining cards are the tail of the standard order.
    pub fn insert_deck(&self, id: &str, remaining: u8) {
        let mut cards = standard_cards();
        let skip = cards.len().saturating_sub(remaining as usize);
        cards.drain(..skip);
        self.state.lock().unwrap().decks.insert(id.to_string(), cards);
    }

    /// Register a remote deck that will deal exactly `cards`, first card first.
    pub fn stack_deck(&self, id: &str, cards: Vec<Card>) {
        self.state
            .lock()
            .unwrap()
            .decks
            .insert(id.to_string(), cards.into_iter().collect());
    }

    /// Cards left in a remote deck, if it exists.
    pub fn remaining(&self, id: &str) -> Option<usize> {
        self.state.lock().unwrap().decks.get(id).map(|d| d.len())
    }

    /// Number of decks created through [`DeckService::create_deck`].
    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    /// Number of shuffle requests, including failed ones.
    pub fn shuffle_calls(&self) -> usize {
        self.state.lock().unwrap().shuffle_calls
    }

    /// Number of draw requests, including failed ones.
    pub fn draw_calls(&self) -> usize {
        self.state.lock().unwrap().draw_calls
    }

    /// Number of image requests.
    pub fn image_calls(&self) -> usize {
        self.state.lock().unwrap().image_calls
    }

    /// Configure whether create_deck should fail.
    pub fn set_create_should_fail(&self, should_fail: bool) {
        self.state.lock().unwrap().create_should_fail = should_fail;
    }

    /// Configure whether shuffle should fail.
    pub fn set_shuffle_should_fail(&self, should_fail: bool) {
        self.state.lock().unwrap().shuffle_should_fail = should_fail;
    }

    /// Configure whether draw_one should fail.
    pub fn set_draw_should_fail(&self, should_fail: bool) {
        self.state.lock().unwrap().draw_should_fail = should_fail;
    }

    /// Configure whether fetch_image should fail.
    pub fn set_image_should_fail(&self, should_fail: bool) {
        self.state.lock().unwrap().image_should_fail = should_fail;
    }

    /// Make shuffle acknowledge without reporting a count.
    pub fn set_omit_shuffle_remaining(&self, omit: bool) {
        self.state.lock().unwrap().omit_shuffle_remaining = omit;
    }

    /// Delay every draw response by `delay`.
    pub fn set_draw_delay(&self, delay: Option<Duration>) {
        self.state.lock().unwrap().draw_delay = delay;
    }

    fn unreachable(operation: &'static str) -> ServiceError {
        ServiceError::Transport {
            operation,
            message: "simulated failure".to_string(),
        }
    }
}

#[async_trait]
impl DeckService for FakeDeckService {
    async fn create_deck(&self) -> Result<NewDeck, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.create_should_fail {
            return Err(Self::unreachable("create_deck"));
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        state.decks.insert(id.clone(), standard_cards());
        Ok(NewDeck {
            id,
            remaining: FULL_DECK,
        })
    }

    async fn shuffle(&self, deck_id: &str) -> Result<ShuffleAck, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.shuffle_calls += 1;
        if state.shuffle_should_fail {
            return Err(Self::unreachable("shuffle"));
        }

        let Some(deck) = state.decks.get_mut(deck_id) else {
            return Err(ServiceError::Status {
                operation: "shuffle",
                status: 404,
            });
        };
        *deck = standard_cards();

        let remaining = if state.omit_shuffle_remaining {
            None
        } else {
            Some(FULL_DECK)
        };
        Ok(ShuffleAck { remaining })
    }

    async fn draw_one(&self, deck_id: &str) -> Result<DrawnCard, ServiceError> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.draw_calls += 1;
            state.draw_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if state.draw_should_fail {
            return Err(Self::unreachable("draw"));
        }

        let Some(deck) = state.decks.get_mut(deck_id) else {
            return Err(ServiceError::Status {
                operation: "draw",
                status: 404,
            });
        };
        let card = deck
            .pop_front()
            .ok_or(ServiceError::Exhausted { operation: "draw" })?;

        Ok(DrawnCard {
            remaining: deck.len() as u8,
            card,
        })
    }

    async fn fetch_image(&self, _url: &str) -> Result<Bytes, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.image_calls += 1;
        if state.image_should_fail {
            return Err(Self::unreachable("fetch_image"));
        }
        Ok(Bytes::from_static(PNG_SIGNATURE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_cards() {
        let cards = standard_cards();
        assert_eq!(cards.len(), 52);
        assert_eq!(cards.iter().filter(|c| c.is_jack()).count(), 4);
        assert_eq!(cards[0].label(), "ACE of SPADES");
    }

    #[tokio::test]
    async fn test_create_shuffle_draw() {
        let service = FakeDeckService::new();
        let deck = service.create_deck().await.unwrap();
        assert_eq!(deck.remaining, 52);

        let ack = service.shuffle(&deck.id).await.unwrap();
        assert_eq!(ack.remaining, Some(52));

        let drawn = service.draw_one(&deck.id).await.unwrap();
        assert_eq!(drawn.remaining, 51);
        assert_eq!(drawn.card.value, "ACE");

        assert_eq!(service.create_calls(), 1);
        assert_eq!(service.shuffle_calls(), 1);
        assert_eq!(service.draw_calls(), 1);
    }

    #[tokio::test]
    async fn test_unique_ids() {
        let service = FakeDeckService::new();
        let a = service.create_deck().await.unwrap();
        let b = service.create_deck().await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_insert_deck_tail() {
        let service = FakeDeckService::new();
        service.insert_deck("abc", 2);
        assert_eq!(service.remaining("abc"), Some(2));

        let drawn = service.draw_one("abc").await.unwrap();
        assert_eq!(drawn.remaining, 1);
        assert_eq!(drawn.card.label(), "QUEEN of CLUBS");
    }

    #[tokio::test]
    async fn test_stack_deck_order() {
        let service = FakeDeckService::new();
        service.stack_deck(
            "abc",
            vec![
                Card::new("HEARTS", "JACK", "x"),
                Card::new("HEARTS", "2", "y"),
            ],
        );

        assert!(service.draw_one("abc").await.unwrap().card.is_jack());
        let last = service.draw_one("abc").await.unwrap();
        assert_eq!(last.remaining, 0);
        assert_eq!(
            service.draw_one("abc").await.unwrap_err(),
            ServiceError::Exhausted { operation: "draw" }
        );
    }

    #[tokio::test]
    async fn test_unknown_deck_is_404() {
        let service = FakeDeckService::new();
        let err = service.draw_one("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let service = FakeDeckService::new();
        service.set_create_should_fail(true);
        assert!(service.create_deck().await.is_err());
        assert_eq!(service.create_calls(), 1);

        service.insert_deck("abc", 52);
        service.set_draw_should_fail(true);
        assert!(service.draw_one("abc").await.is_err());
        assert_eq!(service.remaining("abc"), Some(52));

        service.set_image_should_fail(true);
        assert!(service.fetch_image("x").await.is_err());
    }

    #[tokio::test]
    async fn test_shuffle_without_remaining() {
        let service = FakeDeckService::new();
        service.insert_deck("abc", 3);
        service.set_omit_shuffle_remaining(true);

        let ack = service.shuffle("abc").await.unwrap();
        assert_eq!(ack.remaining, None);
        assert_eq!(service.remaining("abc"), Some(52));
    }
}
