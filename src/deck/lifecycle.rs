//! Deck acquisition, renewal and drawing.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use super::image::CardImage;
use crate::error::{LifecycleError, ServiceError};
use crate::models::{Card, Deck, Tally, DECK_TTL_SECS, FULL_DECK};
use crate::storage::PersistenceStore;
use crate::traits::{DeckService, DrawnCard};

/// Produces a usable deck and keeps it in step with the remote service.
///
/// Cloning is cheap; clones share the service and the store. The session
/// hands clones to spawned tasks for the remote half of a draw or reset.
#[derive(Clone)]
pub struct DeckLifecycleManager {
    service: Arc<dyn DeckService>,
    store: Arc<PersistenceStore>,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for DeckLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeckLifecycleManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl DeckLifecycleManager {
    /// Create a manager using the default 14 day expiry.
    pub fn new(service: Arc<dyn DeckService>, store: Arc<PersistenceStore>) -> Self {
        Self {
            service,
            store,
            ttl: chrono::Duration::seconds(DECK_TTL_SECS),
        }
    }

    /// Override how long an untouched deck stays valid.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => self.ttl = ttl,
            Err(e) => tracing::warn!("Ignoring deck TTL {:?}: {}", ttl, e),
        }
        self
    }

    pub fn store(&self) -> &Arc<PersistenceStore> {
        &self.store
    }

    /// Return the stored deck, creating one if needed.
    ///
    /// - empty store: create, save, shuffle
    /// - expired deck: create the replacement first, then swap it in
    /// - valid deck: refresh `last_accessed` and return it
    ///
    /// An unreadable store is wiped and treated as empty. If the wipe fails
    /// the result is [`LifecycleError::StoreUnusable`].
    pub async fn acquire_deck(&self) -> Result<Deck, LifecycleError> {
        let stored = match self.store.load_deck() {
            Ok(deck) => deck,
            Err(e) => {
                tracing::error!("Deck store unreadable, resetting it: {} [{}]", e, e.error_code());
                self.store.wipe().map_err(LifecycleError::StoreUnusable)?;
                None
            }
        };

        match stored {
            None => {
                tracing::info!("No saved deck, creating one");
                let deck = self.create_remote_deck().await?;
                self.store.save_deck(&deck);
                Ok(self.shuffle_new_deck(deck).await)
            }
            Some(old) if old.is_expired_at(Utc::now(), self.ttl) => {
                tracing::info!(
                    "Deck {} expired (last used {}), replacing it",
                    old.id(),
                    old.last_accessed
                );
                let deck = self.create_remote_deck().await?;
                self.store.replace_deck(&old, &deck);
                Ok(self.shuffle_new_deck(deck).await)
            }
            Some(mut deck) => {
                deck.touch();
                self.store.save_deck(&deck);
                tracing::debug!(
                    "Loaded deck {} with {} cards remaining",
                    deck.id(),
                    deck.cards_remaining()
                );
                Ok(deck)
            }
        }
    }

    async fn create_remote_deck(&self) -> Result<Deck, ServiceError> {
        let created = self.service.create_deck().await.map_err(|e| {
            tracing::error!("Failed to create deck: {}", e);
            e
        })?;
        tracing::info!("Created deck {}", created.id);
        Ok(Deck::new(created.id, created.remaining))
    }

    async fn shuffle_new_deck(&self, mut deck: Deck) -> Deck {
        match self.service.shuffle(deck.id()).await {
            Ok(ack) => {
                if let Some(remaining) = ack.remaining {
                    deck.set_cards_remaining(remaining);
                }
            }
            Err(e) => tracing::warn!("Failed to shuffle new deck {}: {}", deck.id(), e),
        }
        self.store.save_deck(&deck);
        deck
    }

    /// Start a new game on `deck`: drop its cards, shuffle, refill.
    ///
    /// A failed shuffle is logged and the count still resets to a full
    /// deck. When the service reports a count with the shuffle, that count
    /// is used instead.
    pub async fn reset_for_new_game(&self, mut deck: Deck) -> Deck {
        self.store.purge_all_cards();
        deck.slapped_cards.clear();
        deck.last_card = None;

        let remaining = match self.service.shuffle(deck.id()).await {
            Ok(ack) => match ack.remaining {
                Some(remaining) if remaining != FULL_DECK => {
                    tracing::warn!(
                        "Deck {} reports {} cards after shuffle",
                        deck.id(),
                        remaining
                    );
                    remaining
                }
                _ => FULL_DECK,
            },
            Err(e) => {
                tracing::warn!("Shuffle failed for deck {}, assuming a full deck: {}", deck.id(), e);
                FULL_DECK
            }
        };

        deck.set_cards_remaining(remaining);
        deck.touch();
        self.store.save_deck(&deck);
        tracing::info!("Deck {} reset for a new game", deck.id());
        deck
    }

    /// Draw one card and apply it to `deck`.
    ///
    /// Returns `None` when the deck is empty or the draw failed. A failed
    /// draw leaves `deck` untouched, except when the service reports the
    /// deck empty: then the local count drops to 0.
    pub async fn draw(&self, deck: &mut Deck) -> Option<Card> {
        match self.request_draw(deck).await {
            Ok(drawn) => Some(self.apply_draw(deck, drawn)),
            Err(ServiceError::Exhausted { .. }) => {
                self.mark_exhausted(deck);
                None
            }
            Err(_) => None,
        }
    }

    /// Remote half of [`draw`](Self::draw). Does not touch local state.
    ///
    /// An empty local deck is [`ServiceError::Exhausted`] without a call.
    pub async fn request_draw(&self, deck: &Deck) -> Result<DrawnCard, ServiceError> {
        if deck.is_exhausted() {
            tracing::debug!("Deck {} is empty, not drawing", deck.id());
            return Err(ServiceError::Exhausted { operation: "draw" });
        }

        self.service.draw_one(deck.id()).await.map_err(|e| {
            tracing::warn!("Draw failed for deck {}: {} [{}]", deck.id(), e, e.error_code());
            e
        })
    }

    /// Accept the service's word that `deck` has no cards left.
    ///
    /// Covers a local count that was reset to 52 after a failed shuffle
    /// while the remote deck stayed empty.
    pub fn mark_exhausted(&self, deck: &mut Deck) {
        if deck.is_exhausted() {
            return;
        }
        tracing::warn!(
            "Deck {} is empty on the service but {} cards were expected",
            deck.id(),
            deck.cards_remaining()
        );
        deck.set_cards_remaining(0);
        deck.touch();
        self.store.save_deck(deck);
    }

    /// Local half of [`draw`](Self::draw): record the result and persist.
    pub fn apply_draw(&self, deck: &mut Deck, drawn: DrawnCard) -> Card {
        let mut card = drawn.card;
        card.was_slapped = false;

        deck.set_cards_remaining(drawn.remaining);
        deck.last_card = Some(card.clone());
        deck.touch();
        self.store.save_deck(deck);

        tracing::debug!("Drew {} ({} remaining)", card.label(), deck.cards_remaining());
        card
    }

    /// Claim `card` for the tally.
    ///
    /// Returns `false` without changing anything if `card` was already
    /// slapped.
    pub fn record_slap(&self, deck: &mut Deck, card: &mut Card) -> bool {
        if card.was_slapped {
            return false;
        }

        card.was_slapped = true;
        deck.slapped_cards.push(card.clone());
        if let Some(last) = deck.last_card.as_mut() {
            if last.suit == card.suit && last.value == card.value {
                last.was_slapped = true;
            }
        }
        self.store.save_deck(deck);

        tracing::debug!("Slapped {}", card.label());
        true
    }

    /// Count the slapped cards by kind.
    pub fn tally(&self, deck: &Deck) -> Tally {
        Tally::from_cards(&deck.slapped_cards)
    }

    /// Resolve artwork for `card`. Never fails: missing or undecodable
    /// images become [`CardImage::Placeholder`].
    pub async fn image_for_card(&self, card: Option<&Card>) -> CardImage {
        let Some(card) = card else {
            return CardImage::Back;
        };

        match self.service.fetch_image(&card.image_url).await {
            Ok(bytes) => CardImage::from_payload(bytes),
            Err(e) => {
                tracing::debug!("No image for {}: {}", card.label(), e);
                CardImage::Placeholder
            }
        }
    }
}
