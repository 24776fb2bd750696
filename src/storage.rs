//! The local deck store.
//!
//! [`PersistenceStore`] keeps at most one deck record (with the cards it
//! owns) on top of a [`StoreBackend`]. It is opened once at startup and
//! shared by reference; there is no global instance.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::adapters::FileStoreBackend;
use crate::error::StoreError;
use crate::models::{Card, Deck};
use crate::traits::StoreBackend;

/// Single-deck store over a [`StoreBackend`].
///
/// Reads that fail are returned as errors. Writes are fail-soft: they log
/// and return `false`, and the caller keeps its in-memory state and writes
/// again on the next mutation.
pub struct PersistenceStore {
    backend: Mutex<Box<dyn StoreBackend>>,
}

impl std::fmt::Debug for PersistenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceStore").finish_non_exhaustive()
    }
}

impl PersistenceStore {
    /// Create a store over `backend`.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
        }
    }

    /// Open the JSON file store in `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let backend = FileStoreBackend::in_dir(data_dir);
        tracing::debug!("Opening deck store at {}", backend.path().display());
        Self::new(backend)
    }

    fn backend(&self) -> MutexGuard<'_, Box<dyn StoreBackend>> {
        // A panic while holding the lock cannot leave records half-written,
        // the backend replaces them wholesale.
        self.backend.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the active deck.
    ///
    /// Returns `Ok(None)` for an empty store. When several records exist the
    /// first is kept and the rest are deleted unread. A kept record with an
    /// empty id or an impossible card count is [`StoreError::Corrupt`].
    pub fn load_deck(&self) -> Result<Option<Deck>, StoreError> {
        let backend = self.backend();
        let mut decks = backend.read()?;

        if decks.len() > 1 {
            tracing::warn!(
                "Found {} deck records, keeping {} and deleting the rest",
                decks.len(),
                decks[0].id()
            );
            decks.truncate(1);
            if let Err(e) = backend.write(&decks) {
                tracing::warn!("Failed to remove duplicate decks: {}", e);
            }
        }

        match decks.into_iter().next() {
            Some(deck) if !deck.is_valid() => Err(StoreError::Corrupt {
                message: format!(
                    "invalid deck record (id {:?}, {} cards remaining)",
                    deck.id(),
                    deck.cards_remaining()
                ),
            }),
            deck => Ok(deck),
        }
    }

    /// Persist `deck` as the only record.
    ///
    /// Returns `false` if the write failed.
    pub fn save_deck(&self, deck: &Deck) -> bool {
        match self.backend().write(std::slice::from_ref(deck)) {
            Ok(()) => {
                tracing::trace!(
                    "Saved deck {} ({} remaining, {} slapped)",
                    deck.id(),
                    deck.cards_remaining(),
                    deck.slapped_cards.len()
                );
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save deck {}: {} [{}]", deck.id(), e, e.error_code());
                false
            }
        }
    }

    /// Swap `old` for `new` in a single write, dropping every card `old` owned.
    pub fn replace_deck(&self, old: &Deck, new: &Deck) -> bool {
        tracing::info!("Replacing deck {} with {}", old.id(), new.id());
        self.save_deck(new)
    }

    /// Delete `deck` and the cards it owns.
    pub fn delete_deck(&self, deck: &Deck) -> bool {
        let backend = self.backend();
        let result = backend.read().and_then(|mut decks| {
            decks.retain(|d| d.id() != deck.id());
            backend.write(&decks)
        });

        match result {
            Ok(()) => {
                tracing::debug!("Deleted deck {}", deck.id());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete deck {}: {}", deck.id(), e);
                false
            }
        }
    }

    /// Delete every stored card: slapped cards and last-card bookkeeping.
    pub fn purge_all_cards(&self) -> bool {
        let backend = self.backend();
        let result = backend.read().and_then(|mut decks| {
            for deck in decks.iter_mut() {
                deck.slapped_cards.clear();
                deck.last_card = None;
            }
            backend.write(&decks)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to purge cards: {}", e);
                false
            }
        }
    }

    /// The most recently drawn card of the stored deck, if any.
    pub fn last_card(&self) -> Option<Card> {
        match self.backend().read() {
            Ok(decks) => decks.into_iter().next().and_then(|d| d.last_card),
            Err(e) => {
                tracing::debug!("Could not read last card: {}", e);
                None
            }
        }
    }

    /// Remove every record, readable or not.
    pub fn wipe(&self) -> Result<(), StoreError> {
        tracing::warn!("Wiping local deck store");
        self.backend().wipe()
    }
}
