//! Common test utilities for integration tests.
//!
//! Builds lifecycle managers and sessions over the in-crate doubles so each
//! test only states what differs from a healthy service and an empty store.
//!
//! # Example
//!
//! ```ignore
//! use common::TestWorld;
//!
//! let world = TestWorld::new();
//! let deck = world.manager().acquire_deck().await.unwrap();
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use std::sync::Arc;

use slapjack::adapters::mock::{FakeDeckService, InMemoryStoreBackend};
use slapjack::deck::DeckLifecycleManager;
use slapjack::models::Deck;
use slapjack::startup::init_test_logging;
use slapjack::storage::PersistenceStore;

/// A fake deck service and an in-memory store wired to one manager.
#[allow(dead_code)]
pub struct TestWorld {
    pub service: FakeDeckService,
    pub backend: InMemoryStoreBackend,
    pub store: Arc<PersistenceStore>,
}

#[allow(dead_code)]
impl TestWorld {
    /// Empty store, healthy service.
    pub fn new() -> Self {
        Self::with_decks(vec![])
    }

    /// Store pre-loaded with `decks`.
    pub fn with_decks(decks: Vec<Deck>) -> Self {
        init_test_logging();
        let backend = InMemoryStoreBackend::with_decks(decks);
        Self {
            service: FakeDeckService::new(),
            store: Arc::new(PersistenceStore::new(backend.clone())),
            backend,
        }
    }

    /// A manager sharing this world's service and store.
    pub fn manager(&self) -> DeckLifecycleManager {
        DeckLifecycleManager::new(Arc::new(self.service.clone()), self.store.clone())
    }

    /// The single stored deck, if there is exactly one.
    pub fn stored_deck(&self) -> Option<Deck> {
        let decks = self.backend.decks();
        assert!(decks.len() <= 1, "store holds {} decks", decks.len());
        decks.into_iter().next()
    }
}
