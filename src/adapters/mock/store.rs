//! In-memory store backend for testing.

use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::models::Deck;
use crate::traits::StoreBackend;

/// In-memory [`StoreBackend`] with failure switches.
///
/// Clones share state, so a test can keep a handle while the store owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreBackend {
    /// Stored records
    decks: Arc<Mutex<Vec<Deck>>>,
    /// Reads report corruption until the next wipe
    corrupt: Arc<Mutex<bool>>,
    /// Whether read should fail
    read_should_fail: Arc<Mutex<bool>>,
    /// Whether write should fail
    write_should_fail: Arc<Mutex<bool>>,
    /// Whether wipe should fail
    wipe_should_fail: Arc<Mutex<bool>>,
    /// Successful writes so far
    writes: Arc<Mutex<usize>>,
}

impl InMemoryStoreBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend holding `decks`.
    pub fn with_decks(decks: Vec<Deck>) -> Self {
        let backend = Self::default();
        *backend.decks.lock().unwrap() = decks;
        backend
    }

    /// Snapshot of the stored records.
    pub fn decks(&self) -> Vec<Deck> {
        self.decks.lock().unwrap().clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Simulate undecodable contents.
    pub fn set_corrupt(&self, corrupt: bool) {
        *self.corrupt.lock().unwrap() = corrupt;
    }

    /// Configure whether read should fail with an I/O style error.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether write should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether wipe should fail.
    pub fn set_wipe_should_fail(&self, should_fail: bool) {
        *self.wipe_should_fail.lock().unwrap() = should_fail;
    }
}

impl StoreBackend for InMemoryStoreBackend {
    fn read(&self) -> Result<Vec<Deck>, StoreError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(StoreError::Unavailable {
                message: "mock read failure".to_string(),
            });
        }
        if *self.corrupt.lock().unwrap() {
            return Err(StoreError::Corrupt {
                message: "mock corruption".to_string(),
            });
        }
        Ok(self.decks.lock().unwrap().clone())
    }

    fn write(&self, decks: &[Deck]) -> Result<(), StoreError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(StoreError::Unavailable {
                message: "mock write failure".to_string(),
            });
        }
        *self.decks.lock().unwrap() = decks.to_vec();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn wipe(&self) -> Result<(), StoreError> {
        if *self.wipe_should_fail.lock().unwrap() {
            return Err(StoreError::Unavailable {
                message: "mock wipe failure".to_string(),
            });
        }
        self.decks.lock().unwrap().clear();
        *self.corrupt.lock().unwrap() = false;
        Ok(())
    }
}
