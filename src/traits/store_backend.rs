//! Durable storage backend for deck records.

use crate::error::StoreError;
use crate::models::Deck;

/// Raw record storage underneath [`PersistenceStore`](crate::storage::PersistenceStore).
///
/// A backend stores a flat list of deck records (each owning its cards).
/// It does not enforce the single-deck rule; the store does that on top.
pub trait StoreBackend: Send + Sync {
    /// Read every stored deck record.
    ///
    /// An empty store is `Ok(vec![])`. Records that cannot be decoded are
    /// [`StoreError::Corrupt`].
    fn read(&self) -> Result<Vec<Deck>, StoreError>;

    /// Replace the stored records with `decks`.
    fn write(&self, decks: &[Deck]) -> Result<(), StoreError>;

    /// Remove every record, including undecodable ones.
    fn wipe(&self) -> Result<(), StoreError>;
}
