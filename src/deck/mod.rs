//! Deck lifecycle: acquiring, renewing and drawing from the active deck.

pub mod image;
pub mod lifecycle;

pub use image::CardImage;
pub use lifecycle::DeckLifecycleManager;
