//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`DeckService`] - Remote deck operations (create, shuffle, draw, image)
//! - [`ReachabilityProbe`] - Connectivity checks
//! - [`StoreBackend`] - Durable storage for deck records

pub mod deck_service;
pub mod http;
pub mod reachability;
pub mod store_backend;

pub use deck_service::{DeckService, DrawnCard, NewDeck, ShuffleAck};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use reachability::ReachabilityProbe;
pub use store_backend::StoreBackend;
