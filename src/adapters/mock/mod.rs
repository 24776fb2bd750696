//! Mock implementations for testing.
//!
//! These let the lifecycle manager and the session run without network
//! access or a real data directory.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`FakeDeckService`] - Simulated remote deck with call counters
//! - [`MockReachability`] - Connectivity switch
//! - [`InMemoryStoreBackend`] - In-memory deck records

pub mod deck_service;
pub mod http;
pub mod reachability;
pub mod store;

pub use deck_service::FakeDeckService;
pub use http::MockHttpClient;
pub use reachability::MockReachability;
pub use store::InMemoryStoreBackend;
