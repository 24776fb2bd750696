//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`DeckApiClient`] - Deck service over HTTP
//! - [`HttpReachabilityProbe`] - Connectivity check against the API root
//! - [`FileStoreBackend`] - JSON file deck storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::FakeDeckService`] - Simulated remote deck
//! - [`mock::MockReachability`] - Connectivity switch
//! - [`mock::InMemoryStoreBackend`] - In-memory deck records

pub mod deck_api;
pub mod file_store;
pub mod http_probe;
pub mod mock;
pub mod reqwest_http;

pub use deck_api::{DeckApiClient, DEFAULT_API_BASE_URL};
pub use file_store::FileStoreBackend;
pub use http_probe::HttpReachabilityProbe;
pub use mock::{FakeDeckService, InMemoryStoreBackend, MockHttpClient, MockReachability};
pub use reqwest_http::ReqwestHttpClient;
