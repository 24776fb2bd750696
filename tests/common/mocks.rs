//! Canned deck service payloads.
//!
//! JSON bodies shaped like the public deck-of-cards API, for wiremock and
//! [`MockHttpClient`] based tests.

#![allow(dead_code)]

pub use slapjack::adapters::mock::http::MockResponse;
pub use slapjack::adapters::mock::MockHttpClient;

use serde_json::{json, Value};

/// Body returned when a deck is created.
pub fn new_deck_body(deck_id: &str) -> Value {
    json!({
        "success": true,
        "deck_id": deck_id,
        "shuffled": false,
        "remaining": 52
    })
}

/// Body returned by a shuffle.
pub fn shuffle_body(deck_id: &str, remaining: u32) -> Value {
    json!({
        "success": true,
        "deck_id": deck_id,
        "shuffled": true,
        "remaining": remaining
    })
}

/// Body returned by a one-card draw.
pub fn draw_body(deck_id: &str, value: &str, suit: &str, image: &str, remaining: u32) -> Value {
    json!({
        "success": true,
        "deck_id": deck_id,
        "cards": [{
            "code": format!("{}{}", &value[..1], &suit[..1]),
            "image": image,
            "value": value,
            "suit": suit
        }],
        "remaining": remaining
    })
}

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Answer `url` with `status` and a JSON body.
    pub fn with_json(self, url: &str, status: u16, body: &Value) -> Self {
        self.client
            .set_response(url, MockResponse::json(status, &body.to_string()));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
