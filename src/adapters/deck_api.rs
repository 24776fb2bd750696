//! HTTP client for the deck-of-cards API.
//!
//! Endpoints used:
//! - `POST {base}/new/` creates a deck
//! - `POST {base}/{id}/shuffle/` returns every card and shuffles
//! - `GET {base}/{id}/draw/?count=1` draws the top card
//! - `GET {image_url}` fetches a card face

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::models::{Card, FULL_DECK};
use crate::traits::{
    DeckService, DrawnCard, Headers, HttpClient, NewDeck, Response, ShuffleAck,
};

/// Default API root.
pub const DEFAULT_API_BASE_URL: &str = "https://deckofcardsapi.com/api/deck";

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DeckPayload {
    #[serde(default = "default_success")]
    success: bool,
    deck_id: String,
    remaining: u32,
}

#[derive(Debug, Deserialize)]
struct ShufflePayload {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    remaining: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DrawPayload {
    #[serde(default = "default_success")]
    success: bool,
    remaining: u32,
    cards: Vec<CardPayload>,
}

#[derive(Debug, Deserialize)]
struct CardPayload {
    suit: String,
    value: String,
    image: String,
}

/// [`DeckService`] implementation over any [`HttpClient`].
#[derive(Debug, Clone)]
pub struct DeckApiClient<C: HttpClient> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> DeckApiClient<C> {
    /// Create a client against the public API.
    pub fn new(http: C) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &C {
        &self.http
    }

    fn new_deck_url(&self) -> String {
        format!("{}/new/", self.base_url)
    }

    fn shuffle_url(&self, deck_id: &str) -> String {
        format!("{}/{}/shuffle/", self.base_url, urlencoding::encode(deck_id))
    }

    fn draw_url(&self, deck_id: &str) -> String {
        format!(
            "{}/{}/draw/?count=1",
            self.base_url,
            urlencoding::encode(deck_id)
        )
    }

    /// Check status and decode a JSON body.
    fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T, ServiceError> {
        if !response.is_success() {
            return Err(ServiceError::Status {
                operation,
                status: response.status,
            });
        }
        response
            .json()
            .map_err(|e| ServiceError::malformed(operation, e.to_string()))
    }
}

/// Reject counts outside a standard deck.
fn checked_remaining(operation: &'static str, remaining: u32) -> Result<u8, ServiceError> {
    u8::try_from(remaining)
        .ok()
        .filter(|r| *r <= FULL_DECK)
        .ok_or_else(|| {
            ServiceError::malformed(operation, format!("remaining out of range: {}", remaining))
        })
}

#[async_trait]
impl<C: HttpClient> DeckService for DeckApiClient<C> {
    async fn create_deck(&self) -> Result<NewDeck, ServiceError> {
        const OP: &str = "create_deck";
        let response = self
            .http
            .post(&self.new_deck_url(), "", &Headers::new())
            .await
            .map_err(|e| ServiceError::from_http(OP, e))?;

        let payload: DeckPayload = Self::decode(OP, response)?;
        if !payload.success {
            return Err(ServiceError::malformed(OP, "service reported success: false"));
        }
        if payload.deck_id.is_empty() {
            return Err(ServiceError::malformed(OP, "empty deck_id"));
        }

        Ok(NewDeck {
            id: payload.deck_id,
            remaining: checked_remaining(OP, payload.remaining)?,
        })
    }

    async fn shuffle(&self, deck_id: &str) -> Result<ShuffleAck, ServiceError> {
        const OP: &str = "shuffle";
        let response = self
            .http
            .post(&self.shuffle_url(deck_id), "", &Headers::new())
            .await
            .map_err(|e| ServiceError::from_http(OP, e))?;

        let payload: ShufflePayload = Self::decode(OP, response)?;
        if !payload.success {
            return Err(ServiceError::malformed(OP, "service reported success: false"));
        }

        let remaining = match payload.remaining {
            Some(r) => Some(checked_remaining(OP, r)?),
            None => None,
        };
        Ok(ShuffleAck { remaining })
    }

    async fn draw_one(&self, deck_id: &str) -> Result<DrawnCard, ServiceError> {
        const OP: &str = "draw";
        let response = self
            .http
            .get(&self.draw_url(deck_id), &Headers::new())
            .await
            .map_err(|e| ServiceError::from_http(OP, e))?;

        let payload: DrawPayload = Self::decode(OP, response)?;
        if !payload.success && payload.remaining == 0 && payload.cards.is_empty() {
            return Err(ServiceError::Exhausted { operation: OP });
        }
        if !payload.success {
            return Err(ServiceError::malformed(OP, "service reported success: false"));
        }

        let remaining = checked_remaining(OP, payload.remaining)?;
        let card = payload
            .cards
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::malformed(OP, "no card in response"))?;

        Ok(DrawnCard {
            remaining,
            card: Card::new(card.suit, card.value, card.image),
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Bytes, ServiceError> {
        const OP: &str = "fetch_image";
        let response = self
            .http
            .get(url, &Headers::new())
            .await
            .map_err(|e| ServiceError::from_http(OP, e))?;

        if !response.is_success() {
            return Err(ServiceError::Status {
                operation: OP,
                status: response.status,
            });
        }
        if response.body.is_empty() {
            return Err(ServiceError::malformed(OP, "empty image body"));
        }
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::http::MockResponse;
    use crate::adapters::mock::MockHttpClient;
    use crate::traits::HttpError;

    const BASE: &str = "https://cards.test/api/deck";

    fn client_with(url: &str, status: u16, body: &str) -> DeckApiClient<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(body.to_string()))),
        );
        DeckApiClient::new(http).with_base_url(BASE)
    }

    #[test]
    fn test_urls() {
        let client = DeckApiClient::new(MockHttpClient::new()).with_base_url("https://x/api/deck/");
        assert_eq!(client.base_url(), "https://x/api/deck");
        assert_eq!(client.new_deck_url(), "https://x/api/deck/new/");
        assert_eq!(client.shuffle_url("abc"), "https://x/api/deck/abc/shuffle/");
        assert_eq!(client.draw_url("abc"), "https://x/api/deck/abc/draw/?count=1");
    }

    #[test]
    fn test_default_base_url() {
        let client = DeckApiClient::new(MockHttpClient::new());
        assert_eq!(client.base_url(), DEFAULT_API_BASE_URL);
    }

    #[tokio::test]
    async fn test_create_deck_success() {
        let client = client_with(
            &format!("{}/new/", BASE),
            200,
            r#"{"success":true,"deck_id":"3p40paa87x90","shuffled":false,"remaining":52}"#,
        );

        let deck = client.create_deck().await.unwrap();
        assert_eq!(deck.id, "3p40paa87x90");
        assert_eq!(deck.remaining, 52);

        let requests = client.http().get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
    }

    #[tokio::test]
    async fn test_create_deck_missing_id_is_malformed() {
        let client = client_with(&format!("{}/new/", BASE), 200, r#"{"remaining":52}"#);
        let err = client.create_deck().await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_create_deck_mistyped_remaining_is_malformed() {
        let client = client_with(
            &format!("{}/new/", BASE),
            200,
            r#"{"deck_id":"abc","remaining":"52"}"#,
        );
        let err = client.create_deck().await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_shuffle_reports_remaining() {
        let client = client_with(
            &format!("{}/abc/shuffle/", BASE),
            200,
            r#"{"success":true,"deck_id":"abc","shuffled":true,"remaining":52}"#,
        );
        let ack = client.shuffle("abc").await.unwrap();
        assert_eq!(ack.remaining, Some(52));
    }

    #[tokio::test]
    async fn test_shuffle_without_remaining() {
        let client = client_with(&format!("{}/abc/shuffle/", BASE), 200, r#"{"success":true}"#);
        let ack = client.shuffle("abc").await.unwrap();
        assert_eq!(ack.remaining, None);
    }

    #[tokio::test]
    async fn test_shuffle_server_error_is_status() {
        let client = client_with(&format!("{}/abc/shuffle/", BASE), 500, "oops");
        let err = client.shuffle("abc").await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::Status {
                operation: "shuffle",
                status: 500
            }
        );
    }

    #[tokio::test]
    async fn test_draw_one_success() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"success":true,"deck_id":"abc","remaining":51,
                "cards":[{"code":"JS","image":"https://img/JS.png","value":"JACK","suit":"SPADES"}]}"#,
        );

        let drawn = client.draw_one("abc").await.unwrap();
        assert_eq!(drawn.remaining, 51);
        assert_eq!(drawn.card.value, "JACK");
        assert_eq!(drawn.card.suit, "SPADES");
        assert_eq!(drawn.card.image_url, "https://img/JS.png");
        assert!(!drawn.card.was_slapped);
    }

    #[tokio::test]
    async fn test_draw_one_empty_cards_is_malformed() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"success":true,"remaining":0,"cards":[]}"#,
        );
        let err = client.draw_one("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_draw_one_from_empty_deck_is_exhausted() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"success":false,"remaining":0,"cards":[],"error":"Not enough cards remaining"}"#,
        );
        let err = client.draw_one("abc").await.unwrap_err();
        assert_eq!(err, ServiceError::Exhausted { operation: "draw" });
    }

    #[tokio::test]
    async fn test_draw_one_success_false_with_cards_left_is_malformed() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"success":false,"remaining":12,"cards":[],"error":"Deck not found"}"#,
        );
        let err = client.draw_one("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_draw_one_remaining_out_of_range() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"remaining":300,"cards":[{"image":"x","value":"2","suit":"HEARTS"}]}"#,
        );
        let err = client.draw_one("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_draw_one_card_missing_image_is_malformed() {
        let client = client_with(
            &format!("{}/abc/draw/?count=1", BASE),
            200,
            r#"{"remaining":50,"cards":[{"value":"2","suit":"HEARTS"}]}"#,
        );
        let err = client.draw_one("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_transport_error_is_transport() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let client = DeckApiClient::new(http).with_base_url(BASE);

        let err = client.draw_one("abc").await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport { operation: "draw", .. }));
    }

    #[tokio::test]
    async fn test_fetch_image() {
        let client = client_with("https://img/JS.png", 200, "\u{89}PNG");
        let bytes = client.fetch_image("https://img/JS.png").await.unwrap();
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_image_not_found() {
        let client = client_with("https://img/ZZ.png", 404, "");
        let err = client.fetch_image("https://img/ZZ.png").await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 404, .. }));
    }
}
