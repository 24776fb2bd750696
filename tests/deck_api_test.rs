//! Deck API client against a local HTTP server.

mod common;

use common::*;
use slapjack::adapters::{DeckApiClient, ReqwestHttpClient};
use slapjack::error::ServiceError;
use slapjack::traits::DeckService;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DeckApiClient<ReqwestHttpClient> {
    DeckApiClient::new(ReqwestHttpClient::with_timeout(Duration::from_secs(5)))
        .with_base_url(&format!("{}/api/deck/", server.uri()))
}

#[tokio::test]
async fn test_create_deck() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deck/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(new_deck_body("3p40paa87x90")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let deck = client.create_deck().await.unwrap();
    assert_eq!(deck.id, "3p40paa87x90");
    assert_eq!(deck.remaining, 52);
}

#[tokio::test]
async fn test_shuffle_reports_remaining() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deck/abc123/shuffle/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shuffle_body("abc123", 52)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ack = client.shuffle("abc123").await.unwrap();
    assert_eq!(ack.remaining, Some(52));
}

#[tokio::test]
async fn test_draw_one() {
    let server = MockServer::start().await;
    let image = format!("{}/static/img/JH.png", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/deck/abc123/draw/"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(draw_body(
            "abc123", "JACK", "HEARTS", &image, 47,
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let drawn = client.draw_one("abc123").await.unwrap();
    assert_eq!(drawn.remaining, 47);
    assert!(drawn.card.is_jack());
    assert_eq!(drawn.card.suit, "HEARTS");
    assert_eq!(drawn.card.image_url, image);
}

#[tokio::test]
async fn test_draw_from_empty_deck_is_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/deck/abc123/draw/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "deck_id": "abc123",
            "cards": [],
            "remaining": 0,
            "error": "Not enough cards remaining to draw 1 additional"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.draw_one("abc123").await.unwrap_err();
    assert_eq!(err, ServiceError::Exhausted { operation: "draw" });
}

#[tokio::test]
async fn test_unknown_deck_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deck/missing/shuffle/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.shuffle("missing").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Status {
            operation: "shuffle",
            status: 404
        }
    );
}

#[tokio::test]
async fn test_html_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deck/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create_deck().await.unwrap_err();
    assert!(matches!(err, ServiceError::Malformed { .. }));
}

#[tokio::test]
async fn test_fetch_image_bytes() {
    let server = MockServer::start().await;
    let png = b"\x89PNG\r\n\x1a\nrest".to_vec();
    Mock::given(method("GET"))
        .and(path("/static/img/AS.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bytes = client
        .fetch_image(&format!("{}/static/img/AS.png", server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), png.as_slice());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = DeckApiClient::new(ReqwestHttpClient::with_timeout(Duration::from_secs(2)))
        .with_base_url(&format!("http://127.0.0.1:{}/api/deck", port));
    let err = client.create_deck().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}

#[tokio::test]
async fn test_mock_http_config_drives_client() {
    let http = MockHttpConfig::new()
        .with_json(
            "https://cards.test/api/deck/new/",
            200,
            &new_deck_body("fromconfig"),
        )
        .build();
    let client = DeckApiClient::new(http).with_base_url("https://cards.test/api/deck");

    let deck = client.create_deck().await.unwrap();
    assert_eq!(deck.id, "fromconfig");
    assert_eq!(client.http().count_requests("/new/"), 1);
}
