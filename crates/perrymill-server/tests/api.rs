//! API surface tests against the in-process router. Nothing here touches
//! the network: the feed endpoint is only exercised for validation paths and
//! the narrator is stubbed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use perrymill::router::create_router;
use perrymill::state::AppState;
use perrymill_core::ai::{Narrative, NarrativeProvider, NarrativeUsage};
use perrymill_core::feed::FeedResult;
use perrymill_core::{AppConfig, Result};

struct StubNarrator;

#[async_trait::async_trait]
impl NarrativeProvider for StubNarrator {
    async fn narrate(&self, feed: &FeedResult) -> Result<Narrative> {
        Ok(Narrative {
            narrative: format!("Digest of {}", feed.feed_title),
            usage: NarrativeUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            },
        })
    }
}

fn state_without_key() -> AppState {
    AppState::new(AppConfig::default()).unwrap()
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn config_reports_key_state_and_curated_feeds() {
    let request = Request::builder()
        .uri("/api/config")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(state_without_key(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasKey"], json!(false));

    let feeds = body["feeds"].as_array().unwrap();
    assert_eq!(feeds.len(), 3);
    assert_eq!(feeds[0]["slug"], "top-stories");
    assert_eq!(feeds[0]["name"], "Front Page");
    assert!(feeds[0]["description"].is_string());
}

#[tokio::test]
async fn config_reports_key_when_narrator_available() {
    let state = state_without_key().with_narrator(Arc::new(StubNarrator));
    let request = Request::builder()
        .uri("/api/config")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasKey"], json!(true));
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let request = post_json("/api/feed", json!({ "category": "gossip" }));
    let (status, body) = send(state_without_key(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown feed category.");
}

#[tokio::test]
async fn analyze_without_key_is_a_server_error() {
    let request = post_json("/api/analyze", json!({ "feed": null }));
    let (status, body) = send(state_without_key(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server missing OpenAI API key.");
}

#[tokio::test]
async fn analyze_requires_a_feed_payload() {
    let state = state_without_key().with_narrator(Arc::new(StubNarrator));
    let request = post_json("/api/analyze", json!({}));
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Feed payload is required for analysis.");
}

#[tokio::test]
async fn analyze_rejects_malformed_feed_payload() {
    let state = state_without_key().with_narrator(Arc::new(StubNarrator));
    let request = post_json("/api/analyze", json!({ "feed": "not an object" }));
    let (status, _body) = send(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_returns_narrative_and_usage() {
    let state = state_without_key().with_narrator(Arc::new(StubNarrator));
    let request = post_json(
        "/api/analyze",
        json!({
            "feed": {
                "feedTitle": "Sample Feed",
                "feedLink": "https://example.com/feed",
                "entries": [{
                    "title": "Breaking Story",
                    "summary": "Summary content .",
                    "link": "https://example.com/story",
                    "published": "2024-07-04T10:30:00",
                    "source": "Example Source",
                    "subtitle": "Summary content .",
                    "image": null
                }]
            }
        }),
    );
    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["narrative"], "Digest of Sample Feed");
    assert_eq!(body["usage"]["total_tokens"], 30);
}
