use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use perrymill_core::feed::FeedResult;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_CATEGORY: &str = "top-stories";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub has_key: bool,
    pub feeds: Vec<ConfigFeed>,
}

#[derive(Debug, Serialize)]
pub struct ConfigFeed {
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// GET /api/config - static configuration for the frontend
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let feeds = state
        .config
        .feeds
        .iter()
        .map(|feed| ConfigFeed {
            slug: feed.slug.clone(),
            name: feed.name.clone(),
            description: feed.description.clone(),
        })
        .collect();

    Json(ConfigResponse {
        has_key: state.narrator.is_some(),
        feeds,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedRequest {
    #[serde(default)]
    pub category: Option<String>,
    /// Number or numeric string; anything else counts as absent
    #[serde(default)]
    pub limit: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    #[serde(flatten)]
    pub feed: FeedResult,
    pub category: String,
    pub category_name: String,
    pub category_description: String,
}

/// POST /api/feed - fetch and normalize a curated category
pub async fn post_feed(
    State(state): State<AppState>,
    payload: Option<Json<FeedRequest>>,
) -> Result<Json<FeedResponse>, ApiError> {
    let payload = payload.map(|Json(body)| body).unwrap_or_default();

    let category = payload
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_lowercase();

    let feed_meta = state
        .config
        .find_feed(&category)
        .ok_or_else(|| ApiError::bad_request("Unknown feed category."))?
        .clone();

    let limit = parse_limit(payload.limit.as_ref());

    let feed = state
        .feed_service
        .fetch_feed(&feed_meta.url, limit)
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(Json(FeedResponse {
        feed,
        category,
        category_name: feed_meta.name,
        category_description: feed_meta.description,
    }))
}

/// Coerce the wire limit into something usable; unusable values are treated
/// as absent and fall back to the service cap.
fn parse_limit(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub feed: Option<FeedResult>,
}

/// POST /api/analyze - forward a normalized feed to the language model
pub async fn post_analyze(
    State(state): State<AppState>,
    payload: Option<Json<AnalyzeRequest>>,
) -> Result<Json<perrymill_core::ai::Narrative>, ApiError> {
    let narrator = state
        .narrator
        .as_ref()
        .ok_or_else(|| ApiError::internal("Server missing OpenAI API key."))?;

    let payload = payload.map(|Json(body)| body).unwrap_or_default();
    let feed = payload
        .feed
        .ok_or_else(|| ApiError::bad_request("Feed payload is required for analysis."))?;

    let narrative = narrator
        .narrate(&feed)
        .await
        .map_err(|e| ApiError::bad_gateway(e.to_string()))?;

    Ok(Json(narrative))
}
