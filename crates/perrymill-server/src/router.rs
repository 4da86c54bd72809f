use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(handlers::get_config))
        .route("/api/feed", post(handlers::post_feed))
        .route("/api/analyze", post(handlers::post_analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
