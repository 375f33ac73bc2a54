//! HTTP surface for the tracker.
//!
//! Every handler goes through one shared `Tracker`; failures are rendered by
//! [`error::ApiError`] so clients always get the same error body shape.

mod error;
mod handlers;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use watchtime_config::ClientConfig;
use watchtime_core::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
    pub client: ClientConfig,
}

impl AppState {
    pub fn new(tracker: Arc<Tracker>, client: ClientConfig) -> Self {
        Self { tracker, client }
    }
}

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/search", get(handlers::search))
        .route(
            "/api/watched",
            get(handlers::list_watched)
                .post(handlers::add_watched)
                .delete(handlers::clear_watched),
        )
        .route("/api/watched/:movie_id", delete(handlers::remove_watched))
        .route("/api/stats", get(handlers::stats))
        .route("/api/provider/status", get(handlers::provider_status))
        .route("/api/client-config", get(handlers::client_config))
        .fallback(handlers::not_found)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Browser UIs are served from their own origin; `"*"` in the list allows any
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
