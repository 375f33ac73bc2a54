use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use watchtime_core::{ProviderStatus, TrackerError};
use watchtime_config::ClientConfig;
use watchtime_models::{MovieRecord, WatchEntry, WatchStats};

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub order: Option<String>,
}

/// Clients send ids as strings, but a bare number is tolerated
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MovieIdInput {
    Text(String),
    Number(i64),
}

impl MovieIdInput {
    fn into_string(self) -> String {
        match self {
            MovieIdInput::Text(s) => s,
            MovieIdInput::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddWatchedRequest {
    pub movie_id: MovieIdInput,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "WatchTime API" }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MovieRecord>>, ApiError> {
    let query = params.q.unwrap_or_default();
    let results = state.tracker.search(&query).await?;
    Ok(Json(results))
}

pub async fn add_watched(
    State(state): State<AppState>,
    payload: Result<Json<AddWatchedRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| TrackerError::InvalidInput(rejection.body_text()))?;
    let movie = state.tracker.add(&request.movie_id.into_string()).await?;
    Ok(Json(json!({ "success": true, "movie": movie })))
}

pub async fn list_watched(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<WatchEntry>>, ApiError> {
    let entries = match params.order.as_deref() {
        None | Some("added") => state.tracker.list().await,
        Some("recent") => state.tracker.list_recent().await,
        Some(other) => {
            return Err(TrackerError::InvalidInput(format!(
                "Unknown order '{}', expected 'added' or 'recent'",
                other
            ))
            .into())
        }
    };
    Ok(Json(entries))
}

pub async fn remove_watched(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.tracker.remove(&movie_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn clear_watched(State(state): State<AppState>) -> Json<Value> {
    let removed = state.tracker.clear().await;
    Json(json!({ "success": true, "removed": removed }))
}

pub async fn stats(State(state): State<AppState>) -> Json<WatchStats> {
    Json(state.tracker.stats().await)
}

pub async fn provider_status(State(state): State<AppState>) -> Json<ProviderStatus> {
    Json(state.tracker.provider_status().await)
}

pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client.clone())
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "kind": "not_found",
                "message": format!("No route for {}", uri.path()),
            }
        })),
    )
}
