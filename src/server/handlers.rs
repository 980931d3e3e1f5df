//! API endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::extraction;
use crate::models::PageMapEntry;
use crate::pricing;

use super::AppState;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"ok": true}))
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    parsed_text: String,
    #[serde(default)]
    page_map: Vec<PageMapEntry>,
}

/// Extract candidate tasks from parsed document text.
pub async fn extract(State(state): State<AppState>, body: String) -> Response {
    let payload: ExtractRequest = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let tasks = extraction::extract_tasks(&payload.parsed_text, &payload.page_map, &state.rules);
    Json(serde_json::json!({"tasks": tasks})).into_response()
}

/// Resolve a unit price by scraping configured sources.
///
/// Always 200 for well-formed requests; pricing misses are carried in the
/// body as `{error}` rather than as transport failures.
pub async fn pricing_scrape(State(state): State<AppState>, body: String) -> Response {
    let request = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = pricing::resolve_price(&request, &state.settings.pricing_sources, &state.http).await;
    Json(result).into_response()
}

/// Fallback for unknown routes and methods.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Not found"})),
    )
        .into_response()
}

/// Parse a POST body, treating an empty body as an empty JSON object.
///
/// Bodies are read as strings and parsed here instead of through the Json
/// extractor so a malformed body surfaces as 500 `{error}`.
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Response> {
    let raw = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(raw).map_err(|error| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": error.to_string()})),
        )
            .into_response()
    })
}
