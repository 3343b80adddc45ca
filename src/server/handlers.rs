//! Route handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Deserialize;
use serde_json::json;

use super::SharedState;

/// Body of `POST /chatgpt`
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// `GET /fetch-stars/{name}`
pub async fn fetch_stars(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match tokio::task::spawn_blocking(move || state.fetch_star_field(&name)).await {
        Ok(Some(value)) => (StatusCode::OK, Json(value)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No exoplanet data found"),
        Err(e) => {
            error!("Star field task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Star field query failed")
        }
    }
}

/// `POST /chatgpt`
///
/// A body that is not JSON, or that lacks a non-blank `message`, is a 400.
pub async fn chatgpt(
    State(state): State<SharedState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Response {
    let message = match body {
        Ok(Json(ChatBody {
            message: Some(message),
        })) if !message.trim().is_empty() => message,
        Ok(_) => return error_response(StatusCode::BAD_REQUEST, "No message provided"),
        Err(rejection) => {
            warn!("Rejected chat body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "No message provided");
        }
    };

    match tokio::task::spawn_blocking(move || state.chat.complete(&message)).await {
        Ok(Ok(reply)) => (StatusCode::OK, Json(json!({ "response": reply }))).into_response(),
        Ok(Err(e)) => {
            warn!("Chat completion failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "ChatGPT API request failed")
        }
        Err(e) => {
            error!("Chat task failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "ChatGPT API request failed")
        }
    }
}

/// `OPTIONS /chatgpt`, answered for CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
