use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::dictionary::LookupError;
use crate::error::ProxyError;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResult};

pub const MISSING_TEXT: &str = "Missing text for translation.";
pub const MISSING_WORD: &str = "Missing word parameter.";
pub const WORD_NOT_FOUND: &str = "Word meaning not found.";
pub const DICTIONARY_UNAVAILABLE: &str = "Dictionary service unavailable.";

pub fn create_routes(state: AppState) -> Router<AppState> {
    let static_dir = PathBuf::from(&state.config.server.static_dir);

    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // Proxy endpoints
        .route("/translate", post(translate))
        .route("/meaning", get(missing_word))
        .route("/meaning/", get(missing_word))
        .route("/meaning/:word", get(meaning))

        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))

        // Static file serving
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
}

/// Full application with middleware, ready to serve.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResult>, ProxyError> {
    let text = match payload {
        Ok(Json(TranslationRequest { text })) if !text.trim().is_empty() => text,
        Ok(_) => return Err(ProxyError::BadRequest(MISSING_TEXT.to_string())),
        Err(rejection) => {
            warn!("Rejected translate body: {}", rejection);
            return Err(ProxyError::BadRequest(MISSING_TEXT.to_string()));
        }
    };

    let translated_text = state.translator.translate(&text).await?;
    Ok(Json(TranslationResult { translated_text }))
}

async fn missing_word() -> ProxyError {
    ProxyError::BadRequest(MISSING_WORD.to_string())
}

async fn meaning(
    State(state): State<AppState>,
    word: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ProxyError> {
    let word = match word {
        Ok(Path(word)) => word,
        Err(rejection) => {
            warn!("Rejected word parameter: {}", rejection);
            return Err(ProxyError::BadRequest(MISSING_WORD.to_string()));
        }
    };
    if word.trim().is_empty() {
        return Err(ProxyError::BadRequest(MISSING_WORD.to_string()));
    }

    match state.dictionary.lookup(&word).await {
        Ok(payload) => Ok(Json(payload)),
        Err(LookupError::NotFound(_)) => Err(ProxyError::NotFound(WORD_NOT_FOUND.to_string())),
        Err(e) => {
            error!("Dictionary API error: {}", e);
            Err(ProxyError::ServiceUnavailable(DICTIONARY_UNAVAILABLE.to_string()))
        }
    }
}
