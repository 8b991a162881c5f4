//! Route handlers and router assembly
//!
//! Each request is a single-pass pipeline: validate parameters, invoke one
//! lookup, map the outcome to an envelope. No state survives the request.

pub mod animals;
pub mod epa;
pub mod health;
pub mod locales;
pub mod quiz;
pub mod speeches;

use crate::cors::cors_middleware;
use crate::error::GatewayError;
use crate::state::AppState;
use axum::routing::get;
use axum::{Json, Router, middleware};
use bluetrails_core::{Locale, SuccessEnvelope};
use bluetrails_store::{Fetched, StoreError};
use serde::Deserialize;

/// The `locale` query parameter, shared by every translated route
#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// Build the full API router
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/animals", get(animals::list_animals))
        .route("/api/animals/{slug}", get(animals::get_animal_by_slug))
        .route("/api/animals/{slug}/sites", get(animals::list_animal_sites))
        .route("/api/speeches", get(speeches::list_speeches))
        .route("/api/quiz/questions", get(quiz::list_questions))
        .route("/api/quiz/categories", get(quiz::list_categories))
        .route("/api/locales", get(locales::list_locales))
        .route("/api/epa/prediction", get(epa::get_prediction))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors_middleware,
        ))
        .with_state(state)
}

async fn not_found() -> GatewayError {
    GatewayError::RouteNotFound
}

/// Resolve the requested locale, defaulting to English
pub(crate) fn require_locale(params: &LocaleQuery) -> Result<Locale, GatewayError> {
    match params.locale.as_deref() {
        None => Ok(Locale::default()),
        Some(code) => Locale::parse(code).ok_or(GatewayError::InvalidLocale),
    }
}

/// Success message noting the locale served, and the English fallback when
/// it happened
pub(crate) fn retrieval_message(noun: &str, locale: Locale, fell_back: bool) -> String {
    if fell_back {
        format!("{noun} retrieved successfully (fallback to English, '{locale}' not available)")
    } else {
        format!("{noun} retrieved successfully for locale: {locale}")
    }
}

/// Wrap a fetched list in the success envelope
pub(crate) fn list_envelope(
    noun: &str,
    locale: Locale,
    fetched: Fetched<Vec<serde_json::Value>>,
) -> Json<SuccessEnvelope> {
    let message = retrieval_message(noun, locale, fetched.fell_back_to_en);
    Json(SuccessEnvelope::new(
        serde_json::Value::Array(fetched.data),
        Some(message),
    ))
}

/// Map a store failure on a list route: parse surprises become
/// `INTERNAL_ERROR`, everything else the route's `DATABASE_ERROR` context
pub(crate) fn map_store_error(err: StoreError, context: &'static str) -> GatewayError {
    match err {
        StoreError::Parse(message) => GatewayError::Internal(message),
        _ => GatewayError::Database(context.to_string()),
    }
}
