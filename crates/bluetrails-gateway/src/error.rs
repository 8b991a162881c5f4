//! Gateway error taxonomy
//!
//! Every failure answers with the same `{error: {message, code, status}}`
//! envelope so clients can branch on `error.code` uniformly.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bluetrails_core::ErrorEnvelope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// `locale` outside the recognized set
    #[error("Invalid locale. Supported locales: en, id, hi, zh")]
    InvalidLocale,

    /// Slug failed the pattern or length check
    #[error("Invalid slug format. Use lowercase letters, numbers, and hyphens only.")]
    InvalidSlug,

    /// A required query parameter was absent
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Date parameter not in `YYYY-MM-DD` form
    #[error("Invalid date format. Expected YYYY-MM-DD")]
    InvalidDateFormat,

    /// Single-animal fetch matched zero rows in every attempted locale
    #[error("Animal with slug '{0}' not found")]
    AnimalNotFound(String),

    /// EPA prediction fetch matched zero rows
    #[error("No prediction data found for site '{site_id}' on date '{date}'")]
    PredictionNotFound { site_id: String, date: String },

    /// No route matched the request
    #[error("Endpoint not found")]
    RouteNotFound,

    /// Store-level failure; the message is route context, not the raw error
    #[error("{0}")]
    Database(String),

    /// Upstream failure passed through for the habitats route
    #[error("Supabase error: {0}")]
    Supabase(String),

    /// Unexpected failure inside a lookup; the underlying message is kept
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// The stable error code clients branch on
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::InvalidLocale => "INVALID_LOCALE",
            GatewayError::InvalidSlug => "INVALID_SLUG",
            GatewayError::MissingParameter(_) => "MISSING_PARAMETER",
            GatewayError::InvalidDateFormat => "INVALID_DATE_FORMAT",
            GatewayError::AnimalNotFound(_) => "ANIMAL_NOT_FOUND",
            GatewayError::PredictionNotFound { .. } => "PREDICTION_NOT_FOUND",
            GatewayError::RouteNotFound => "NOT_FOUND",
            GatewayError::Database(_) => "DATABASE_ERROR",
            GatewayError::Supabase(_) => "SUPABASE_ERROR",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The HTTP status paired with the code
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidLocale
            | GatewayError::InvalidSlug
            | GatewayError::MissingParameter(_)
            | GatewayError::InvalidDateFormat => StatusCode::BAD_REQUEST,
            GatewayError::AnimalNotFound(_)
            | GatewayError::PredictionNotFound { .. }
            | GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::Supabase(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Database(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = ErrorEnvelope::new(self.to_string(), self.code(), status.as_u16());
        (status, Json(envelope)).into_response()
    }
}
