//! Error types for store egress

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure talking to the store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A single-row fetch matched zero rows (PostgREST `PGRST116`)
    #[error("no rows returned")]
    NotFound,

    /// The store answered with a non-success status
    #[error("Store error {status_code}: {message}")]
    Upstream { status_code: u16, message: String },

    /// The store answered 2xx but the body was not what we expected
    #[error("Failed to parse store response: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
