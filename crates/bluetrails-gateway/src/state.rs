//! Application state shared across handlers
//!
//! Holds the store handle and CORS configuration, constructed once at
//! startup and injected through axum's state. The store is behind the
//! [`ContentStore`] trait so tests can substitute a stub.

use crate::cors::CorsConfig;
use bluetrails_store::ContentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Read-only store handle, shared across requests
    pub store: Arc<dyn ContentStore>,

    /// CORS allow-list configuration
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, cors: CorsConfig) -> Self {
        Self { store, cors }
    }
}
