//! Home page speech route

use crate::error::GatewayError;
use crate::routes::{LocaleQuery, list_envelope, map_store_error, require_locale};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use bluetrails_core::SuccessEnvelope;
use tracing::warn;

/// Handle `GET /api/speeches`: home page speeches in speech order
pub async fn list_speeches(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;

    let fetched = state.store.list_home_speeches(locale).await.map_err(|err| {
        warn!(%err, "speeches fetch failed");
        map_store_error(err, "Failed to fetch speeches")
    })?;

    Ok(list_envelope("Speeches", locale, fetched))
}
