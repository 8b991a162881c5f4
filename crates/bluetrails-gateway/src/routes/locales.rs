//! Available-locales route

use crate::error::GatewayError;
use crate::routes::map_store_error;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use bluetrails_core::SuccessEnvelope;
use tracing::warn;

/// Handle `GET /api/locales`: locale codes present in the animal table
pub async fn list_locales(
    State(state): State<AppState>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let rows = state.store.list_available_locales().await.map_err(|err| {
        warn!(%err, "available locales fetch failed");
        map_store_error(err, "Failed to fetch available locales")
    })?;

    Ok(Json(SuccessEnvelope::new(
        serde_json::Value::Array(rows),
        Some("Available locales retrieved successfully".to_string()),
    )))
}
