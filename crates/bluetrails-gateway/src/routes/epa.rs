//! EPA water-quality prediction route
//!
//! The prediction is keyed by site and date and has no locale dimension, so
//! no fallback applies.

use crate::error::GatewayError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use bluetrails_core::{SuccessEnvelope, validation};
use bluetrails_store::StoreError;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub site_id: Option<String>,
    pub date: Option<String>,
}

/// Handle `GET /api/epa/prediction`: prediction for one site and date
pub async fn get_prediction(
    State(state): State<AppState>,
    Query(params): Query<PredictionQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let site_id = params
        .site_id
        .as_deref()
        .ok_or(GatewayError::MissingParameter("site_id"))?;
    let date = params
        .date
        .as_deref()
        .ok_or(GatewayError::MissingParameter("date"))?;

    // Format only; an impossible calendar date simply finds no rows.
    if !validation::is_valid_date(date) {
        return Err(GatewayError::InvalidDateFormat);
    }

    match state.store.get_epa_prediction(site_id, date).await {
        Ok(prediction) => {
            let message =
                format!("EPA prediction data retrieved successfully for site '{site_id}' on {date}");
            Ok(Json(SuccessEnvelope::new(prediction, Some(message))))
        }
        Err(StoreError::NotFound) => Err(GatewayError::PredictionNotFound {
            site_id: site_id.to_string(),
            date: date.to_string(),
        }),
        Err(StoreError::Parse(message)) => Err(GatewayError::Internal(message)),
        Err(err) => {
            warn!(%err, site_id, date, "EPA prediction fetch failed");
            Err(GatewayError::Database(
                "Failed to fetch EPA prediction data".to_string(),
            ))
        }
    }
}
