//! Animal routes: list, detail by slug, habitat sites

use crate::error::GatewayError;
use crate::routes::{LocaleQuery, list_envelope, map_store_error, require_locale};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use bluetrails_core::{SuccessEnvelope, validation};
use bluetrails_store::StoreError;
use tracing::warn;

/// Handle `GET /api/animals`: all animals with basic translated information
pub async fn list_animals(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;

    let fetched = state.store.list_animals(locale).await.map_err(|err| {
        warn!(%err, "animals list fetch failed");
        map_store_error(err, "Failed to fetch animals")
    })?;

    Ok(list_envelope("Animals", locale, fetched))
}

/// Handle `GET /api/animals/{slug}`: one animal's complete record
pub async fn get_animal_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;
    if !validation::is_valid_slug(&slug) {
        return Err(GatewayError::InvalidSlug);
    }

    match state.store.get_animal_by_slug(&slug, locale).await {
        Ok(fetched) => {
            let message = if fetched.fell_back_to_en {
                format!(
                    "Animal '{slug}' retrieved successfully (fallback to English, '{locale}' not available)"
                )
            } else {
                format!("Animal '{slug}' retrieved successfully")
            };
            Ok(Json(SuccessEnvelope::new(fetched.data, Some(message))))
        }
        Err(StoreError::NotFound) => Err(GatewayError::AnimalNotFound(slug)),
        Err(err) => {
            warn!(%err, slug, "animal fetch failed");
            Err(map_store_error(err, "Failed to fetch animal"))
        }
    }
}

/// Handle `GET /api/animals/{slug}/sites`: habitat sites for one animal
///
/// An empty list is a normal answer, not a 404; store failures pass through
/// as 502 with the upstream detail.
pub async fn list_animal_sites(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;
    if !validation::is_valid_slug(&slug) {
        return Err(GatewayError::InvalidSlug);
    }

    let fetched = state
        .store
        .list_animal_sites(&slug, locale)
        .await
        .map_err(|err| {
            warn!(%err, slug, "habitat sites fetch failed");
            match err {
                StoreError::Upstream {
                    status_code,
                    message,
                } => GatewayError::Supabase(format!("upstream status {status_code}: {message}")),
                other => GatewayError::Supabase(other.to_string()),
            }
        })?;

    Ok(list_envelope("Habitat sites", locale, fetched))
}
