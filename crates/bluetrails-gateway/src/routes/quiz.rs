//! Quiz routes: questions and question categories

use crate::error::GatewayError;
use crate::routes::{LocaleQuery, list_envelope, map_store_error, require_locale};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use bluetrails_core::SuccessEnvelope;
use tracing::warn;

/// Handle `GET /api/quiz/questions`: all quiz questions with options
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;

    let fetched = state.store.list_quiz_questions(locale).await.map_err(|err| {
        warn!(%err, "quiz questions fetch failed");
        map_store_error(err, "Failed to fetch quiz questions")
    })?;

    Ok(list_envelope("Quiz questions", locale, fetched))
}

/// Handle `GET /api/quiz/categories`: question categories by category code
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
) -> Result<Json<SuccessEnvelope>, GatewayError> {
    let locale = require_locale(&params)?;

    let fetched = state
        .store
        .list_question_categories(locale)
        .await
        .map_err(|err| {
            warn!(%err, "question categories fetch failed");
            map_store_error(err, "Failed to fetch question categories")
        })?;

    Ok(list_envelope("Question categories", locale, fetched))
}
