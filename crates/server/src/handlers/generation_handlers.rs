//! # Generation Route Handlers
//!
//! Creating generations and reading back the caller's history.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::{auth::middleware::CurrentUser, errors::status_for, types::SearchParams};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use frameforge::{Generation, GenerationOutcome, GenerationRequest};
use serde_json::json;
use tracing::info;

/// Handler for `POST /generations`.
///
/// Always answers with a `GenerationOutcome`; the status code mirrors the
/// failure kind so clients that only look at the status still see it.
pub async fn create_generation_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(mut payload): Json<GenerationRequest>,
) -> (StatusCode, Json<GenerationOutcome>) {
    if payload.model.trim().is_empty() {
        payload.model = app_state.config.gemini.default_model.clone();
    }
    info!(
        "Received generation request for topic '{}' with model '{}'.",
        payload.topic, payload.model
    );

    let outcome = app_state.service.generate_outcome(user.id(), payload).await;
    let status = outcome.kind.map(status_for).unwrap_or(StatusCode::OK);
    (status, Json(outcome))
}

/// Handler for `GET /generations?query=`.
///
/// A blank query lists the caller's history newest first; anything else is a
/// relevance-ranked topic search. Anonymous callers get an empty list.
pub async fn search_generations_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<SearchParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<Generation>>>, AppError> {
    let generations = app_state
        .service
        .search_generations(user.id(), &params.query)
        .await?;

    let mode = if params.query.trim().is_empty() {
        "list"
    } else {
        "search"
    };
    let debug_info = json!({
        "caller": user.id(),
        "query": params.query,
        "mode": mode,
        "count": generations.len(),
    });
    Ok(wrap_response(generations, debug_params, Some(debug_info)))
}

/// Handler for `GET /generations/{id}`.
///
/// Answers with `null` when the record does not exist or belongs to someone else.
pub async fn get_generation_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Path(generation_id): Path<String>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Option<Generation>>>, AppError> {
    let generation = app_state
        .service
        .get_generation(user.id(), &generation_id)
        .await?;

    let debug_info = json!({
        "caller": user.id(),
        "generation_id": generation_id,
        "found": generation.is_some(),
    });
    Ok(wrap_response(generation, debug_params, Some(debug_info)))
}
