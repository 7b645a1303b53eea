//! # File Route Handlers
//!
//! Storing document text and searching it. Documents are shared by the whole
//! deployment; only storing one requires a signed-in caller.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::{auth::middleware::CurrentUser, types::SearchParams};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use frameforge::{providers::db::storage::FileStore, FileMatch, FileRecord, GenerationError, NewFile};
use serde_json::json;
use tracing::info;

/// Handler for `POST /files`.
pub async fn upload_file_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewFile>,
) -> Result<(StatusCode, Json<FileRecord>), AppError> {
    let caller = user.id().ok_or(GenerationError::Unauthenticated)?;
    if payload.name.trim().is_empty() {
        return Err(GenerationError::InvalidInput("a file name is required".to_string()).into());
    }
    info!("User '{}' is storing file '{}'.", caller, payload.name);

    let record = app_state.sqlite_provider.save_file(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for `GET /files/search?query=`.
///
/// Returns at most as many matches as the generation flow would use as context.
pub async fn search_files_handler(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<FileMatch>>>, AppError> {
    let limit = app_state.config.file_context.max_documents;
    let matches = app_state
        .sqlite_provider
        .search_files(&params.query, limit)
        .await?;

    let debug_info = json!({ "query": params.query, "limit": limit });
    Ok(wrap_response(matches, debug_params, Some(debug_info)))
}
