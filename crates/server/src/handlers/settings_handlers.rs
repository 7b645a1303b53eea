//! # Settings Route Handlers
//!
//! What the settings page needs: token usage, whether the deployment holds a
//! key, and the model catalogue.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::{
    auth::middleware::CurrentUser,
    types::{ModelCatalog, ModelInfo, ServerKeyStatus},
};
use axum::{
    extract::{Query, State},
    Json,
};
use frameforge::UsageSummary;
use serde_json::json;

/// (id, name, description, speed, cost)
const MODELS: [(&str, &str, &str, &str, &str); 3] = [
    (
        "gemini-2.5-pro",
        "Gemini 2.5 Pro",
        "Most capable, complex reasoning.",
        "Moderate",
        "High",
    ),
    (
        "gemini-2.5-flash",
        "Gemini 2.5 Flash",
        "Fast responses, efficient processing.",
        "Fast",
        "Medium",
    ),
    (
        "gemma-3-12b-it",
        "Gemma 3 12B",
        "Lightweight, cost-effective option.",
        "Varies",
        "Low",
    ),
];

/// Handler for `GET /usage`: total tokens across the caller's generations.
pub async fn usage_handler(
    State(app_state): State<AppState>,
    user: CurrentUser,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<UsageSummary>>, AppError> {
    let summary = app_state.service.usage_summary(user.id()).await?;
    let debug_info = json!({ "caller": user.id() });
    Ok(wrap_response(summary, debug_params, Some(debug_info)))
}

/// Handler for `GET /config/server-key`. Never reveals the key itself.
pub async fn server_key_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<ServerKeyStatus>> {
    let status = ServerKeyStatus {
        is_set: app_state.service.is_server_key_set(),
    };
    wrap_response(status, debug_params, None)
}

/// Handler for `GET /models`.
pub async fn models_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<ModelCatalog>> {
    let models = MODELS
        .iter()
        .map(|(id, name, description, speed, cost)| ModelInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            speed: speed.to_string(),
            cost: cost.to_string(),
        })
        .collect();
    let catalog = ModelCatalog {
        default_model: app_state.config.gemini.default_model.clone(),
        models,
    };
    let debug_info = json!({ "api_base": app_state.config.gemini.api_base });
    wrap_response(catalog, debug_params, Some(debug_info))
}
