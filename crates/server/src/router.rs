use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/generations",
            post(handlers::create_generation_handler).get(handlers::search_generations_handler),
        )
        .route("/generations/{id}", get(handlers::get_generation_handler))
        .route("/usage", get(handlers::usage_handler))
        .route("/config/server-key", get(handlers::server_key_handler))
        .route("/models", get(handlers::models_handler))
        .route("/files", post(handlers::upload_file_handler))
        .route("/files/search", get(handlers::search_files_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
