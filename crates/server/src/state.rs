//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration, the
//! database provider and the generation service shared by all request handlers.

use crate::config::AppConfig;
use frameforge::{
    providers::{
        ai::{AiProviderFactory, GeminiProviderFactory},
        db::sqlite::SqliteProvider,
    },
    GenerationService, ServiceSettings,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The database provider backing users, files and generations.
    pub sqlite_provider: Arc<SqliteProvider>,
    /// Runs generations and the caller-scoped reads over them.
    pub service: Arc<GenerationService>,
}

/// Builds the shared application state from the configuration, calling the
/// Gemini API configured in `config.gemini`.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let factory = GeminiProviderFactory::new(config.gemini.api_base.clone());
    build_app_state_with_factory(config, Box::new(factory)).await
}

/// Builds the shared application state with a caller-supplied provider factory.
pub async fn build_app_state_with_factory(
    config: AppConfig,
    factory: Box<dyn AiProviderFactory>,
) -> anyhow::Result<AppState> {
    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    sqlite_provider.initialize_schema().await?;

    let settings = ServiceSettings {
        deployment_api_key: config.deployment_api_key.clone(),
        context: config.file_context,
        accounting: config.usage_accounting,
        tag_policy: config.tag_policy,
    };
    info!(
        server_key_set = settings.deployment_api_key.is_some(),
        accounting = ?settings.accounting,
        tag_policy = ?settings.tag_policy,
        "Generation service configured."
    );

    let service = GenerationService::new(
        Box::new(sqlite_provider.clone()),
        Box::new(sqlite_provider.clone()),
        factory,
        settings,
    );

    Ok(AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        service: Arc::new(service),
    })
}
