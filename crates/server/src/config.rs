//! # Application Configuration
//!
//! This module defines the configuration structure for the `frameforge-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use frameforge::{
    providers::ai::gemini::DEFAULT_GEMINI_API_BASE, ContextPolicy, TagPolicy, UsageAccounting,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// The deployment-wide Gemini key. Falls back to `GEMINI_API_KEY`.
    #[serde(default)]
    pub deployment_api_key: Option<String>,
    #[serde(default)]
    pub file_context: ContextPolicy,
    #[serde(default)]
    pub usage_accounting: UsageAccounting,
    #[serde(default)]
    pub tag_policy: TagPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Base URL of the Generative Language API, without the `/models/...` suffix.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Used when a generation request leaves the model blank.
    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            default_model: default_model(),
        }
    }
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    9090
}
/// Provides a default value for the `db_url` field if not set in the environment.
fn default_db_url() -> String {
    "db/frameforge.db".to_string()
}

fn default_api_base() -> String {
    DEFAULT_GEMINI_API_BASE.to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest precedence first:
/// - Serde defaults on `AppConfig`.
/// - `config.yml` next to the crate manifest (or `config_path_override`),
///   with `${VAR}` placeholders substituted from the environment.
/// - Unprefixed environment variables for top-level keys like `PORT` and `DB_URL`.
/// - `FRAMEFORGE_...` variables for nested keys (e.g. `FRAMEFORGE_GEMINI__DEFAULT_MODEL`).
///
/// An explicit `config_path_override` that does not exist is an error; a
/// missing default `config.yml` is not.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let config_path = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            Some((path.to_string(), content))
        }
        None => {
            let default_path = format!("{base_path}/config.yml");
            read_and_substitute(&default_path)?.map(|content| (default_path, content))
        }
    };

    if let Some((path, content)) = config_path {
        info!("Loading configuration from '{path}'.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("FRAMEFORGE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The deployment key is a secret; read it explicitly rather than relying
    // on key mapping, and treat blank values as unset.
    if config.deployment_api_key.is_none() {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.deployment_api_key = Some(key);
        }
    }
    config.deployment_api_key = config
        .deployment_api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    Ok(config)
}
