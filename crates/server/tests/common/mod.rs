//! # Common Test Utilities
//!
//! This module centralizes test harnesses and helper functions used across the
//! `frameforge-server` integration tests. It includes:
//!
//! - `TestApp`: A full application harness that spawns a real server on a random port,
//!   with the Gemini API replaced by an `httpmock::MockServer`.
//! - Helpers for minting JWTs and mocking the Gemini endpoints.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use frameforge_server::{
    auth::middleware::Claims,
    config, router,
    state::{build_app_state, AppState},
};
use httpmock::{Method, Mock, MockServer};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use serde_json::json;
use std::{
    fs::File,
    io::Write,
    net::SocketAddr,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tempfile::{tempdir, NamedTempFile, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

pub const SERVER_KEY: &str = "test-server-key";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
///
/// This struct spawns the server on a random available port, sets up a temporary
/// SQLite database, and points the Gemini provider factory at an
/// `httpmock::MockServer` instance.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub db_path: PathBuf,
    pub app_state: AppState,
    _db_file: NamedTempFile,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application with a deployment key configured.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_server_key(Some(SERVER_KEY)).await
    }

    /// Spawns the application with the given deployment key (or none).
    pub async fn spawn_with_server_key(server_key: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let db_path = db_file.path().to_path_buf();

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
db_url: "{}"
gemini:
  api_base: "{}"
  default_model: "{DEFAULT_MODEL}"
file_context:
  max_documents: 5
  max_chars: 32000
"#,
            db_path.to_str().unwrap(),
            mock_server.base_url(),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let mut config = config::get_config(Some(config_path.to_str().unwrap()))?;
        // Pin what the environment could otherwise override.
        config.db_url = db_path.to_str().unwrap().to_string();
        config.gemini.api_base = mock_server.base_url();
        config.deployment_api_key = server_key.map(str::to_string);

        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            db_path,
            app_state: app_state_for_harness,
            _db_file: db_file,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Mocks `generateContent` for `model` to answer with `text`.
    pub fn mock_generate(&self, model: &str, text: &str) -> Mock {
        self.mock_server.mock(|when, then| {
            when.method(Method::POST)
                .path(format!("/models/{model}:generateContent"));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "candidates": [{ "content": { "parts": [{ "text": text }] } }]
                }));
        })
    }

    /// Mocks `countTokens` for `model` to report `tokens`.
    pub fn mock_count_tokens(&self, model: &str, tokens: u64) -> Mock {
        self.mock_server.mock(|when, then| {
            when.method(Method::POST)
                .path(format!("/models/{model}:countTokens"));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "totalTokens": tokens }));
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A generation request body for the HTTP API.
pub fn generation_payload(topic: &str, content_type: &str, philosophy: &str) -> serde_json::Value {
    json!({
        "model": DEFAULT_MODEL,
        "topic": topic,
        "region": "USA",
        "contentType": content_type,
        "philosophy": philosophy,
    })
}

/// The user id the server derives for a token subject.
pub fn user_id_for(sub: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, sub.as_bytes()).to_string()
}

/// Generates a valid JWT for a given user identifier (subject).
pub fn generate_jwt(sub: &str) -> Result<String> {
    generate_jwt_with_expiry(sub, 3600)
}

/// Generates a JWT for a given user identifier (subject) with a custom expiration.
/// A negative offset yields an already-expired token.
pub fn generate_jwt_with_expiry(sub: &str, expires_in_secs: i64) -> Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    let expiration = (now + expires_in_secs).max(0);
    let claims = Claims {
        sub: sub.to_string(),
        exp: expiration as usize,
        user_id: user_id_for(sub),
    };
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "a-secure-secret-key".to_string());
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}
