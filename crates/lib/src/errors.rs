use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of a [`GenerationError`].
///
/// Callers (the HTTP layer in particular) branch on the kind rather than on
/// individual variants, so every failure in the generation flow lands in
/// exactly one of these buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No authenticated caller was supplied.
    Unauthenticated,
    /// The deployment is missing something it needs, e.g. an API key.
    Configuration,
    /// The request itself was rejected.
    InvalidInput,
    /// The generation API failed or returned something unusable.
    ExternalCall,
    /// The local store failed.
    Storage,
}

/// Custom error types for the generation flow.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("You must be logged in to generate content.")]
    Unauthenticated,
    #[error("Gemini API key is not configured. Add one in the settings page or set the GEMINI_API_KEY environment variable on the server.")]
    MissingApiKey,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned no text for the prompt")]
    EmptyCompletion,
    #[error("Storage provider connection error: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Unauthenticated => ErrorKind::Unauthenticated,
            GenerationError::MissingApiKey | GenerationError::ReqwestClientBuild(_) => {
                ErrorKind::Configuration
            }
            GenerationError::InvalidInput(_) => ErrorKind::InvalidInput,
            GenerationError::AiRequest(_)
            | GenerationError::AiApi(_)
            | GenerationError::AiDeserialization(_)
            | GenerationError::EmptyCompletion => ErrorKind::ExternalCall,
            GenerationError::StorageConnection(_)
            | GenerationError::StorageOperationFailed(_)
            | GenerationError::DataIntegrity(_)
            | GenerationError::JsonSerialization(_) => ErrorKind::Storage,
        }
    }
}

impl From<turso::Error> for GenerationError {
    fn from(err: turso::Error) -> Self {
        GenerationError::StorageOperationFailed(err.to_string())
    }
}
