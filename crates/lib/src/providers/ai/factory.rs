//! # AI Provider Factory
//!
//! Generation calls pick their model and credential per request, so providers
//! are created on demand rather than once at startup. The factory is a trait
//! so tests can hand out scripted providers instead.

use crate::{
    errors::GenerationError,
    providers::ai::{
        gemini::{GeminiProvider, DEFAULT_GEMINI_API_BASE},
        AiProvider,
    },
};
use dyn_clone::DynClone;
use std::fmt::Debug;
use tracing::info;

pub trait AiProviderFactory: Send + Sync + Debug + DynClone {
    /// Creates a provider that calls `model` with `api_key`.
    fn create(&self, api_key: &str, model: &str) -> Result<Box<dyn AiProvider>, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProviderFactory);

/// Creates [`GeminiProvider`]s against a fixed API base URL.
#[derive(Debug, Clone)]
pub struct GeminiProviderFactory {
    pub api_base: String,
}

impl GeminiProviderFactory {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl Default for GeminiProviderFactory {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_API_BASE)
    }
}

impl AiProviderFactory for GeminiProviderFactory {
    fn create(&self, api_key: &str, model: &str) -> Result<Box<dyn AiProvider>, GenerationError> {
        if model.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "a model name is required".to_string(),
            ));
        }
        info!("Configuring Gemini provider for model: '{}'", model);
        Ok(Box::new(GeminiProvider::new(
            self.api_base.clone(),
            api_key.to_string(),
            model.to_string(),
        )?))
    }
}
