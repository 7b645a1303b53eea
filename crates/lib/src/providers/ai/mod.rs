pub mod factory;
pub mod gemini;

use crate::{errors::GenerationError, types::Usage};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use factory::{AiProviderFactory, GeminiProviderFactory};
pub use gemini::GeminiProvider;

/// The text produced for one prompt, plus whatever token accounting the
/// provider reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<Usage>,
}

/// A trait for interacting with a text generation API.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends one prompt and returns the generated text.
    async fn generate(&self, prompt: &str) -> Result<Completion, GenerationError>;

    /// Counts the tokens the API attributes to `prompt`.
    async fn count_tokens(&self, prompt: &str) -> Result<u64, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// How token usage is recorded on a generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAccounting {
    /// A second round-trip counts the prompt; prompt and total tokens both
    /// get that count.
    #[default]
    CountTokens,
    /// Use the usage metadata returned with the completion, counting the
    /// prompt only when none came back.
    ResponseMetadata,
}

impl UsageAccounting {
    pub async fn resolve(
        &self,
        provider: &dyn AiProvider,
        prompt: &str,
        completion: &Completion,
    ) -> Result<Usage, GenerationError> {
        if let (UsageAccounting::ResponseMetadata, Some(usage)) = (self, completion.usage) {
            return Ok(usage);
        }
        let counted = provider.count_tokens(prompt).await?;
        Ok(Usage {
            prompt_tokens: counted,
            total_tokens: counted,
        })
    }
}
