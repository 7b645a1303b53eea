//! # Generation Orchestrator
//!
//! Runs one generation end to end: authenticate, optionally ground the prompt
//! in uploaded documents, build the prompt, resolve a credential, call the
//! model, account for tokens and persist the result. Also hosts the
//! caller-scoped read operations over stored generations.

use crate::{
    context::{retrieve_file_context, ContextPolicy},
    credentials::{is_server_key_set, resolve_api_key},
    errors::GenerationError,
    prompts::{build_prompt, PromptInputs},
    providers::{
        ai::{AiProviderFactory, UsageAccounting},
        db::storage::{FileStore, GenerationStore},
    },
    types::{
        Generation, GenerationOutcome, GenerationRequest, NewGeneration, TagPolicy, UsageSummary,
    },
};
use tracing::{debug, error, info};

/// Deployment-level knobs of the generation flow.
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    /// The key configured for the whole deployment, if any.
    pub deployment_api_key: Option<String>,
    pub context: ContextPolicy,
    pub accounting: UsageAccounting,
    pub tag_policy: TagPolicy,
}

/// The result of a successful [`GenerationService::generate`] call.
#[derive(Debug, Clone)]
pub struct Generated {
    pub generation: Generation,
    /// The exact prompt sent to the model.
    pub prompt: String,
    /// Whether document text made it into the prompt.
    pub used_file_context: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationService {
    files: Box<dyn FileStore>,
    generations: Box<dyn GenerationStore>,
    factory: Box<dyn AiProviderFactory>,
    settings: ServiceSettings,
}

impl GenerationService {
    pub fn new(
        files: Box<dyn FileStore>,
        generations: Box<dyn GenerationStore>,
        factory: Box<dyn AiProviderFactory>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            files,
            generations,
            factory,
            settings,
        }
    }

    /// Generates content for `request` on behalf of `caller` and stores it.
    ///
    /// Nothing is persisted unless every step succeeds.
    pub async fn generate(
        &self,
        caller: Option<&str>,
        request: GenerationRequest,
    ) -> Result<Generated, GenerationError> {
        let user_id = caller.ok_or(GenerationError::Unauthenticated)?;
        info!(
            user_id = %user_id,
            content_type = %request.content_type,
            philosophy = %request.philosophy,
            model = %request.model,
            "Starting generation."
        );

        self.settings
            .tag_policy
            .check(&request.content_type, &request.philosophy)?;

        let file_context = if request.philosophy.uses_file_context() {
            retrieve_file_context(self.files.as_ref(), &request.topic, &self.settings.context)
                .await?
        } else {
            None
        };

        let prompt = build_prompt(&PromptInputs {
            content_type: &request.content_type,
            topic: &request.topic,
            region: &request.region,
            philosophy: &request.philosophy,
            file_context: file_context.as_deref(),
            url: request.url.as_deref(),
        });
        debug!(prompt = %prompt, "Built prompt.");

        let api_key = resolve_api_key(
            self.settings.deployment_api_key.as_deref(),
            request.api_key.as_deref(),
        )?;
        let provider = self.factory.create(&api_key, &request.model)?;

        let completion = provider.generate(&prompt).await?;
        let usage = self
            .settings
            .accounting
            .resolve(provider.as_ref(), &prompt, &completion)
            .await?;

        let generation = self
            .generations
            .save(NewGeneration {
                user_id: user_id.to_string(),
                topic: request.topic,
                url: request.url,
                region: request.region,
                content_type: request.content_type,
                model: request.model,
                result_text: completion.text,
                philosophy: request.philosophy,
                usage,
            })
            .await?;

        info!(
            generation_id = %generation.id,
            total_tokens = generation.usage.total_tokens,
            "Generation completed."
        );

        Ok(Generated {
            generation,
            prompt,
            used_file_context: file_context.is_some(),
        })
    }

    /// Like [`generate`](Self::generate), but folds failures into the
    /// structured outcome shown to clients.
    pub async fn generate_outcome(
        &self,
        caller: Option<&str>,
        request: GenerationRequest,
    ) -> GenerationOutcome {
        match self.generate(caller, request).await {
            Ok(generated) => GenerationOutcome::succeeded(generated.generation.id),
            Err(e) => {
                error!(kind = ?e.kind(), "Generation failed: {e}");
                GenerationOutcome::failed(&e)
            }
        }
    }

    /// Fetches one generation. `None` unless `caller` owns it.
    pub async fn get_generation(
        &self,
        caller: Option<&str>,
        generation_id: &str,
    ) -> Result<Option<Generation>, GenerationError> {
        match caller {
            Some(caller) => self.generations.get_by_id(caller, generation_id).await,
            None => Ok(None),
        }
    }

    /// Lists the caller's generations. A blank query lists everything newest
    /// first; otherwise results are ranked by topic relevance.
    pub async fn search_generations(
        &self,
        caller: Option<&str>,
        query: &str,
    ) -> Result<Vec<Generation>, GenerationError> {
        match caller {
            Some(caller) => self.generations.search_by_topic(caller, query).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn usage_summary(
        &self,
        caller: Option<&str>,
    ) -> Result<UsageSummary, GenerationError> {
        let total_tokens = match caller {
            Some(caller) => self.generations.usage_total(caller).await?,
            None => 0,
        };
        Ok(UsageSummary { total_tokens })
    }

    pub fn is_server_key_set(&self) -> bool {
        is_server_key_set(self.settings.deployment_api_key.as_deref())
    }
}
