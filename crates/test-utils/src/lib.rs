use anyhow::Result;
use frameforge::{
    errors::GenerationError,
    providers::{
        ai::{AiProvider, AiProviderFactory, Completion},
        db::sqlite::SqliteProvider,
    },
    types::{ContentType, GenerationRequest, NewGeneration, Philosophy, Usage},
};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use turso::Database;

// --- Test Setup ---

/// A helper struct to manage database creation for each test.
pub struct TestSetup {
    pub provider: SqliteProvider,
    pub db: Database,
}

impl TestSetup {
    /// Creates a new, isolated in-memory database and initializes the schema.
    pub async fn new() -> Result<Self> {
        let provider = SqliteProvider::new(":memory:").await?;
        provider.initialize_schema().await?;
        let db = provider.db.clone();
        Ok(Self { provider, db })
    }
}

// --- Mock AI Provider ---

/// What the mock answers with on `generate`.
#[derive(Clone, Debug)]
enum Scripted {
    Text(String, Option<Usage>),
    Failure(String),
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    script: Arc<Mutex<Scripted>>,
    token_count: Arc<Mutex<u64>>,
    prompts: Arc<Mutex<Vec<String>>>,
    counted: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Scripted::Text(
                "Mock generated content.".to_string(),
                None,
            ))),
            token_count: Arc::new(Mutex::new(42)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            counted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `generate` call returns `text` with no usage metadata.
    pub fn respond_with(&self, text: &str) -> &Self {
        *self.script.lock().unwrap() = Scripted::Text(text.to_string(), None);
        self
    }

    /// Every `generate` call returns `text` along with `usage` metadata.
    pub fn respond_with_usage(&self, text: &str, usage: Usage) -> &Self {
        *self.script.lock().unwrap() = Scripted::Text(text.to_string(), Some(usage));
        self
    }

    /// Every `generate` call fails with an API error carrying `message`.
    pub fn fail_with(&self, message: &str) -> &Self {
        *self.script.lock().unwrap() = Scripted::Failure(message.to_string());
        self
    }

    /// The value returned from `count_tokens`.
    pub fn count_tokens_as(&self, tokens: u64) -> &Self {
        *self.token_count.lock().unwrap() = tokens;
        self
    }

    /// Prompts passed to `generate`, in call order.
    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Prompts passed to `count_tokens`, in call order.
    pub fn get_counted(&self) -> Vec<String> {
        self.counted.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<Completion, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().clone() {
            Scripted::Text(text, usage) => Ok(Completion { text, usage }),
            Scripted::Failure(message) => Err(GenerationError::AiApi(message)),
        }
    }

    async fn count_tokens(&self, prompt: &str) -> Result<u64, GenerationError> {
        self.counted.lock().unwrap().push(prompt.to_string());
        Ok(*self.token_count.lock().unwrap())
    }
}

// --- Mock Provider Factory ---

/// Hands out clones of one `MockAiProvider` and records every request for a
/// provider as `(api_key, model)`.
#[derive(Clone, Debug, Default)]
pub struct MockProviderFactory {
    pub provider: MockAiProvider,
    invocations: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProviderFactory {
    pub fn new(provider: MockAiProvider) -> Self {
        Self {
            provider,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_invocations(&self) -> Vec<(String, String)> {
        self.invocations.lock().unwrap().clone()
    }
}

impl AiProviderFactory for MockProviderFactory {
    fn create(&self, api_key: &str, model: &str) -> Result<Box<dyn AiProvider>, GenerationError> {
        self.invocations
            .lock()
            .unwrap()
            .push((api_key.to_string(), model.to_string()));
        Ok(Box::new(self.provider.clone()))
    }
}

// --- Fixtures ---

/// A valid request with no key and no URL.
pub fn sample_request(
    topic: &str,
    content_type: ContentType,
    philosophy: Philosophy,
) -> GenerationRequest {
    GenerationRequest {
        api_key: None,
        model: "gemini-2.5-flash".to_string(),
        topic: topic.to_string(),
        url: None,
        region: "USA".to_string(),
        content_type,
        philosophy,
    }
}

/// A record ready to be saved for `user_id`, using `total_tokens` for both counts.
pub fn new_generation(user_id: &str, topic: &str, total_tokens: u64) -> NewGeneration {
    NewGeneration {
        user_id: user_id.to_string(),
        topic: topic.to_string(),
        url: None,
        region: "USA".to_string(),
        content_type: ContentType::ShortDailyBlogPost,
        model: "gemini-2.5-flash".to_string(),
        result_text: format!("An article about {topic}."),
        philosophy: Philosophy::Godin,
        usage: Usage {
            prompt_tokens: total_tokens,
            total_tokens,
        },
    }
}
