//! # Frameforge
//!
//! Framing-aware content generation: builds prompts from a content type, a
//! framing philosophy and optional document context, sends them to a Gemini
//! model, and keeps a per-user history of the results with token usage.

pub mod access;
pub mod context;
pub mod credentials;
pub mod errors;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod search;
pub mod types;

pub use context::{retrieve_file_context, ContextPolicy, FILE_CONTEXT_SEPARATOR};
pub use errors::{ErrorKind, GenerationError};
pub use orchestrator::{Generated, GenerationService, ServiceSettings};
pub use providers::ai::{
    AiProvider, AiProviderFactory, Completion, GeminiProvider, GeminiProviderFactory,
    UsageAccounting,
};
pub use providers::db::{
    sqlite::SqliteProvider,
    storage::{FileStore, GenerationStore},
};
pub use types::{
    ContentType, FileMatch, FileRecord, Generation, GenerationOutcome, GenerationRequest,
    NewFile, NewGeneration, Philosophy, TagPolicy, Usage, UsageSummary,
};
