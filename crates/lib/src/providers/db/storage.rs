use crate::{
    errors::GenerationError,
    types::{FileMatch, FileRecord, Generation, NewFile, NewGeneration},
};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Read access to uploaded documents, plus the write path used to seed them.
#[async_trait]
pub trait FileStore: Send + Sync + DynClone + Debug {
    /// Stores a document and returns the saved record.
    async fn save_file(&self, file: NewFile) -> Result<FileRecord, GenerationError>;

    /// Full-text search over document contents, best match first.
    ///
    /// A blank query yields no matches.
    async fn search_files(&self, query: &str, limit: u32)
        -> Result<Vec<FileMatch>, GenerationError>;

    /// The extracted text of a document, or `None` if it does not exist.
    async fn get_file_content(&self, file_id: &str) -> Result<Option<String>, GenerationError>;
}

dyn_clone::clone_trait_object!(FileStore);

/// Append-only storage of generations, scoped per user on every read.
#[async_trait]
pub trait GenerationStore: Send + Sync + DynClone + Debug {
    /// Inserts a new record. No deduplication is performed.
    async fn save(&self, generation: NewGeneration) -> Result<Generation, GenerationError>;

    /// Returns the record only if `caller` owns it.
    async fn get_by_id(
        &self,
        caller: &str,
        generation_id: &str,
    ) -> Result<Option<Generation>, GenerationError>;

    /// A blank query lists all of the caller's records, newest first; otherwise
    /// the caller's records whose topic matches, most relevant first.
    async fn search_by_topic(
        &self,
        caller: &str,
        query: &str,
    ) -> Result<Vec<Generation>, GenerationError>;

    /// Sum of `usage.total_tokens` over the caller's records.
    async fn usage_total(&self, caller: &str) -> Result<u64, GenerationError>;
}

dyn_clone::clone_trait_object!(GenerationStore);
