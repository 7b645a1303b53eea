//! # File Context Retrieval
//!
//! Grounds framing-heavy prompts in uploaded documents: finds the documents
//! most relevant to a topic and joins their text into one context string.

use crate::{errors::GenerationError, providers::db::storage::FileStore};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Placed between consecutive document texts.
pub const FILE_CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Bounds on how much document text is pulled into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextPolicy {
    /// Maximum number of search hits to fetch.
    pub max_documents: u32,
    /// Maximum characters of joined context. `None` disables the cap.
    pub max_chars: Option<usize>,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self {
            max_documents: 5,
            max_chars: Some(32_000),
        }
    }
}

/// Searches documents for `topic` and returns their joined text, or `None`
/// when the topic is blank or nothing usable was found.
pub async fn retrieve_file_context(
    store: &dyn FileStore,
    topic: &str,
    policy: &ContextPolicy,
) -> Result<Option<String>, GenerationError> {
    if topic.trim().is_empty() {
        debug!("Blank topic, skipping file context retrieval.");
        return Ok(None);
    }

    let matches = store.search_files(topic, policy.max_documents).await?;
    info!(topic = %topic, "Found {} relevant documents.", matches.len());

    let contents = join_all(matches.iter().map(|m| store.get_file_content(&m.id))).await;

    let mut texts = Vec::with_capacity(contents.len());
    for content in contents {
        match content? {
            Some(text) if !text.is_empty() => texts.push(text),
            _ => {}
        }
    }

    if texts.is_empty() {
        return Ok(None);
    }

    Ok(Some(join_within_cap(&texts, policy.max_chars)))
}

/// Joins texts in order until `max_chars` is reached. The document that
/// crosses the cap is cut at a char boundary and later ones are dropped. A
/// separator is only written when the whole separator and at least one
/// character of the next document fit.
fn join_within_cap(texts: &[String], max_chars: Option<usize>) -> String {
    let Some(limit) = max_chars else {
        return texts.join(FILE_CONTEXT_SEPARATOR);
    };

    let separator_chars = FILE_CONTEXT_SEPARATOR.chars().count();
    let mut joined = String::new();
    let mut used = 0;
    let mut included = 0;
    let mut truncated = false;

    for text in texts {
        if included > 0 {
            if used + separator_chars >= limit {
                truncated = true;
                break;
            }
            joined.push_str(FILE_CONTEXT_SEPARATOR);
            used += separator_chars;
        }

        let remaining = limit - used;
        match text.char_indices().nth(remaining) {
            None => {
                joined.push_str(text);
                used += text.chars().count();
                included += 1;
            }
            Some((byte_idx, _)) => {
                joined.push_str(&text[..byte_idx]);
                included += 1;
                truncated = true;
                break;
            }
        }
    }

    if truncated {
        warn!(
            limit,
            documents = texts.len(),
            included,
            "File context exceeded the character cap and was truncated."
        );
    }
    joined
}
