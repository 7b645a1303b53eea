//! # Access Policy
//!
//! Generations are private to the user who created them. Single-record reads
//! pass through [`owner_only`], which treats "not yours" exactly like "does
//! not exist".

use crate::types::Generation;
use tracing::warn;

/// Returns the record only when `caller` owns it.
pub fn owner_only(generation: Option<Generation>, caller: &str) -> Option<Generation> {
    match generation {
        Some(generation) if generation.user_id == caller => Some(generation),
        Some(generation) => {
            warn!(
                generation_id = %generation.id,
                caller = %caller,
                "Generation requested by a user who does not own it."
            );
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, Philosophy, Usage};
    use chrono::Utc;

    fn generation_owned_by(user_id: &str) -> Generation {
        Generation {
            id: "gen-1".to_string(),
            user_id: user_id.to_string(),
            topic: "water rights".to_string(),
            url: None,
            region: "USA".to_string(),
            content_type: ContentType::EngagingArticle,
            model: "gemini-2.5-flash".to_string(),
            result_text: "text".to_string(),
            philosophy: Philosophy::Godin,
            usage: Usage::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_sees_the_record_and_others_see_nothing() {
        let record = generation_owned_by("alice");
        assert!(owner_only(Some(record.clone()), "alice").is_some());
        assert!(owner_only(Some(record), "bob").is_none());
        assert!(owner_only(None, "alice").is_none());
    }
}
