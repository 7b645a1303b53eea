//! # Domain Types
//!
//! The tagged enums for content types and philosophies, the persisted
//! `Generation` record, document records, and the request/outcome payloads
//! exchanged with callers.

use crate::errors::{ErrorKind, GenerationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The output format a generation is written in.
///
/// Unrecognised tags are kept as `Other` so that a stored record always
/// round-trips the tag it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    ShortDailyBlogPost,
    EngagingArticle,
    MarketingPlaybook,
    SocialMediaCalendar,
    Other(String),
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::ShortDailyBlogPost,
        ContentType::EngagingArticle,
        ContentType::MarketingPlaybook,
        ContentType::SocialMediaCalendar,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::ShortDailyBlogPost => "Short Daily Blog Post",
            ContentType::EngagingArticle => "Engaging Article",
            ContentType::MarketingPlaybook => "Marketing Playbook",
            ContentType::SocialMediaCalendar => "Social Media Calendar",
            ContentType::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ContentType::Other(_))
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Short Daily Blog Post" => ContentType::ShortDailyBlogPost,
            "Engaging Article" => ContentType::EngagingArticle,
            "Marketing Playbook" => ContentType::MarketingPlaybook,
            "Social Media Calendar" => ContentType::SocialMediaCalendar,
            _ => ContentType::Other(tag),
        }
    }
}

impl From<&str> for ContentType {
    fn from(tag: &str) -> Self {
        ContentType::from(tag.to_string())
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named content-framing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Philosophy {
    /// Cognitive framing.
    Lakoff,
    /// Permission marketing.
    Godin,
    /// Authentic creation.
    Vaynerchuk,
    /// User acquisition.
    Flanagan,
    /// All of the above.
    Integrated,
    Other(String),
}

impl Philosophy {
    pub const ALL: [Philosophy; 5] = [
        Philosophy::Lakoff,
        Philosophy::Godin,
        Philosophy::Vaynerchuk,
        Philosophy::Flanagan,
        Philosophy::Integrated,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Philosophy::Lakoff => "Lakoff",
            Philosophy::Godin => "Godin",
            Philosophy::Vaynerchuk => "Vaynerchuk",
            Philosophy::Flanagan => "Flanagan",
            Philosophy::Integrated => "Integrated",
            Philosophy::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Philosophy::Other(_))
    }

    /// Whether prompts for this philosophy are grounded in uploaded documents.
    pub fn uses_file_context(&self) -> bool {
        matches!(self, Philosophy::Lakoff | Philosophy::Integrated)
    }
}

impl From<String> for Philosophy {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Lakoff" => Philosophy::Lakoff,
            "Godin" => Philosophy::Godin,
            "Vaynerchuk" => Philosophy::Vaynerchuk,
            "Flanagan" => Philosophy::Flanagan,
            "Integrated" => Philosophy::Integrated,
            _ => Philosophy::Other(tag),
        }
    }
}

impl From<&str> for Philosophy {
    fn from(tag: &str) -> Self {
        Philosophy::from(tag.to_string())
    }
}

impl From<Philosophy> for String {
    fn from(philosophy: Philosophy) -> Self {
        match philosophy {
            Philosophy::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Philosophy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a content type or philosophy tag that is not recognised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// Fall back to the generic content instruction and an empty framing clause.
    #[default]
    Lenient,
    /// Reject the request before anything else happens.
    Strict,
}

impl TagPolicy {
    pub fn check(
        &self,
        content_type: &ContentType,
        philosophy: &Philosophy,
    ) -> Result<(), GenerationError> {
        if *self == TagPolicy::Lenient {
            return Ok(());
        }
        if !content_type.is_known() {
            return Err(GenerationError::InvalidInput(format!(
                "unknown content type '{content_type}'"
            )));
        }
        if !philosophy.is_known() {
            return Err(GenerationError::InvalidInput(format!(
                "unknown philosophy '{philosophy}'"
            )));
        }
        Ok(())
    }
}

/// Token accounting attached to every generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u64,
    pub total_tokens: u64,
}

/// One persisted outcome of the generation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub id: String,
    pub user_id: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub region: String,
    pub content_type: ContentType,
    pub model: String,
    pub result_text: String,
    pub philosophy: Philosophy,
    pub usage: Usage,
    pub created_at: DateTime<Utc>,
}

/// The fields of a `Generation` supplied by the orchestrator; the store
/// assigns the id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGeneration {
    pub user_id: String,
    pub topic: String,
    pub url: Option<String>,
    pub region: String,
    pub content_type: ContentType,
    pub model: String,
    pub result_text: String,
    pub philosophy: Philosophy,
    pub usage: Usage,
}

/// An uploaded document with its extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub storage_id: String,
    pub text_content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub name: String,
    #[serde(default)]
    pub storage_id: Option<String>,
    pub text_content: String,
}

/// A document search hit. Only identifies the document; its text is fetched
/// separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMatch {
    pub id: String,
    pub name: String,
}

/// The arguments of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// A caller-held key, used only when the deployment has none.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Blank means "use the deployment's default model".
    #[serde(default)]
    pub model: String,
    pub topic: String,
    #[serde(default)]
    pub url: Option<String>,
    pub region: String,
    pub content_type: ContentType,
    pub philosophy: Philosophy,
}

/// The structured result of a generation call as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl GenerationOutcome {
    pub fn succeeded(generation_id: String) -> Self {
        Self {
            success: true,
            generation_id: Some(generation_id),
            error: None,
            kind: None,
        }
    }

    pub fn failed(error: &GenerationError) -> Self {
        Self {
            success: false,
            generation_id: None,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_their_literal_names() {
        for content_type in ContentType::ALL {
            let tag: String = content_type.clone().into();
            assert_eq!(ContentType::from(tag), content_type);
        }
        for philosophy in Philosophy::ALL {
            let tag: String = philosophy.clone().into();
            assert_eq!(Philosophy::from(tag), philosophy);
        }
    }

    #[test]
    fn unknown_tags_are_preserved_verbatim() {
        let content_type = ContentType::from("Haiku");
        assert_eq!(content_type, ContentType::Other("Haiku".to_string()));
        assert_eq!(content_type.as_str(), "Haiku");
        assert!(!Philosophy::from("Stoic").is_known());
    }

    #[test]
    fn only_lakoff_and_integrated_use_file_context() {
        let grounded: Vec<_> = Philosophy::ALL
            .iter()
            .filter(|p| p.uses_file_context())
            .collect();
        assert_eq!(grounded, vec![&Philosophy::Lakoff, &Philosophy::Integrated]);
    }

    #[test]
    fn strict_policy_rejects_unknown_tags() {
        let strict = TagPolicy::Strict;
        assert!(strict
            .check(&ContentType::EngagingArticle, &Philosophy::Godin)
            .is_ok());
        let err = strict
            .check(&ContentType::from("Haiku"), &Philosophy::Godin)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(TagPolicy::Lenient
            .check(&ContentType::from("Haiku"), &Philosophy::from("Stoic"))
            .is_ok());
    }

    #[test]
    fn request_deserializes_from_camel_case_payload() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "apiKey": "user-key",
            "model": "gemini-2.5-flash",
            "topic": "AI in healthcare",
            "region": "USA",
            "contentType": "Marketing Playbook",
            "philosophy": "Godin"
        }))
        .unwrap();
        assert_eq!(request.api_key.as_deref(), Some("user-key"));
        assert_eq!(request.content_type, ContentType::MarketingPlaybook);
        assert_eq!(request.url, None);
    }
}
