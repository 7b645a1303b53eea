//! # Content Type Templates
//!
//! The analyst preamble, the optional URL clause, and one length/structure
//! instruction per content type.

use crate::types::ContentType;

pub const SHORT_DAILY_BLOG_POST_INSTRUCTION: &str = "Write a short, thought-provoking blog post (200-300 words). It must include a clear call-to-action and be optimized for SEO with relevant keywords.";

pub const ENGAGING_ARTICLE_INSTRUCTION: &str = "Write a detailed and engaging article (800-1200 words). Use storytelling techniques, break it into multiple sections with clear headings, and include citations from experts or provided documents.";

pub const MARKETING_PLAYBOOK_INSTRUCTION: &str = "Create a comprehensive marketing playbook. This must include a messaging strategy, a brand story, A/B testing suggestions for key messages, and a multi-channel distribution plan.";

pub const SOCIAL_MEDIA_CALENDAR_INSTRUCTION: &str = "Generate a one-month social media calendar. Provide daily post suggestions optimized for Twitter and LinkedIn. Include post copy, relevant hashtags, and an engagement prediction score (1-10) for each post.";

/// Used for any content type that is not one of the four known tags.
pub const GENERIC_CONTENT_INSTRUCTION: &str = "Write a general piece of content about the topic.";

/// The persona and task statement every prompt opens with.
///
/// Topic and region are inserted verbatim; neither is scanned for placeholders.
pub fn analyst_preamble(topic: &str, region: &str) -> String {
    format!(
        "You are an expert policy analyst and content strategist. Your task is to generate high-quality, strategically framed content about '{topic}' with a focus on the '{region}' geopolitical context."
    )
}

/// Asks the model to consider a reference URL. Empty when no URL was given.
pub fn url_clause(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => {
            format!("Analyze the content from this URL for additional context: {url}.")
        }
        _ => String::new(),
    }
}

pub fn content_instruction(content_type: &ContentType) -> &'static str {
    match content_type {
        ContentType::ShortDailyBlogPost => SHORT_DAILY_BLOG_POST_INSTRUCTION,
        ContentType::EngagingArticle => ENGAGING_ARTICLE_INSTRUCTION,
        ContentType::MarketingPlaybook => MARKETING_PLAYBOOK_INSTRUCTION,
        ContentType::SocialMediaCalendar => SOCIAL_MEDIA_CALENDAR_INSTRUCTION,
        ContentType::Other(_) => GENERIC_CONTENT_INSTRUCTION,
    }
}
