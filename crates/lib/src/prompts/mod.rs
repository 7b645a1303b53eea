//! # Prompt Templates
//!
//! Prompt assembly for the generation flow. `framing` holds the philosophy
//! templates and `content` the content-type templates; `build_prompt` joins
//! them into the single string sent to the model.

pub mod content;
pub mod framing;

use crate::types::{ContentType, Philosophy};

/// Everything that shapes a prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub content_type: &'a ContentType,
    pub topic: &'a str,
    pub region: &'a str,
    pub philosophy: &'a Philosophy,
    pub file_context: Option<&'a str>,
    pub url: Option<&'a str>,
}

/// Builds the prompt for one generation.
///
/// The four parts are always joined with single spaces, so an empty URL or
/// philosophy clause leaves a double space behind. Topic, region and file
/// context are inserted as-is and the result is never truncated here.
pub fn build_prompt(inputs: &PromptInputs<'_>) -> String {
    let preamble = content::analyst_preamble(inputs.topic, inputs.region);
    let url_context = content::url_clause(inputs.url);
    let philosophy_instruction =
        framing::philosophy_instruction(inputs.philosophy, inputs.file_context);
    let content_instruction = content::content_instruction(inputs.content_type);

    format!("{preamble} {philosophy_instruction} {url_context} {content_instruction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(
        content_type: &'a ContentType,
        philosophy: &'a Philosophy,
        file_context: Option<&'a str>,
        url: Option<&'a str>,
    ) -> PromptInputs<'a> {
        PromptInputs {
            content_type,
            topic: "urban transit",
            region: "EU",
            philosophy,
            file_context,
            url,
        }
    }

    #[test]
    fn godin_blog_post_prompt_is_fully_determined() {
        let prompt = build_prompt(&inputs(
            &ContentType::ShortDailyBlogPost,
            &Philosophy::Godin,
            None,
            None,
        ));
        let expected = format!(
            "You are an expert policy analyst and content strategist. Your task is to generate high-quality, strategically framed content about 'urban transit' with a focus on the 'EU' geopolitical context. {}  {}",
            framing::GODIN_INSTRUCTION,
            content::SHORT_DAILY_BLOG_POST_INSTRUCTION
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn url_clause_sits_between_framing_and_content() {
        let prompt = build_prompt(&inputs(
            &ContentType::EngagingArticle,
            &Philosophy::Flanagan,
            None,
            Some("https://example.org/report"),
        ));
        let framing_at = prompt.find(framing::FLANAGAN_INSTRUCTION).unwrap();
        let url_at = prompt
            .find("Analyze the content from this URL for additional context: https://example.org/report.")
            .unwrap();
        let content_at = prompt.find(content::ENGAGING_ARTICLE_INSTRUCTION).unwrap();
        assert!(framing_at < url_at && url_at < content_at);
    }

    #[test]
    fn empty_file_context_adds_no_block() {
        let prompt = build_prompt(&inputs(
            &ContentType::MarketingPlaybook,
            &Philosophy::Lakoff,
            Some(""),
            None,
        ));
        assert!(!prompt.contains(framing::FILE_CONTEXT_BEGIN));
    }
}
