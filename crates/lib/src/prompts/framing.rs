//! # Framing Philosophy Templates
//!
//! One fixed instruction block per philosophy. The Lakoff and Integrated
//! blocks end with the file-context block when document excerpts are
//! available; the others never reference uploaded documents.

use crate::types::Philosophy;

/// Opens the file-context block inside a prompt.
pub const FILE_CONTEXT_BEGIN: &str = "---BEGIN FILE CONTEXT---";
/// Closes the file-context block inside a prompt.
pub const FILE_CONTEXT_END: &str = "---END FILE CONTEXT---";

pub const LAKOFF_INSTRUCTION: &str = "Apply George Lakoff's cognitive framing. Reframe the topic using positive, value-based language. Avoid reinforcing negative frames.";

pub const GODIN_INSTRUCTION: &str = "Apply Seth Godin's permission marketing principles. Create a remarkable and shareable piece of content. It should build trust and be designed to earn the audience's attention, not demand it.";

pub const VAYNERCHUK_INSTRUCTION: &str = "Apply Gary Vaynerchuk's content philosophy. The tone must be authentic, transparent, and relatable. Avoid corporate jargon completely. Adopt a 'document, don't create' mindset.";

pub const FLANAGAN_INSTRUCTION: &str = "Apply Kieran Flanagan's user acquisition strategies. The content should be framed to support growth and conversion. Suggest a counter-intuitive angle or hook.";

pub const INTEGRATED_INSTRUCTION: &str = "Combine multiple philosophies. The content must be: 1. **Positively framed** (Lakoff). 2. **Remarkable and trust-building** (Godin). 3. **Authentic and jargon-free** (Vaynerchuk). 4. **Growth-oriented** (Flanagan).";

/// Wraps document excerpts in the delimited block injected into grounded prompts.
///
/// The excerpts are inserted verbatim. An absent or empty context yields an
/// empty string.
pub fn file_context_block(file_context: Option<&str>) -> String {
    match file_context {
        Some(context) if !context.is_empty() => format!(
            "Reference the following document excerpts for context, examples, and direct quotes. Cite them where appropriate: \n{FILE_CONTEXT_BEGIN}\n{context}\n{FILE_CONTEXT_END}\n"
        ),
        _ => String::new(),
    }
}

/// Returns the framing instruction for a philosophy.
///
/// Unrecognised philosophies produce an empty clause.
pub fn philosophy_instruction(philosophy: &Philosophy, file_context: Option<&str>) -> String {
    match philosophy {
        Philosophy::Lakoff => {
            format!("{LAKOFF_INSTRUCTION} {}", file_context_block(file_context))
        }
        Philosophy::Godin => GODIN_INSTRUCTION.to_string(),
        Philosophy::Vaynerchuk => VAYNERCHUK_INSTRUCTION.to_string(),
        Philosophy::Flanagan => FLANAGAN_INSTRUCTION.to_string(),
        Philosophy::Integrated => {
            format!("{INTEGRATED_INSTRUCTION} {}", file_context_block(file_context))
        }
        Philosophy::Other(_) => String::new(),
    }
}

/// The fixed fragment every prompt for `philosophy` contains, if any.
pub fn philosophy_fragment(philosophy: &Philosophy) -> Option<&'static str> {
    match philosophy {
        Philosophy::Lakoff => Some(LAKOFF_INSTRUCTION),
        Philosophy::Godin => Some(GODIN_INSTRUCTION),
        Philosophy::Vaynerchuk => Some(VAYNERCHUK_INSTRUCTION),
        Philosophy::Flanagan => Some(FLANAGAN_INSTRUCTION),
        Philosophy::Integrated => Some(INTEGRATED_INSTRUCTION),
        Philosophy::Other(_) => None,
    }
}
