//! # Text Relevance
//!
//! The ranking used by the topic search over generations and the content
//! search over files. A query is split into lowercase terms; a text scores
//! by how many distinct terms it contains, then by how often they occur.

/// Splits a query into distinct lowercase terms.
pub fn tokenize(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
    {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Relevance of `text` for `terms`: (distinct terms matched, total occurrences).
pub fn relevance(text: &str, terms: &[String]) -> (usize, usize) {
    let haystack = text.to_lowercase();
    terms.iter().fold((0, 0), |(matched, occurrences), term| {
        let hits = haystack.matches(term.as_str()).count();
        if hits > 0 {
            (matched + 1, occurrences + hits)
        } else {
            (matched, occurrences)
        }
    })
}

/// `LIKE` patterns for the candidate pre-filter, one per term.
pub fn like_patterns(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| format!("%{t}%")).collect()
}
