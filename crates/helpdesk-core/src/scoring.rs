//! Keyword relevance scoring shared by the knowledge base and the template
//! catalog.
//!
//! Every function here expects its inputs already lower-cased; matching is
//! plain substring containment, so an empty query is contained in every
//! field.

/// Points for a query found inside a problem title.
pub const TITLE_MATCH: u32 = 10;
/// Points for a query found inside a problem description.
pub const DESCRIPTION_MATCH: u32 = 5;
/// Points per keyword that contains, or is contained in, the query.
pub const KEYWORD_MATCH: u32 = 3;
/// Points per query token found in a keyword or in the title.
pub const TOKEN_MATCH: u32 = 2;

/// Points per template keyword found in a message.
pub const TEMPLATE_KEYWORD_MATCH: u32 = 3;
/// Points per word of a template keyword found in a message.
pub const TEMPLATE_KEYWORD_WORD_MATCH: u32 = 1;
/// Points per word of a template name found in a message.
pub const TEMPLATE_NAME_WORD_MATCH: u32 = 2;
/// Lowest score at which a template counts as detected.
pub const TEMPLATE_MIN_SCORE: u32 = 3;

/// Whitespace-separated words longer than two characters.
pub(crate) fn significant_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > 2)
}

/// Lower-cased category filter; a missing or blank category filters
/// nothing.
pub(crate) fn category_filter(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

/// Relevance of a problem to a search query.
pub(crate) fn problem_score(
    query: &str,
    title: &str,
    description: &str,
    keywords: &[String],
) -> u32 {
    let mut score = 0;

    if title.contains(query) {
        score += TITLE_MATCH;
    }
    if description.contains(query) {
        score += DESCRIPTION_MATCH;
    }

    for keyword in keywords {
        if keyword.contains(query) || query.contains(keyword.as_str()) {
            score += KEYWORD_MATCH;
        }
    }

    for word in significant_words(query) {
        for keyword in keywords {
            if keyword.contains(word) {
                score += TOKEN_MATCH;
            }
        }
        if title.contains(word) {
            score += TOKEN_MATCH;
        }
    }

    score
}

/// Relevance of a task template to a free-text message.
pub(crate) fn template_score(message: &str, name: &str, keywords: &[String]) -> u32 {
    let mut score = 0;

    for keyword in keywords {
        if message.contains(keyword.as_str()) {
            score += TEMPLATE_KEYWORD_MATCH;
        }
        for word in significant_words(keyword) {
            if message.contains(word) {
                score += TEMPLATE_KEYWORD_WORD_MATCH;
            }
        }
    }

    for word in significant_words(name) {
        if message.contains(word) {
            score += TEMPLATE_NAME_WORD_MATCH;
        }
    }

    score
}
