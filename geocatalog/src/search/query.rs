//! Query string tokenization.

use std::sync::OnceLock;

use regex::Regex;

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").expect("term pattern is valid"))
}

/// Split a free-text query into lowercase search terms.
///
/// Terms are maximal alphanumeric runs; whitespace and punctuation
/// delimit. An empty or all-punctuation query yields no terms, which
/// callers treat as "match everything".
pub fn split_query(query: &str) -> Vec<String> {
    term_pattern()
        .find_iter(query)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
