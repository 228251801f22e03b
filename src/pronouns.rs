//! Personal-pronoun counting over raw text
//!
//! Counts whole-word occurrences of the fixed pronoun set
//! {I, we, my, ours, us}, case-insensitively, against the raw document
//! text rather than the token sequence. Word boundaries keep substrings
//! inside longer words ("bonus", "usually", "myth") from matching.

use regex::Regex;
use std::sync::OnceLock;

static PRONOUN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pronoun_pattern() -> &'static Regex {
    PRONOUN_PATTERN.get_or_init(|| {
        // The pattern is a literal constant, so construction cannot fail
        Regex::new(r"(?i)\b(?:I|we|my|ours|us)\b").unwrap_or_else(|e| {
            panic!("invalid pronoun pattern: {}", e);
        })
    })
}

/// Count whole-word personal pronouns in raw text.
pub fn count_pronouns(raw_text: &str) -> usize {
    pronoun_pattern().find_iter(raw_text).count()
}
