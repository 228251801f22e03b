//! Word and sentence tokenization for natural-language text
//!
//! Word tokenization is a punctuation-aware character scanner: tokens are
//! alphanumeric runs with internal apostrophes and hyphens, and punctuation
//! is never emitted as a token. Sentence segmentation splits on `.` `!` `?`
//! with abbreviation and decimal-number handling; naive period splitting is
//! deliberately avoided.

use crate::config::constants::limits::tokenizer::{MAX_TOKEN_COUNT, MAX_WORD_LENGTH};
use crate::lexicon::Lexicon;
use crate::log_debug;

/// Tokenization errors with resource boundaries
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenizerError {
    #[error("Too many tokens: {count} (max: {max})")]
    TooManyTokens { count: usize, max: usize },
}

impl TokenizerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            TokenizerError::TooManyTokens { .. } => {
                crate::logging::codes::tokenization::TOO_MANY_TOKENS
            }
        }
    }
}

/// Characters that may appear inside a word without breaking it
fn is_word_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// Sentence-ending terminators
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Abbreviations whose trailing period does not end a sentence.
/// Single-letter words (initials, and the tails of "e.g."/"i.e.") are
/// handled separately.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "mt", "vs", "etc", "inc", "ltd", "co", "jr", "sr",
    "no", "fig", "vol", "al", "approx",
];

fn is_abbreviation(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 && word.chars().all(|c| c.is_alphabetic()) {
        return true;
    }
    let lowered = word.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str())
}

// ============================================================================
// WORD TOKENIZATION
// ============================================================================

/// Split text into word tokens, preserving source order.
///
/// A token starts at an alphanumeric character and continues through
/// alphanumerics plus internal apostrophes and hyphens ("don't",
/// "re-entry"). Trailing joiners are stripped so "dogs'" yields "dogs".
pub fn tokenize_words(text: &str) -> Result<Vec<String>, TokenizerError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if !ch.is_alphanumeric() {
            continue;
        }

        let mut word = String::new();
        word.push(ch);

        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || is_word_joiner(next) {
                word.push(next);
                chars.next();
            } else {
                break;
            }
        }

        // Joiners are only word-internal
        while word.ends_with(is_word_joiner) {
            word.pop();
        }

        if word.is_empty() {
            continue;
        }

        if word.chars().count() > MAX_WORD_LENGTH {
            log_debug!("Oversized token retained",
                "length" => word.chars().count(),
                "limit" => MAX_WORD_LENGTH
            );
        }

        tokens.push(word);

        if tokens.len() > MAX_TOKEN_COUNT {
            return Err(TokenizerError::TooManyTokens {
                count: tokens.len(),
                max: MAX_TOKEN_COUNT,
            });
        }
    }

    Ok(tokens)
}

// ============================================================================
// SENTENCE SEGMENTATION
// ============================================================================

/// Split text into sentences on `.` `!` `?` boundaries.
///
/// Consecutive terminators ("...", "?!") collapse into one boundary. A
/// period does not end a sentence when it sits inside a decimal number or
/// follows a known abbreviation or a single-letter initial. Sentences are
/// trimmed; empty segments are dropped; trailing text without a terminator
/// forms a final sentence.
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);

        if ch == '!' || ch == '?' {
            i = consume_terminators(&chars, i, &mut current);
            flush_sentence(&mut current, &mut sentences);
        } else if ch == '.' {
            let in_number = i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_ascii_digit()
                && chars[i + 1].is_ascii_digit();

            if !in_number {
                i = consume_terminators(&chars, i, &mut current);
                if !is_abbreviation(&trailing_word(&current)) {
                    flush_sentence(&mut current, &mut sentences);
                }
            }
        }

        i += 1;
    }

    flush_sentence(&mut current, &mut sentences);
    sentences
}

/// Pull any further terminators at i+1.. into the current sentence
fn consume_terminators(chars: &[char], mut i: usize, current: &mut String) -> usize {
    while i + 1 < chars.len() && is_terminator(chars[i + 1]) {
        i += 1;
        current.push(chars[i]);
    }
    i
}

/// The word immediately before the terminator run at the end of `current`
fn trailing_word(current: &str) -> String {
    current
        .trim_end_matches(is_terminator)
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<char>>()
        .into_iter()
        .rev()
        .collect()
}

fn flush_sentence(current: &mut String, sentences: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

// ============================================================================
// STOP-WORD CLEANING
// ============================================================================

/// Filter stop words out of a token sequence, case-insensitively.
/// Order and duplicates are otherwise preserved.
pub fn clean(tokens: &[String], lexicon: &Lexicon) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !lexicon.is_stopword(t))
        .cloned()
        .collect()
}
