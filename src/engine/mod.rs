//! Metrics engine: one document in, one metrics record out
//!
//! `compute` orchestrates the tokenizer, lexicon, syllable estimator and
//! pronoun counter into a single `MetricsRecord`. The engine is pure: no
//! I/O, no shared mutable state, bit-identical output for identical input.
//! Zero-denominator paths are either ε-guarded (polarity, subjectivity) or
//! precondition-guarded (everything else), so a returned record never
//! contains NaN or infinity.

use crate::config::constants::limits::documents::MAX_DOCUMENT_BYTES;
use crate::lexicon::Lexicon;
use crate::logging::codes;
use crate::pronouns::count_pronouns;
use crate::syllable::count_syllables;
use crate::tokenizer::{clean, tokenize_sentences, tokenize_words, TokenizerError};
use crate::{log_debug, log_error, log_success};
use serde::{Deserialize, Serialize};

/// Guard against divide-by-zero when both sentiment scores are 0 or the
/// cleaned sequence is empty
const EPSILON: f64 = 1e-6;

// ============================================================================
// ANALYSIS ERRORS
// ============================================================================

/// Per-document analysis failures; recoverable at the batch level
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// Zero tokens or zero sentences after segmentation
    #[error("empty document")]
    EmptyDocument,

    /// Segmentation itself failed
    #[error("tokenization failure: {0}")]
    Tokenization(#[from] TokenizerError),

    /// Rejected before tokenization by the engine size limit
    #[error("Document too large: {size} bytes (max: {max})")]
    DocumentTooLarge { size: usize, max: usize },
}

impl AnalysisError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            AnalysisError::EmptyDocument => codes::analysis::EMPTY_DOCUMENT,
            AnalysisError::Tokenization(_) => codes::analysis::TOKENIZATION_FAILURE,
            AnalysisError::DocumentTooLarge { .. } => codes::analysis::DOCUMENT_TOO_LARGE,
        }
    }
}

// ============================================================================
// METRICS RECORD
// ============================================================================

/// The full metrics output for one document.
///
/// Field names are a stable persisted schema; reports serialize this
/// struct directly. `average_words_per_sentence` always equals
/// `average_sentence_length`; both fields are retained for interface
/// compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub document_id: String,
    pub positive_score: usize,
    pub negative_score: usize,
    pub polarity_score: f64,
    pub subjectivity_score: f64,
    pub average_sentence_length: f64,
    pub percentage_complex_words: f64,
    pub fog_index: f64,
    pub average_words_per_sentence: f64,
    pub complex_word_count: usize,
    pub word_count: usize,
    pub syllables_per_word: Vec<usize>,
    pub personal_pronoun_count: usize,
    pub average_word_length: f64,
}

// ============================================================================
// COMPUTE
// ============================================================================

/// Compute the full metrics record for one document.
///
/// Formulas are fixed for numeric reproducibility:
/// - polarity = (pos − neg) / (pos + neg + ε)
/// - subjectivity = (pos + neg) / (len(cleaned) + ε)
/// - average sentence length = len(tokens) / len(sentences)
/// - complex word = token longer than 2 characters
/// - fog index = 0.4 × (avg sentence length + % complex words)
/// - word_count and the per-token statistics (syllables, lengths,
///   complexity) run over the full token sequence; stop-word removal
///   only affects the sentiment scores and the subjectivity denominator
pub fn compute(
    document_id: &str,
    raw_text: &str,
    lexicon: &Lexicon,
) -> Result<MetricsRecord, AnalysisError> {
    if raw_text.len() > MAX_DOCUMENT_BYTES {
        let err = AnalysisError::DocumentTooLarge {
            size: raw_text.len(),
            max: MAX_DOCUMENT_BYTES,
        };
        log_error!(err.error_code(), "Document rejected by size limit",
            "document_id" => document_id,
            "size_bytes" => raw_text.len()
        );
        return Err(err);
    }

    let tokens = tokenize_words(raw_text).map_err(|e| {
        log_error!(codes::analysis::TOKENIZATION_FAILURE, "Tokenization failed",
            "document_id" => document_id,
            "cause" => e
        );
        AnalysisError::Tokenization(e)
    })?;
    let sentences = tokenize_sentences(raw_text);

    if tokens.is_empty() || sentences.is_empty() {
        log_error!(codes::analysis::EMPTY_DOCUMENT, "empty document",
            "document_id" => document_id
        );
        return Err(AnalysisError::EmptyDocument);
    }

    log_debug!("Tokenization complete",
        "document_id" => document_id,
        "tokens" => tokens.len(),
        "sentences" => sentences.len()
    );

    let cleaned = clean(&tokens, lexicon);

    let positive_score = cleaned.iter().filter(|t| lexicon.is_positive(t)).count();
    let negative_score = cleaned.iter().filter(|t| lexicon.is_negative(t)).count();

    let polarity_score = (positive_score as f64 - negative_score as f64)
        / (positive_score as f64 + negative_score as f64 + EPSILON);
    let subjectivity_score =
        (positive_score + negative_score) as f64 / (cleaned.len() as f64 + EPSILON);

    // Denominators below are non-zero by the emptiness precondition
    let average_sentence_length = tokens.len() as f64 / sentences.len() as f64;

    let token_lengths: Vec<usize> = tokens.iter().map(|t| t.chars().count()).collect();
    let complex_word_count = token_lengths.iter().filter(|&&len| len > 2).count();
    let percentage_complex_words = 100.0 * complex_word_count as f64 / tokens.len() as f64;
    let fog_index = 0.4 * (average_sentence_length + percentage_complex_words);

    let syllables_per_word: Vec<usize> = tokens.iter().map(|t| count_syllables(t)).collect();
    let personal_pronoun_count = count_pronouns(raw_text);
    let average_word_length = token_lengths.iter().sum::<usize>() as f64 / tokens.len() as f64;

    let record = MetricsRecord {
        document_id: document_id.to_string(),
        positive_score,
        negative_score,
        polarity_score,
        subjectivity_score,
        average_sentence_length,
        percentage_complex_words,
        fog_index,
        average_words_per_sentence: average_sentence_length,
        complex_word_count,
        word_count: tokens.len(),
        syllables_per_word,
        personal_pronoun_count,
        average_word_length,
    };

    log_success!(codes::success::DOCUMENT_ANALYZED, "Document analyzed",
        "document_id" => document_id,
        "word_count" => record.word_count,
        "fog_index" => format!("{:.2}", record.fog_index)
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample_lexicon() -> Lexicon {
        Lexicon::load(["good", "great"], ["bad"], ["the", "a"]).unwrap()
    }

    #[test]
    fn test_round_trip_scenario() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "The great good news is not bad at all.", &lexicon).unwrap();

        assert_eq!(record.positive_score, 2);
        assert_eq!(record.negative_score, 1);
        assert!((record.polarity_score - (2.0 - 1.0) / (3.0 + 1e-6)).abs() < 1e-9);
        assert!((record.polarity_score - 0.3333).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_derived_counts() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "The great good news is not bad at all.", &lexicon).unwrap();

        // 9 tokens, 1 sentence; cleaning removes "The" but word_count
        // still covers the full token sequence
        assert_eq!(record.word_count, 9);
        assert_eq!(record.syllables_per_word.len(), 9);
        assert!((record.average_sentence_length - 9.0).abs() < 1e-9);
        // "is" and "at" are the only tokens of 2 characters or fewer
        assert_eq!(record.complex_word_count, 7);
        assert!((record.subjectivity_score - 3.0 / (8.0 + 1e-6)).abs() < 1e-9);
    }

    #[test]
    fn test_word_count_covers_full_token_sequence() {
        let lexicon = sample_lexicon();
        let text = "The great good news is not bad at all.";
        let record = compute("doc-1", text, &lexicon).unwrap();

        // Stop-word removal must not shrink word_count
        assert_eq!(record.word_count, tokenize_words(text).unwrap().len());
        assert_eq!(record.word_count, record.syllables_per_word.len());
    }

    #[test]
    fn test_neutral_polarity_near_zero() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "Nothing sentimental here today.", &lexicon).unwrap();

        assert_eq!(record.positive_score, 0);
        assert_eq!(record.negative_score, 0);
        assert!(record.polarity_score.abs() < 1e-4);
        assert!(record.subjectivity_score.abs() < 1e-4);
    }

    #[test]
    fn test_empty_document() {
        let lexicon = sample_lexicon();

        assert_matches!(
            compute("doc-1", "", &lexicon),
            Err(AnalysisError::EmptyDocument)
        );
        assert_matches!(
            compute("doc-1", "   \n\t  ", &lexicon),
            Err(AnalysisError::EmptyDocument)
        );
        assert_matches!(
            compute("doc-1", "... !!! ???", &lexicon),
            Err(AnalysisError::EmptyDocument)
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AnalysisError::EmptyDocument.to_string(), "empty document");

        let err = AnalysisError::Tokenization(TokenizerError::TooManyTokens {
            count: 11,
            max: 10,
        });
        assert!(err.to_string().starts_with("tokenization failure: "));
    }

    #[test]
    fn test_no_nan_or_infinity() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "One lonely sentence", &lexicon).unwrap();

        assert!(record.polarity_score.is_finite());
        assert!(record.subjectivity_score.is_finite());
        assert!(record.average_sentence_length.is_finite());
        assert!(record.percentage_complex_words.is_finite());
        assert!(record.fog_index.is_finite());
        assert!(record.average_word_length.is_finite());
    }

    #[test]
    fn test_sentence_length_fields_identical() {
        let lexicon = sample_lexicon();
        let texts = [
            "One sentence here.",
            "Two sentences. Right here!",
            "No terminator at all",
        ];

        for text in texts {
            let record = compute("doc-1", text, &lexicon).unwrap();
            assert_eq!(
                record.average_sentence_length,
                record.average_words_per_sentence
            );
        }
    }

    #[test]
    fn test_percentage_bounds_and_fog_sign() {
        let lexicon = sample_lexicon();
        let texts = [
            "a an it of to in is",
            "Extraordinarily complicated vocabulary throughout.",
            "Mixed bag of it all, really.",
        ];

        for text in texts {
            let record = compute("doc-1", text, &lexicon).unwrap();
            assert!(record.percentage_complex_words >= 0.0);
            assert!(record.percentage_complex_words <= 100.0);
            assert!(record.fog_index >= 0.0);
        }
    }

    #[test]
    fn test_idempotence() {
        let lexicon = sample_lexicon();
        let text = "The great good news is not bad at all. We tried.";

        let first = compute("doc-1", text, &lexicon).unwrap();
        let second = compute("doc-1", text, &lexicon).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pronoun_count_from_raw_text() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "I said we keep my plan, ours alone, trust us.", &lexicon)
            .unwrap();
        assert_eq!(record.personal_pronoun_count, 5);
    }

    #[test]
    fn test_document_too_large() {
        let lexicon = sample_lexicon();
        let oversized = "word ".repeat(MAX_DOCUMENT_BYTES / 4);

        assert_matches!(
            compute("doc-1", &oversized, &lexicon),
            Err(AnalysisError::DocumentTooLarge { .. })
        );
    }

    #[test]
    fn test_record_serialization_schema() {
        let lexicon = sample_lexicon();
        let record = compute("doc-1", "Good words. Bad words.", &lexicon).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"document_id\":\"doc-1\""));
        assert!(json.contains("\"polarity_score\""));
        assert!(json.contains("\"fog_index\""));

        let parsed: MetricsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
