//! Consolidated error codes and classification system
//!
//! Single source of truth for all error and success codes, their metadata,
//! and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexicon loading error codes
pub mod lexicon {
    use super::Code;

    pub const LIST_NOT_FOUND: Code = Code::new("E005");
    pub const LIST_UNREADABLE: Code = Code::new("E006");
    pub const LIST_EMPTY: Code = Code::new("E007");
    pub const LIST_TOO_LARGE: Code = Code::new("E008");
}

/// Document loading error codes
pub mod documents {
    use super::Code;

    pub const DOCUMENT_NOT_FOUND: Code = Code::new("E010");
    pub const DOCUMENT_UNREADABLE: Code = Code::new("E011");
    pub const DOCUMENT_TOO_LARGE: Code = Code::new("E012");
    pub const INVALID_ENCODING: Code = Code::new("E013");
    pub const EMPTY_DOCUMENT_FILE: Code = Code::new("E014");
}

/// Tokenization error codes
pub mod tokenization {
    use super::Code;

    pub const TOO_MANY_TOKENS: Code = Code::new("E020");
}

/// Analysis error codes
pub mod analysis {
    use super::Code;

    pub const EMPTY_DOCUMENT: Code = Code::new("E030");
    pub const TOKENIZATION_FAILURE: Code = Code::new("E031");
    pub const DOCUMENT_TOO_LARGE: Code = Code::new("E032");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E040");
    pub const NO_DOCUMENTS_FOUND: Code = Code::new("E041");
    pub const TOO_MANY_DOCUMENTS: Code = Code::new("E042");
    pub const THREAD_ERROR: Code = Code::new("E043");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I002");

    // Lexicon success codes
    pub const LEXICON_LOADED: Code = Code::new("I005");

    // Document success codes
    pub const DOCUMENT_LOADED: Code = Code::new("I010");
    pub const DISCOVERY_COMPLETED: Code = Code::new("I011");

    // Analysis success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const DOCUMENT_ANALYZED: Code = Code::new("I021");

    // Batch success codes
    pub const BATCH_COMPLETED: Code = Code::new("I030");
    pub const REPORT_WRITTEN: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
        );

        // Lexicon errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "Lexicon",
                Severity::Critical,
                false,
                true,
                "Word-list file not found",
                "Check the word-list path; all three lists are required",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "Lexicon",
                Severity::Critical,
                false,
                true,
                "Word-list file unreadable or not valid UTF-8",
                "Verify permissions and encoding of the word list",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "Lexicon",
                Severity::Critical,
                false,
                true,
                "Word list contains no usable words",
                "Populate the word list; scoring needs all three sets",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "Lexicon",
                Severity::High,
                false,
                true,
                "Word list exceeds entry limit",
                "Trim the word list below the configured limit",
            ),
        );

        // Document errors
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "Documents",
                Severity::Medium,
                true,
                false,
                "Document file not found",
                "Check the document path",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "Documents",
                Severity::Medium,
                true,
                false,
                "Document file could not be read",
                "Verify file permissions",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "Documents",
                Severity::Medium,
                true,
                false,
                "Document exceeds the size limit",
                "Split the document or raise the limit",
            ),
        );
        registry.insert(
            "E013",
            ErrorMetadata::new(
                "E013",
                "Documents",
                Severity::Medium,
                true,
                false,
                "Document is not valid UTF-8",
                "Re-encode the document as UTF-8",
            ),
        );
        registry.insert(
            "E014",
            ErrorMetadata::new(
                "E014",
                "Documents",
                Severity::Low,
                true,
                false,
                "Document file is empty",
                "Remove the empty file from the input set",
            ),
        );

        // Tokenization errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Tokenization",
                Severity::Medium,
                true,
                false,
                "Token count exceeds the per-document limit",
                "Split the document or raise the token limit",
            ),
        );

        // Analysis errors
        registry.insert(
            "E030",
            ErrorMetadata::new(
                "E030",
                "Analysis",
                Severity::Low,
                true,
                false,
                "Document produced no tokens or no sentences",
                "Skip the document; there is nothing to score",
            ),
        );
        registry.insert(
            "E031",
            ErrorMetadata::new(
                "E031",
                "Analysis",
                Severity::Medium,
                true,
                false,
                "Tokenization failed for the document",
                "Inspect the document contents",
            ),
        );
        registry.insert(
            "E032",
            ErrorMetadata::new(
                "E032",
                "Analysis",
                Severity::Medium,
                true,
                false,
                "Document rejected by the engine size limit",
                "Split the document before analysis",
            ),
        );

        // Batch errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Batch",
                Severity::High,
                false,
                true,
                "Input directory not found",
                "Check the directory path",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Batch",
                Severity::High,
                false,
                true,
                "No text documents found in directory",
                "Point at a directory containing .txt files",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Batch",
                Severity::High,
                false,
                true,
                "Document count exceeds the batch limit",
                "Process the input in smaller batches",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Batch",
                Severity::Critical,
                false,
                true,
                "Worker thread panicked during batch processing",
                "File a bug report with the input that triggered it",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for an error code
pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity (defaults to Medium for unknown codes)
pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get error category
pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|m| m.category).unwrap_or("Unknown")
}

/// Get error description
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action
pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check if an error is recoverable at the batch level
pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|m| m.recoverable).unwrap_or(false)
}

/// Check if an error requires halting processing
pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map(|m| m.requires_halt).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        let code = lexicon::LIST_NOT_FOUND;
        assert_eq!(code.as_str(), "E005");
        assert_eq!(format!("{}", code), "E005");
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(get_category("E005"), "Lexicon");
        assert_eq!(get_category("E030"), "Analysis");
        assert_eq!(get_description("UNKNOWN"), "Unknown error");
    }

    #[test]
    fn test_recoverability_split() {
        // Lexicon failures are fatal at startup
        assert!(!is_recoverable(lexicon::LIST_NOT_FOUND.as_str()));
        assert!(requires_halt(lexicon::LIST_NOT_FOUND.as_str()));

        // Per-document analysis failures are recoverable at the batch level
        assert!(is_recoverable(analysis::EMPTY_DOCUMENT.as_str()));
        assert!(!requires_halt(analysis::EMPTY_DOCUMENT.as_str()));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical < Severity::Low);
        assert_eq!(get_severity(system::INTERNAL_ERROR.as_str()), Severity::Critical);
        assert_eq!(get_severity(analysis::EMPTY_DOCUMENT.as_str()), Severity::Low);
    }

    #[test]
    fn test_all_error_codes_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexicon::LIST_NOT_FOUND,
            lexicon::LIST_UNREADABLE,
            lexicon::LIST_EMPTY,
            lexicon::LIST_TOO_LARGE,
            documents::DOCUMENT_NOT_FOUND,
            documents::DOCUMENT_UNREADABLE,
            documents::DOCUMENT_TOO_LARGE,
            documents::INVALID_ENCODING,
            documents::EMPTY_DOCUMENT_FILE,
            tokenization::TOO_MANY_TOKENS,
            analysis::EMPTY_DOCUMENT,
            analysis::TOKENIZATION_FAILURE,
            analysis::DOCUMENT_TOO_LARGE,
            batch::DIRECTORY_NOT_FOUND,
            batch::NO_DOCUMENTS_FOUND,
            batch::TOO_MANY_DOCUMENTS,
            batch::THREAD_ERROR,
        ];

        for code in codes {
            assert!(
                get_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }
}
