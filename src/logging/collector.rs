//! Error collector for batch document processing with cargo-style output
//!
//! Provides organized event collection and reporting for parallel document
//! analysis, keyed by document id.

use super::events::LogEvent;
use crate::config::constants::limits::logging::{LOG_BUFFER_SIZE, MAX_LOG_EVENTS_PER_DOCUMENT};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// DOCUMENT PROCESSING CONTEXT
// ============================================================================

/// Context information for a document being analyzed
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub document_id: String,
    pub ordinal: usize,
    pub start_time: Instant,
}

impl DocumentContext {
    pub fn new(document_id: String, ordinal: usize) -> Self {
        Self {
            document_id,
            ordinal,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of batch processing results
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_documents: usize,
    pub successful_documents: usize,
    pub failed_documents: usize,
    pub documents_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_documents == 0 {
            0.0
        } else {
            self.successful_documents as f64 / self.total_documents as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe event collector for batch processing
pub struct ErrorCollector {
    /// Events organized by document id for cargo-style output
    document_events: Mutex<BTreeMap<String, Vec<LogEvent>>>,

    /// Processing contexts for timing information
    document_contexts: Mutex<BTreeMap<String, DocumentContext>>,

    /// Global processing start time
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            document_events: Mutex::new(BTreeMap::new()),
            document_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific document
    pub fn record_event(&self, document_id: &str, event: LogEvent) {
        let mut events = self.document_events.lock().unwrap();

        let doc_events = events.entry(document_id.to_string()).or_default();

        if doc_events.len() < MAX_LOG_EVENTS_PER_DOCUMENT {
            doc_events.push(event);
        } else if doc_events.len() == MAX_LOG_EVENTS_PER_DOCUMENT {
            doc_events.push(LogEvent::warning(&format!(
                "Too many events for document (limit: {})",
                MAX_LOG_EVENTS_PER_DOCUMENT
            )));
        }
    }

    /// Record document processing context
    pub fn record_document_context(&self, context: DocumentContext) {
        let mut contexts = self.document_contexts.lock().unwrap();
        contexts.insert(context.document_id.clone(), context);
    }

    /// Get all events for a specific document
    pub fn get_document_events(&self, document_id: &str) -> Vec<LogEvent> {
        let events = self.document_events.lock().unwrap();
        events.get(document_id).cloned().unwrap_or_default()
    }

    /// Get errors for a specific document
    pub fn get_document_errors(&self, document_id: &str) -> Vec<LogEvent> {
        self.get_document_events(document_id)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    /// Get all document events (for cargo-style output)
    pub fn get_all_document_events(&self) -> BTreeMap<String, Vec<LogEvent>> {
        self.document_events.lock().unwrap().clone()
    }

    /// Check if a document has any errors
    pub fn document_has_errors(&self, document_id: &str) -> bool {
        !self.get_document_errors(document_id).is_empty()
    }

    /// Get ids of documents with at least one error
    pub fn get_documents_with_errors(&self) -> Vec<String> {
        let events = self.document_events.lock().unwrap();
        events
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.is_error()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.document_events.lock().unwrap();

        let mut summary = ProcessingSummary {
            total_documents: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for doc_events in events.values() {
            let has_errors = doc_events.iter().any(|e| e.is_error());
            let has_warnings = doc_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_documents += 1;
            } else if has_warnings {
                summary.documents_with_warnings += 1;
            } else {
                summary.successful_documents += 1;
            }

            for event in doc_events {
                if event.is_error() {
                    summary.total_errors += 1;
                } else if event.is_warning() {
                    summary.total_warnings += 1;
                }
            }
        }

        summary
    }

    /// Clear all collected data
    pub fn clear(&self) {
        self.document_events.lock().unwrap().clear();
        self.document_contexts.lock().unwrap().clear();
    }

    /// Get total event count across all documents
    pub fn total_event_count(&self) -> usize {
        let events = self.document_events.lock().unwrap();
        events.values().map(|v| v.len()).sum()
    }

    /// Check if collector is near capacity
    pub fn is_near_capacity(&self) -> bool {
        self.total_event_count() > (LOG_BUFFER_SIZE * 80 / 100)
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format collected errors grouped by document, cargo-style
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();
    let all_events = collector.get_all_document_events();

    for (document_id, events) in &all_events {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if !error_events.is_empty() || !warning_events.is_empty() {
            output.push_str(&format!("Analyzing {}...\n", document_id));

            for event in error_events {
                output.push_str(&format!(
                    "error[{}]: {}\n",
                    event.code.as_str(),
                    event.message
                ));
                output.push_str(&format!(
                    "  = severity: {}, category: {}\n",
                    event.severity(),
                    event.category()
                ));

                for (key, value) in &event.context {
                    if key != "document_id" {
                        output.push_str(&format!("  = {}: {}\n", key, value));
                    }
                }

                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }

            for event in warning_events {
                output.push_str(&format!(
                    "warning[{}]: {}\n",
                    event.code.as_str(),
                    event.message
                ));
            }

            output.push('\n');
        }
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();

        collector.record_event(
            "doc-1",
            LogEvent::error(codes::analysis::EMPTY_DOCUMENT, "empty document"),
        );

        assert_eq!(collector.get_document_events("doc-1").len(), 1);
        assert!(collector.document_has_errors("doc-1"));
        assert!(!collector.document_has_errors("doc-2"));
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();

        collector.record_event(
            "bad-doc",
            LogEvent::error(codes::documents::INVALID_ENCODING, "Bad encoding"),
        );
        collector.record_event("odd-doc", LogEvent::warning("Suspiciously short"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_documents, 2);
        assert_eq!(summary.failed_documents, 1);
        assert_eq!(summary.documents_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_documents_with_errors() {
        let collector = ErrorCollector::new();

        collector.record_event(
            "failing",
            LogEvent::error(codes::analysis::EMPTY_DOCUMENT, "empty document"),
        );
        collector.record_event("clean", LogEvent::info("Analyzed fine"));

        let failing = collector.get_documents_with_errors();
        assert_eq!(failing, vec!["failing".to_string()]);
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();

        collector.record_event(
            "article-3",
            LogEvent::error(codes::analysis::EMPTY_DOCUMENT, "empty document")
                .with_context("tokens", "0"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Analyzing article-3..."));
        assert!(output.contains("error[E030]: empty document"));
        assert!(output.contains("Total errors: 1"));
    }

    #[test]
    fn test_per_document_event_limit() {
        let collector = ErrorCollector::new();

        for i in 0..(MAX_LOG_EVENTS_PER_DOCUMENT + 10) {
            collector.record_event("noisy", LogEvent::info(&format!("event {}", i)));
        }

        let events = collector.get_document_events("noisy");
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_DOCUMENT + 1);
        assert!(events.last().unwrap().is_warning());
    }
}
