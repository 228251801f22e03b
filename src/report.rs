//! JSON batch report
//!
//! Serializes the outcome of a batch run: one `MetricsRecord` per clean
//! document, plus the id, error code and message for every failure. The
//! record field names are the stable persisted schema; consumers key rows
//! by `document_id`.

use crate::batch::BatchResults;
use crate::engine::MetricsRecord;
use crate::log_success;
use crate::logging::codes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A failed document as persisted in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedDocument {
    pub document_id: String,
    pub error_code: String,
    pub message: String,
}

/// The full serialized output of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub documents_processed: usize,
    pub duration_ms: u64,
    pub success_rate: f64,
    pub records: Vec<MetricsRecord>,
    pub failures: Vec<FailedDocument>,
}

/// Report writing errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report could not be written: {path} ({message})")]
    Io { path: String, message: String },
}

impl BatchReport {
    /// Build a report from batch results, stamped with the current time.
    pub fn from_results(results: &BatchResults) -> Self {
        Self {
            generated_at: Utc::now(),
            documents_processed: results.documents_processed,
            duration_ms: results.duration.as_millis() as u64,
            success_rate: results.success_rate(),
            records: results
                .successful
                .iter()
                .map(|(_, record)| record.clone())
                .collect(),
            failures: results
                .failed
                .iter()
                .map(|(id, failure)| FailedDocument {
                    document_id: id.clone(),
                    error_code: failure.error_code().as_str().to_string(),
                    message: failure.to_string(),
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize and write the report to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json_pretty()?;

        std::fs::write(path, json).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        log_success!(codes::success::REPORT_WRITTEN, "Report written",
            "path" => path.display(),
            "records" => self.records.len(),
            "failures" => self.failures.len()
        );

        Ok(())
    }
}
