//! Batch analysis over many documents
//!
//! Documents are independent, so the batch runs them either sequentially
//! or chunked across worker threads sharing the read-only lexicon. One
//! document failing never aborts the batch unless fail-fast is set; every
//! failure is recorded with its document id and reported through the
//! error collector.

use crate::config::constants::limits::documents::MAX_DOCUMENTS_PER_BATCH;
use crate::config::runtime::BatchPreferences;
use crate::documents::{self, Document, DocumentError};
use crate::engine::{self, AnalysisError, MetricsRecord};
use crate::lexicon::Lexicon;
use crate::logging::{self, codes};
use crate::{log_error, log_info, log_success};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    pub max_documents: usize,
}

impl BatchConfig {
    pub fn from_preferences(prefs: &BatchPreferences) -> Self {
        Self {
            max_threads: prefs.max_threads.max(1),
            progress_reporting: prefs.progress_reporting,
            fail_fast: prefs.fail_fast,
            max_documents: MAX_DOCUMENTS_PER_BATCH,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_preferences(&BatchPreferences::default())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Batch-level failures that prevent any analysis from happening
#[derive(Debug, Clone, thiserror::Error)]
pub enum BatchError {
    #[error("Input directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No text documents found in: {path}")]
    NoDocumentsFound { path: String },

    #[error("Too many documents: {count} (max: {max})")]
    TooManyDocuments { count: usize, max: usize },

    #[error("Worker thread failure: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::DirectoryNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NoDocumentsFound { .. } => codes::batch::NO_DOCUMENTS_FOUND,
            BatchError::TooManyDocuments { .. } => codes::batch::TOO_MANY_DOCUMENTS,
            BatchError::ThreadError { .. } => codes::batch::THREAD_ERROR,
        }
    }
}

/// Why one document in a batch produced no record
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentFailure {
    #[error(transparent)]
    Load(#[from] DocumentError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl DocumentFailure {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DocumentFailure::Load(e) => e.error_code(),
            DocumentFailure::Analysis(e) => e.error_code(),
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Accumulated batch output: records for the documents that analyzed
/// cleanly, typed failures for the rest
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful: Vec<(String, MetricsRecord)>,
    pub failed: Vec<(String, DocumentFailure)>,
    pub duration: Duration,
    pub documents_processed: usize,
}

impl BatchResults {
    pub fn success_rate(&self) -> f64 {
        if self.documents_processed == 0 {
            0.0
        } else {
            self.successful.len() as f64 / self.documents_processed as f64
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} analyzed, {} failed ({:.0}% success) in {:.2}s",
            self.successful.len(),
            self.failed.len(),
            self.success_rate() * 100.0,
            self.duration.as_secs_f64()
        )
    }
}

// ============================================================================
// DIRECTORY ENTRY POINT
// ============================================================================

/// Discover, load and analyze every `.txt` document under a directory.
pub fn analyze_directory(
    dir: &Path,
    lexicon: Arc<Lexicon>,
    config: &BatchConfig,
    recursive: bool,
) -> Result<BatchResults, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let paths =
        documents::discover_documents(dir, recursive).map_err(|e| BatchError::NoDocumentsFound {
            path: format!("{} ({})", dir.display(), e),
        })?;

    if paths.is_empty() {
        return Err(BatchError::NoDocumentsFound {
            path: dir.display().to_string(),
        });
    }

    if paths.len() > config.max_documents {
        return Err(BatchError::TooManyDocuments {
            count: paths.len(),
            max: config.max_documents,
        });
    }

    log_info!("Starting batch analysis",
        "directory" => dir.display(),
        "documents" => paths.len(),
        "threads" => config.max_threads
    );

    // Load failures join analysis failures in the result set; loading is
    // deferred to the workers so oversized files never sit in memory all
    // at once.
    let docs: Vec<PendingDocument> = paths
        .into_iter()
        .map(|path| PendingDocument::OnDisk(path))
        .collect();

    Ok(run_batch(docs, lexicon, config))
}

/// Analyze documents already loaded in memory.
pub fn analyze_documents(
    docs: Vec<Document>,
    lexicon: Arc<Lexicon>,
    config: &BatchConfig,
) -> BatchResults {
    let pending = docs.into_iter().map(PendingDocument::Loaded).collect();
    run_batch(pending, lexicon, config)
}

// ============================================================================
// EXECUTION
// ============================================================================

/// A unit of batch work: either still a path, or already loaded text
enum PendingDocument {
    OnDisk(std::path::PathBuf),
    Loaded(Document),
}

impl PendingDocument {
    fn id(&self) -> String {
        match self {
            PendingDocument::OnDisk(path) => documents::document_id_for(path),
            PendingDocument::Loaded(doc) => doc.id.clone(),
        }
    }
}

fn run_batch(docs: Vec<PendingDocument>, lexicon: Arc<Lexicon>, config: &BatchConfig) -> BatchResults {
    let start = Instant::now();
    let total = docs.len();

    let mut results = if config.max_threads <= 1 || total <= 1 {
        run_sequential(docs, &lexicon, config)
    } else {
        run_parallel(docs, lexicon.clone(), config)
    };

    results.duration = start.elapsed();

    log_success!(codes::success::BATCH_COMPLETED, "Batch analysis completed",
        "documents" => results.documents_processed,
        "successful" => results.successful.len(),
        "failed" => results.failed.len(),
        "duration_ms" => results.duration.as_millis()
    );

    results
}

/// Load (if needed) and analyze one document, under its document context
fn process_one(doc: PendingDocument, lexicon: &Lexicon, ordinal: usize) -> (String, Result<MetricsRecord, DocumentFailure>) {
    let id = doc.id();

    let outcome = logging::with_document_context(id.clone(), ordinal, || {
        let loaded = match doc {
            PendingDocument::OnDisk(path) => documents::load_document(&path).map_err(|e| {
                log_error!(e.error_code(), "Document load failed",
                    "cause" => e
                );
                DocumentFailure::Load(e)
            })?,
            PendingDocument::Loaded(doc) => doc,
        };

        engine::compute(&loaded.id, &loaded.text, lexicon).map_err(DocumentFailure::Analysis)
    });

    (id, outcome)
}

fn report_progress(config: &BatchConfig, done: usize, total: usize, id: &str, ok: bool) {
    if config.progress_reporting {
        let status = if ok { "ok" } else { "failed" };
        println!("[{}/{}] {} ... {}", done, total, id, status);
    }
}

fn run_sequential(
    docs: Vec<PendingDocument>,
    lexicon: &Lexicon,
    config: &BatchConfig,
) -> BatchResults {
    let total = docs.len();
    let mut results = BatchResults::default();

    for (ordinal, doc) in docs.into_iter().enumerate() {
        let (id, outcome) = process_one(doc, lexicon, ordinal);
        results.documents_processed += 1;

        let ok = outcome.is_ok();
        report_progress(config, results.documents_processed, total, &id, ok);

        match outcome {
            Ok(record) => results.successful.push((id, record)),
            Err(failure) => {
                results.failed.push((id, failure));
                if config.fail_fast {
                    break;
                }
            }
        }
    }

    results
}

fn run_parallel(
    docs: Vec<PendingDocument>,
    lexicon: Arc<Lexicon>,
    config: &BatchConfig,
) -> BatchResults {
    let total = docs.len();
    let thread_count = config.max_threads.min(total);
    let chunk_size = (total + thread_count - 1) / thread_count;

    let results = Arc::new(Mutex::new(BatchResults::default()));
    let stop = Arc::new(AtomicBool::new(false));
    let progress = Arc::new(AtomicUsize::new(0));

    let mut chunks: Vec<Vec<(usize, PendingDocument)>> = Vec::with_capacity(thread_count);
    let mut chunk = Vec::with_capacity(chunk_size);
    for (ordinal, doc) in docs.into_iter().enumerate() {
        chunk.push((ordinal, doc));
        if chunk.len() == chunk_size {
            chunks.push(std::mem::take(&mut chunk));
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }

    let mut handles = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let lexicon = lexicon.clone();
        let results = results.clone();
        let stop = stop.clone();
        let progress = progress.clone();
        let config = config.clone();

        handles.push(std::thread::spawn(move || {
            for (ordinal, doc) in chunk {
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let (id, outcome) = process_one(doc, &lexicon, ordinal);
                let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                let ok = outcome.is_ok();
                report_progress(&config, done, total, &id, ok);

                let mut guard = match results.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.documents_processed += 1;
                match outcome {
                    Ok(record) => guard.successful.push((id, record)),
                    Err(failure) => {
                        guard.failed.push((id, failure));
                        if config.fail_fast {
                            stop.store(true, Ordering::Relaxed);
                        }
                    }
                }
            }
        }));
    }

    for handle in handles {
        if handle.join().is_err() {
            log_error!(
                codes::batch::THREAD_ERROR,
                "Worker thread panicked during batch processing"
            );
        }
    }

    let mut collected = match Arc::try_unwrap(results) {
        Ok(mutex) => match mutex.into_inner() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        },
        Err(shared) => {
            // All workers joined, so the Arc should be unique; fall back
            // to draining through the lock if it is not.
            let mut guard = match shared.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            std::mem::take(&mut *guard)
        }
    };

    // Interleaved worker pushes would otherwise leave report order
    // nondeterministic
    collected.successful.sort_by(|a, b| a.0.cmp(&b.0));
    collected.failed.sort_by(|a, b| a.0.cmp(&b.0));
    collected
}
