// Internal modules
pub mod batch;
pub mod config;
pub mod documents;
pub mod engine;
pub mod lexicon;
#[macro_use]
pub mod logging;
pub mod pronouns;
pub mod report;
pub mod syllable;
pub mod tokenizer;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults, DocumentFailure};
pub use engine::{compute, AnalysisError, MetricsRecord};
pub use lexicon::{Lexicon, LexiconError};

// Re-export report output for downstream consumers
pub use report::BatchReport;
