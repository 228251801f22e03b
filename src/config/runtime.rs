// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Runtime log level selectable by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level emitted by the global logger
    pub min_log_level: LogLevel,

    /// Whether to emit JSON events instead of plain text
    pub use_structured_logging: bool,

    /// Whether console logging is enabled at all
    pub enable_console_logging: bool,

    /// Whether per-document timing events are logged
    pub log_timing_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("TEXTMETRICS_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or_default(),
            use_structured_logging: env::var("TEXTMETRICS_STRUCTURED_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("TEXTMETRICS_CONSOLE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_timing_events: env::var("TEXTMETRICS_LOG_TIMING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPreferences {
    /// Maximum worker threads for parallel analysis
    pub max_threads: usize,

    /// Whether to print per-document progress lines
    pub progress_reporting: bool,

    /// Whether to stop the batch on the first failed document
    pub fail_fast: bool,

    /// Whether directory discovery descends into subdirectories
    pub recursive_discovery: bool,
}

impl Default for BatchPreferences {
    fn default() -> Self {
        Self {
            max_threads: env::var("TEXTMETRICS_MAX_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    std::thread::available_parallelism()
                        .map(|n| n.get().min(8))
                        .unwrap_or(4)
                }),
            progress_reporting: env::var("TEXTMETRICS_PROGRESS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            fail_fast: env::var("TEXTMETRICS_FAIL_FAST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            recursive_discovery: env::var("TEXTMETRICS_RECURSIVE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Configuration file contents for the CLI (`--config analyzer.toml`)
///
/// Every section is optional; unset sections fall back to environment
/// variables and then to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub logging: Option<LoggingPreferences>,

    #[serde(default)]
    pub batch: Option<BatchPreferences>,

    /// Paths to the three lexicon word lists
    #[serde(default)]
    pub lexicon: Option<LexiconPaths>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconPaths {
    pub positive: String,
    pub negative: String,
    pub stopwords: String,
}

/// Errors loading a TOML configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    #[error("Config file unreadable: {message}")]
    Unreadable { message: String },

    #[error("Config file invalid: {message}")]
    Invalid { message: String },
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            message: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })
    }

    pub fn logging_preferences(&self) -> LoggingPreferences {
        self.logging.clone().unwrap_or_default()
    }

    pub fn batch_preferences(&self) -> BatchPreferences {
        self.batch.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("nope"), None);
    }

    #[test]
    fn test_batch_preferences_default() {
        let prefs = BatchPreferences::default();
        assert!(prefs.max_threads >= 1);
        assert!(prefs.recursive_discovery);
    }

    #[test]
    fn test_file_config_missing() {
        let result = FileConfig::from_path(std::path::Path::new("/nonexistent/analyzer.toml"));
        assert_matches!(result, Err(ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_file_config_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[batch]\nmax_threads = 2\nprogress_reporting = false\nfail_fast = true\nrecursive_discovery = false\n\n\
             [lexicon]\npositive = \"pos.txt\"\nnegative = \"neg.txt\"\nstopwords = \"stop.txt\"\n"
        )
        .unwrap();

        let config = FileConfig::from_path(file.path()).unwrap();
        let batch = config.batch_preferences();
        assert_eq!(batch.max_threads, 2);
        assert!(batch.fail_fast);
        assert!(!batch.recursive_discovery);

        let lexicon = config.lexicon.unwrap();
        assert_eq!(lexicon.positive, "pos.txt");
    }

    #[test]
    fn test_file_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[[not toml").unwrap();

        let result = FileConfig::from_path(file.path());
        assert_matches!(result, Err(ConfigError::Invalid { .. }));
    }
}
