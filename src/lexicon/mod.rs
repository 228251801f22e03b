//! Lexicon store: the three immutable word sets driving all scoring
//!
//! A `Lexicon` holds positive, negative and stop-word sets, built once at
//! startup and shared read-only across analysis workers. Membership tests
//! are case-insensitive; entries are lowercased at load.

use crate::config::constants::limits::lexicon::{MAX_LIST_ENTRIES, MAX_LIST_FILE_BYTES};
use crate::logging::codes;
use crate::{log_debug, log_success};
use std::collections::HashSet;
use std::path::Path;

/// Which of the three word lists an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Positive,
    Negative,
    Stopwords,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Positive => "positive",
            ListKind::Negative => "negative",
            ListKind::Stopwords => "stopwords",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexicon loading errors; all fatal at startup, scoring is meaningless
/// without the full lexicon
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexiconError {
    #[error("Word list not found: {kind} ({path})")]
    ListNotFound { kind: ListKind, path: String },

    #[error("Word list unreadable: {kind} ({message})")]
    ListUnreadable { kind: ListKind, message: String },

    #[error("Word list is empty: {kind}")]
    EmptyList { kind: ListKind },

    #[error("Word list too large: {kind} has {entries} entries (max: {max})")]
    TooManyEntries {
        kind: ListKind,
        entries: usize,
        max: usize,
    },

    #[error("Word list file too large: {kind} is {size} bytes (max: {max})")]
    FileTooLarge { kind: ListKind, size: u64, max: u64 },
}

impl LexiconError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexiconError::ListNotFound { .. } => codes::lexicon::LIST_NOT_FOUND,
            LexiconError::ListUnreadable { .. } => codes::lexicon::LIST_UNREADABLE,
            LexiconError::EmptyList { .. } => codes::lexicon::LIST_EMPTY,
            LexiconError::TooManyEntries { .. } | LexiconError::FileTooLarge { .. } => {
                codes::lexicon::LIST_TOO_LARGE
            }
        }
    }
}

/// The three immutable word sets
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    stopwords: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from three word-list line iterators.
    ///
    /// Blank lines are skipped, surrounding whitespace is trimmed, and
    /// duplicates collapse via set semantics. Every entry is lowercased so
    /// membership tests can normalize the probe instead of the whole text.
    pub fn load<P, N, S>(positive: P, negative: N, stopwords: S) -> Result<Self, LexiconError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let positive = build_set(positive, ListKind::Positive)?;
        let negative = build_set(negative, ListKind::Negative)?;
        let stopwords = build_set(stopwords, ListKind::Stopwords)?;

        log_success!(
            codes::success::LEXICON_LOADED,
            "Lexicon loaded",
            "positive_words" => positive.len(),
            "negative_words" => negative.len(),
            "stop_words" => stopwords.len()
        );

        Ok(Self {
            positive,
            negative,
            stopwords,
        })
    }

    /// Build a lexicon from three word-list files, one word per line.
    pub fn load_from_files(
        positive_path: &Path,
        negative_path: &Path,
        stopwords_path: &Path,
    ) -> Result<Self, LexiconError> {
        let positive = read_list_file(positive_path, ListKind::Positive)?;
        let negative = read_list_file(negative_path, ListKind::Negative)?;
        let stopwords = read_list_file(stopwords_path, ListKind::Stopwords)?;

        Self::load(positive.lines(), negative.lines(), stopwords.lines())
    }

    /// Case-insensitive membership test against the positive set
    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(&word.to_lowercase())
    }

    /// Case-insensitive membership test against the negative set
    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(&word.to_lowercase())
    }

    /// Case-insensitive membership test against the stop-word set
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }

    pub fn stopword_len(&self) -> usize {
        self.stopwords.len()
    }
}

/// Collect, normalize and bound-check one word list
fn build_set<I>(lines: I, kind: ListKind) -> Result<HashSet<String>, LexiconError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut set = HashSet::new();

    for line in lines {
        let word = line.as_ref().trim();
        if word.is_empty() {
            continue;
        }

        set.insert(word.to_lowercase());

        if set.len() > MAX_LIST_ENTRIES {
            return Err(LexiconError::TooManyEntries {
                kind,
                entries: set.len(),
                max: MAX_LIST_ENTRIES,
            });
        }
    }

    if set.is_empty() {
        return Err(LexiconError::EmptyList { kind });
    }

    log_debug!("Word list built",
        "list" => kind,
        "entries" => set.len()
    );

    Ok(set)
}

/// Read a word-list file with existence, size and encoding checks
fn read_list_file(path: &Path, kind: ListKind) -> Result<String, LexiconError> {
    if !path.exists() {
        return Err(LexiconError::ListNotFound {
            kind,
            path: path.display().to_string(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|e| LexiconError::ListUnreadable {
        kind,
        message: e.to_string(),
    })?;

    if metadata.len() > MAX_LIST_FILE_BYTES {
        return Err(LexiconError::FileTooLarge {
            kind,
            size: metadata.len(),
            max: MAX_LIST_FILE_BYTES,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| LexiconError::ListUnreadable {
        kind,
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|_| LexiconError::ListUnreadable {
        kind,
        message: "not valid UTF-8".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn sample_lexicon() -> Lexicon {
        Lexicon::load(
            ["good", "great"],
            ["bad"],
            ["the", "a", "at"],
        )
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_membership() {
        let lexicon = sample_lexicon();

        assert!(lexicon.is_positive("Good"));
        assert!(lexicon.is_positive("GREAT"));
        assert!(lexicon.is_negative("Bad"));
        assert!(lexicon.is_stopword("The"));
        assert!(!lexicon.is_positive("bad"));
        assert!(!lexicon.is_stopword("good"));
    }

    #[test]
    fn test_blank_lines_and_duplicates() {
        let lexicon = Lexicon::load(
            ["good", "", "  ", "good", "Good"],
            ["bad"],
            ["the"],
        )
        .unwrap();

        assert_eq!(lexicon.positive_len(), 1);
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = Lexicon::load(["good"], Vec::<&str>::new(), ["the"]);
        assert_matches!(
            result,
            Err(LexiconError::EmptyList {
                kind: ListKind::Negative
            })
        );
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let pos = dir.path().join("positive.txt");
        let neg = dir.path().join("negative.txt");
        let stop = dir.path().join("stopwords.txt");

        fs::write(&pos, "good\ngreat\n").unwrap();
        fs::write(&neg, "bad\nawful\n").unwrap();
        fs::write(&stop, "the\na\n\n").unwrap();

        let lexicon = Lexicon::load_from_files(&pos, &neg, &stop).unwrap();
        assert_eq!(lexicon.positive_len(), 2);
        assert_eq!(lexicon.negative_len(), 2);
        assert_eq!(lexicon.stopword_len(), 2);
    }

    #[test]
    fn test_missing_list_file() {
        let dir = tempdir().unwrap();
        let pos = dir.path().join("positive.txt");
        let neg = dir.path().join("negative.txt");
        let stop = dir.path().join("missing.txt");

        fs::write(&pos, "good\n").unwrap();
        fs::write(&neg, "bad\n").unwrap();

        let result = Lexicon::load_from_files(&pos, &neg, &stop);
        assert_matches!(
            result,
            Err(LexiconError::ListNotFound {
                kind: ListKind::Stopwords,
                ..
            })
        );
    }

    #[test]
    fn test_invalid_utf8_list() {
        let dir = tempdir().unwrap();
        let pos = dir.path().join("positive.txt");
        let neg = dir.path().join("negative.txt");
        let stop = dir.path().join("stopwords.txt");

        fs::write(&pos, [0xff, 0xfe, 0x00]).unwrap();
        fs::write(&neg, "bad\n").unwrap();
        fs::write(&stop, "the\n").unwrap();

        let result = Lexicon::load_from_files(&pos, &neg, &stop);
        assert_matches!(
            result,
            Err(LexiconError::ListUnreadable {
                kind: ListKind::Positive,
                ..
            })
        );
    }
}
