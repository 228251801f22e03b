//! Document discovery and loading
//!
//! Feeds the engine `(document_id, raw_text)` pairs from the filesystem.
//! Discovery walks a directory for `.txt` files (optionally recursive) and
//! sorts the result so batch runs are deterministic. Loading validates
//! existence, size and UTF-8 encoding before any text reaches the
//! tokenizer; the document id is the file stem.

use crate::config::constants::limits::documents::{LARGE_DOCUMENT_THRESHOLD, MAX_DOCUMENT_BYTES};
use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use std::path::{Path, PathBuf};

/// A loaded document ready for analysis
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Document loading errors; recoverable per document inside a batch,
/// fatal when the document was the sole explicit input
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {path}")]
    NotFound { path: String },

    #[error("Document unreadable: {path} ({message})")]
    Unreadable { path: String, message: String },

    #[error("Document too large: {path} is {size} bytes (max: {max})")]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("Document is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },

    #[error("Document file is empty: {path}")]
    EmptyFile { path: String },
}

impl DocumentError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DocumentError::NotFound { .. } => codes::documents::DOCUMENT_NOT_FOUND,
            DocumentError::Unreadable { .. } => codes::documents::DOCUMENT_UNREADABLE,
            DocumentError::TooLarge { .. } => codes::documents::DOCUMENT_TOO_LARGE,
            DocumentError::InvalidEncoding { .. } => codes::documents::INVALID_ENCODING,
            DocumentError::EmptyFile { .. } => codes::documents::EMPTY_DOCUMENT_FILE,
        }
    }
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// Collect the `.txt` files under `dir`, sorted by path.
pub fn discover_documents(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, DocumentError> {
    let mut paths = Vec::new();
    collect_txt_files(dir, recursive, &mut paths)?;
    paths.sort();

    log_success!(codes::success::DISCOVERY_COMPLETED, "Document discovery completed",
        "directory" => dir.display(),
        "documents" => paths.len()
    );

    Ok(paths)
}

fn collect_txt_files(
    dir: &Path,
    recursive: bool,
    paths: &mut Vec<PathBuf>,
) -> Result<(), DocumentError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocumentError::Unreadable {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| DocumentError::Unreadable {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_txt_files(&path, recursive, paths)?;
            }
        } else if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            paths.push(path);
        }
    }

    Ok(())
}

// ============================================================================
// LOADING
// ============================================================================

/// Derive a document id from a path: the file stem, or the full file name
/// when there is no stem.
pub fn document_id_for(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and validate a single document file.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound {
            path: path.display().to_string(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|e| DocumentError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if metadata.len() > MAX_DOCUMENT_BYTES as u64 {
        return Err(DocumentError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            max: MAX_DOCUMENT_BYTES as u64,
        });
    }

    if metadata.len() > LARGE_DOCUMENT_THRESHOLD as u64 {
        log_warning!("Large document",
            "path" => path.display(),
            "size_bytes" => metadata.len()
        );
    }

    let bytes = std::fs::read(path).map_err(|e| DocumentError::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if bytes.is_empty() {
        return Err(DocumentError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let text = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidEncoding {
        path: path.display().to_string(),
    })?;

    let id = document_id_for(path);

    log_debug!("Document loaded",
        "document_id" => id,
        "size_bytes" => text.len()
    );

    Ok(Document { id, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("article-1.txt");
        fs::write(&path, "Some honest text.").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.id, "article-1");
        assert_eq!(doc.text, "Some honest text.");
    }

    #[test]
    fn test_missing_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        assert_matches!(
            load_document(&path),
            Err(DocumentError::NotFound { .. })
        );
    }

    #[test]
    fn test_empty_document_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert_matches!(
            load_document(&path),
            Err(DocumentError::EmptyFile { .. })
        );
    }

    #[test]
    fn test_invalid_encoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert_matches!(
            load_document(&path),
            Err(DocumentError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_discovery_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();

        let paths = discover_documents(dir.path(), false).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_discovery_recursion() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("inner");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("top.txt"), "top").unwrap();
        fs::write(nested.join("deep.txt"), "deep").unwrap();

        let flat = discover_documents(dir.path(), false).unwrap();
        assert_eq!(flat.len(), 1);

        let deep = discover_documents(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_document_id_from_stem() {
        assert_eq!(document_id_for(Path::new("/tmp/docs/article-9.txt")), "article-9");
        assert_eq!(document_id_for(Path::new("plain")), "plain");
    }
}
