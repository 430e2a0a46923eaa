//! Domain data structures produced by the loader.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::error::SkipReason;

/// One ingested text file.
///
/// Fields are private: a `Document` is an immutable snapshot of the
/// file at load time, and `byte_length` always equals the UTF-8
/// length of `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    path: PathBuf,
    content: String,
    byte_length: u64,
    content_type: &'static str,
    loaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a document stamped with the current time
    pub fn new(path: PathBuf, content: String, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            byte_length: content.len() as u64,
            content_type: content_type_for(&path),
            path,
            content,
            loaded_at: Utc::now(),
            modified,
        }
    }

    /// Path relative to the loaded root directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn byte_length(&self) -> u64 {
        self.byte_length
    }

    /// MIME type implied by the file suffix
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Last modification time reported by the filesystem
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Consume the document, returning its content
    pub fn into_content(self) -> String {
        self.content
    }
}

/// `text/markdown` for markdown suffixes, `text/plain` for everything else
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("md" | "markdown") => "text/markdown",
        _ => "text/plain",
    }
}

/// A file (or subdirectory) that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// Statistics for one pass over a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub bytes_loaded: u64,
    pub duration_ms: u64,
}

/// Eagerly collected result of one pass
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
    pub stats: LoadStats,
}
