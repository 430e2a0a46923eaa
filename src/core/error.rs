//! Error types for the corpus loader.
//!
//! Two layers of failure exist. [`CorpusError`] is fatal: the load
//! aborts and the caller gets nothing but the error. [`SkipReason`]
//! is per-file: the offending file is left out of the sequence and
//! recorded in the skip list, and the scan carries on.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Fatal errors that abort a load entirely
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Directory not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl CorpusError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if the requested directory does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CorpusError::NotFound(_))
    }

    /// Check if this is a bad input error (wrong path kind or config)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            CorpusError::NotADirectory(_) | CorpusError::ConfigError(_) | CorpusError::TomlError(_)
        )
    }
}

/// Why a single file was left out of the corpus
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("permission denied")]
    Permission,

    #[error("file size {size} bytes exceeds limit of {limit} bytes")]
    SizeLimit { size: u64, limit: u64 },

    #[error("invalid UTF-8 at byte offset {valid_up_to}")]
    Encoding { valid_up_to: usize },

    #[error("read failed: {message}")]
    Io { message: String },
}

impl SkipReason {
    /// Classify an I/O error raised while reading a file
    pub fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => SkipReason::Permission,
            _ => SkipReason::Io {
                message: err.to_string(),
            },
        }
    }

    /// Short machine-readable label, e.g. for summaries
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Permission => "permission",
            SkipReason::SizeLimit { .. } => "size_limit",
            SkipReason::Encoding { .. } => "encoding",
            SkipReason::Io { .. } => "io",
        }
    }
}
