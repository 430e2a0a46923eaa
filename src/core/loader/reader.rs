//! Reads a single candidate file into a [`Document`].
//!
//! Every failure here is per-file and comes back as a [`SkipReason`]
//! rather than a crate error.

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::core::error::SkipReason;
use crate::core::types::Document;

/// Per-file reader enforcing the size limit and UTF-8 decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader {
    max_file_bytes: Option<u64>,
}

impl FileReader {
    pub fn new(max_file_bytes: Option<u64>) -> Self {
        Self { max_file_bytes }
    }

    /// Read `root/relative` into a document keyed by `relative`
    pub fn read(&self, root: &Path, relative: &Path) -> Result<Document, SkipReason> {
        let full = root.join(relative);

        let metadata = fs::metadata(&full).map_err(|e| SkipReason::from_io(&e))?;
        if let Some(limit) = self.max_file_bytes {
            if metadata.len() > limit {
                return Err(SkipReason::SizeLimit {
                    size: metadata.len(),
                    limit,
                });
            }
        }

        let bytes = self.read_bytes(&full)?;
        let content = String::from_utf8(bytes).map_err(|e| SkipReason::Encoding {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;

        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        Ok(Document::new(relative.to_path_buf(), content, modified))
    }

    /// Read the file, never buffering more than one byte past the limit
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, SkipReason> {
        let file = File::open(path).map_err(|e| SkipReason::from_io(&e))?;
        let mut bytes = Vec::new();

        match self.max_file_bytes {
            Some(limit) => {
                file.take(limit.saturating_add(1))
                    .read_to_end(&mut bytes)
                    .map_err(|e| SkipReason::from_io(&e))?;
                // File grew between stat and read
                if bytes.len() as u64 > limit {
                    return Err(SkipReason::SizeLimit {
                        size: bytes.len() as u64,
                        limit,
                    });
                }
            }
            None => {
                let mut file = file;
                file.read_to_end(&mut bytes)
                    .map_err(|e| SkipReason::from_io(&e))?;
            }
        }

        Ok(bytes)
    }
}
