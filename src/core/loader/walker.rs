//! Directory walker with extension and pattern filtering.
//!
//! Enumerates candidate files under a root directory. Directory-level
//! problems below the root (an unreadable subdirectory, a symlink loop)
//! are recorded and the walk continues; problems with the root itself
//! are fatal.

use glob::Pattern;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::{expand_extension, LoaderConfig};
use crate::core::error::{CorpusError, Result, SkipReason};
use crate::core::types::SkippedFile;

/// Candidate files found by one walk
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Paths relative to the root, sorted
    pub files: Vec<PathBuf>,

    /// Entries the walk could not descend into or inspect
    pub skipped: Vec<SkippedFile>,
}

/// File system walker filtered by extension and exclude globs
#[derive(Debug, Clone)]
pub struct FileWalker {
    /// Allowed lowercase suffixes (aliases included), without the leading dot
    extensions: BTreeSet<String>,

    /// Patterns to exclude (e.g., "drafts/**", "*.tmp.md")
    exclude_patterns: Vec<Pattern>,

    recursive: bool,
    follow_links: bool,
}

impl FileWalker {
    /// Create a walker from loader options
    ///
    /// # Returns
    ///
    /// A new `FileWalker` or an error if an exclude pattern is invalid
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let exclude = config
            .exclude_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    CorpusError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions: config
                .extensions
                .iter()
                .flat_map(|e| expand_extension(e))
                .collect(),
            exclude_patterns: exclude,
            recursive: config.recursive,
            follow_links: config.follow_links,
        })
    }

    /// Collect all matching files under `root`
    ///
    /// Fails with `NotFound` if `root` does not exist, `NotADirectory`
    /// if it is not a directory, and `PermissionDenied` if it cannot
    /// be listed.
    pub fn collect_files(&self, root: &Path) -> Result<WalkOutcome> {
        check_root(root)?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut outcome = WalkOutcome::default();

        for entry in WalkDir::new(root)
            .follow_links(self.follow_links)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let relative = relative_to(root, entry.path());
                    if self.matches(&relative) {
                        outcome.files.push(relative);
                    }
                }
                Err(e) => {
                    if e.depth() == 0 {
                        return Err(root_error(root, e.into()));
                    }

                    let path = e
                        .path()
                        .map(|p| relative_to(root, p))
                        .unwrap_or_default();
                    let reason = match e.io_error() {
                        Some(io_err) => SkipReason::from_io(io_err),
                        None => SkipReason::Io {
                            message: e.to_string(),
                        },
                    };
                    tracing::warn!("Walk error at {:?}: {}", path, reason);
                    outcome.skipped.push(SkippedFile::new(path, reason));
                }
            }
        }

        outcome.files.sort();
        Ok(outcome)
    }

    /// Decide whether to descend into / yield an entry
    ///
    /// The root is never filtered. Hidden directories and directories
    /// matching an exclude pattern are pruned.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root {
            return true;
        }

        if !entry.file_type().is_dir() {
            return true;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                return false;
            }
        }

        let relative = relative_to(root, path);
        if self.is_excluded(&relative) {
            tracing::debug!("Skipping excluded directory: {:?}", relative);
            return false;
        }

        true
    }

    /// Check a relative file path against extensions and excludes
    fn matches(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        let name = name.to_lowercase();
        let allowed = self.extensions.iter().any(|ext| has_suffix(&name, ext));
        allowed && !self.is_excluded(relative)
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let name = relative.file_name().and_then(|n| n.to_str());
        self.exclude_patterns.iter().any(|p| {
            p.matches_path(relative) || name.map(|n| p.matches(n)).unwrap_or(false)
        })
    }
}

/// True if `name` ends in `.ext` with a non-empty stem
///
/// Both sides are expected lowercase.
fn has_suffix(name: &str, ext: &str) -> bool {
    name.strip_suffix(ext)
        .and_then(|rest| rest.strip_suffix('.'))
        .map(|stem| !stem.is_empty())
        .unwrap_or(false)
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|e| root_error(root, e))?;
    if !metadata.is_dir() {
        return Err(CorpusError::NotADirectory(root.display().to_string()));
    }
    Ok(())
}

fn root_error(root: &Path, err: io::Error) -> CorpusError {
    match err.kind() {
        io::ErrorKind::NotFound => CorpusError::NotFound(root.display().to_string()),
        io::ErrorKind::PermissionDenied => {
            CorpusError::PermissionDenied(root.display().to_string())
        }
        _ => CorpusError::IoError(err),
    }
}
