//! Corpus loading.
//!
//! `load` walks the directory once and caches the sorted candidate
//! list in a [`Corpus`]. Each call to [`Corpus::iter`] then reads the
//! files lazily from the start, so a corpus can be iterated any number
//! of times in the same order. Per-file failures are recorded on the
//! iterator and never end the sequence early.

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::config::LoaderConfig;
use crate::core::error::Result;
use crate::core::loader::{FileReader, FileWalker};
use crate::core::types::{Document, LoadReport, LoadStats, SkippedFile};

/// Load a directory with the given options
///
/// Shorthand for `CorpusLoader::new(config)?.load(root)`.
pub fn load(root: impl AsRef<Path>, config: &LoaderConfig) -> Result<Corpus> {
    CorpusLoader::new(config)?.load(root.as_ref())
}

/// Builds corpora from directories
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    walker: FileWalker,
    reader: FileReader,
}

impl CorpusLoader {
    /// Create a loader, validating the options
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            walker: FileWalker::new(config)?,
            reader: FileReader::new(config.max_file_bytes),
        })
    }

    /// Enumerate `root` and return a restartable corpus
    ///
    /// Only the directory listing happens here; file contents are read
    /// on iteration.
    pub fn load(&self, root: &Path) -> Result<Corpus> {
        tracing::info!("Scanning {:?}", root);
        let outcome = self.walker.collect_files(root)?;
        tracing::info!("Found {} candidate files", outcome.files.len());

        Ok(Corpus {
            root: root.to_path_buf(),
            files: outcome.files,
            walk_skipped: outcome.skipped,
            reader: self.reader,
        })
    }
}

/// A finite, restartable, lazily read sequence of documents
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    files: Vec<PathBuf>,
    walk_skipped: Vec<SkippedFile>,
    reader: FileReader,
}

impl Corpus {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths in iteration order, relative to the root
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of candidate files (an upper bound on documents yielded)
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Start a fresh pass over the corpus
    pub fn iter(&self) -> Documents<'_> {
        Documents {
            corpus: self,
            position: 0,
            skipped: self.walk_skipped.clone(),
        }
    }

    /// Read every document eagerly and summarise the pass
    pub fn collect_report(&self) -> LoadReport {
        let start = Instant::now();

        let mut iter = self.iter();
        let documents: Vec<Document> = iter.by_ref().collect();
        let skipped = iter.into_skipped();

        let stats = LoadStats {
            files_loaded: documents.len(),
            files_skipped: skipped.len(),
            bytes_loaded: documents.iter().map(Document::byte_length).sum(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Load complete: {} documents loaded, {} skipped, \
             {} bytes in {}ms",
            stats.files_loaded,
            stats.files_skipped,
            stats.bytes_loaded,
            stats.duration_ms
        );

        LoadReport {
            documents,
            skipped,
            stats,
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = Document;
    type IntoIter = Documents<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a [`Corpus`]
#[derive(Debug)]
pub struct Documents<'a> {
    corpus: &'a Corpus,
    position: usize,
    skipped: Vec<SkippedFile>,
}

impl Documents<'_> {
    /// Files skipped so far in this pass
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedFile> {
        self.skipped
    }
}

impl Iterator for Documents<'_> {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        while let Some(relative) = self.corpus.files.get(self.position) {
            self.position += 1;

            match self.corpus.reader.read(&self.corpus.root, relative) {
                Ok(doc) => {
                    tracing::debug!("Loaded {:?} ({} bytes)", relative, doc.byte_length());
                    return Some(doc);
                }
                Err(reason) => {
                    tracing::warn!("Skipping {:?}: {}", relative, reason);
                    self.skipped.push(SkippedFile::new(relative.clone(), reason));
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.corpus.files.len().saturating_sub(self.position);
        (0, Some(remaining))
    }
}

impl FusedIterator for Documents<'_> {}
