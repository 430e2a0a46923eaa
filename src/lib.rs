//! corpus-loader - Deterministic document corpus loading
//!
//! Loads a directory of UTF-8 text documents (`.md` and `.txt`, plus
//! their `.markdown` and `.text` aliases, by default) into immutable [`Document`] records, in path order, as a
//! lazy sequence that can be iterated any number of times.
//!
//! # Architecture
//!
//! - **core**: Loader logic (front-end agnostic)
//!   - config, error, types, xdg
//!   - loader (walking, reading, corpus sequence)
//!
//! - **cli**: clap adapter for the `corpus` binary (depends on core)
//!
//! # Example
//!
//! ```no_run
//! use corpus_loader::{load, LoaderConfig};
//!
//! let corpus = load("docs", &LoaderConfig::default())?;
//! let mut docs = corpus.iter();
//! for doc in docs.by_ref() {
//!     println!("{} ({} bytes)", doc.path().display(), doc.byte_length());
//! }
//! for skipped in docs.skipped() {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//! # Ok::<(), corpus_loader::CorpusError>(())
//! ```

// Core loader logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::{Config, LoaderConfig};
pub use crate::core::error::{CorpusError, Result, SkipReason};
pub use crate::core::loader::{load, Corpus, CorpusLoader, Documents};
pub use crate::core::types::*;
