//! Corpus loading module.
//!
//! Turns a directory of text documents into an ordered, restartable
//! sequence of [`Document`](crate::core::types::Document) records:
//!
//! - `walker`: directory enumeration with extension and glob filters
//! - `reader`: per-file reading, size limit and UTF-8 decoding
//! - `corpus`: the loader and the lazy `Corpus` / `Documents` sequence
//!
//! Only the root directory can fail a load. Anything that goes wrong
//! with an individual file is recorded as a
//! [`SkippedFile`](crate::core::types::SkippedFile) and the pass
//! continues.

pub mod corpus;
pub mod reader;
pub mod walker;

pub use corpus::{load, Corpus, CorpusLoader, Documents};
pub use reader::FileReader;
pub use walker::{FileWalker, WalkOutcome};
