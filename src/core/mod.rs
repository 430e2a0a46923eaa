//! Core loader logic (front-end agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Fatal errors, per-file skip reasons, Result alias
//! - **types**: Document and report structures
//! - **xdg**: XDG config directory handling
//! - **loader**: Directory walking, file reading, lazy corpus

pub mod config;
pub mod error;
pub mod loader;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::{Config, LoaderConfig};
pub use error::{CorpusError, Result, SkipReason};
pub use loader::{load, Corpus, CorpusLoader};
