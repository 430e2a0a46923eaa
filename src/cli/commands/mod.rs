//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! single subcommand.

pub mod completions;
pub mod config;
pub mod load;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use load::LoadArgs;
