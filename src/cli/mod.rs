//! CLI adapter for the corpus loader
//!
//! A thin clap front-end over `core/`. It adds no loading semantics
//! of its own: options from the command line are layered over the
//! loaded [`Config`](crate::core::config::Config) and handed to the
//! loader.

pub mod commands;
pub mod output;

use crate::core::config::{Config, LogFormat, LoggingConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// corpus - load directories of text documents
///
/// Enumerates matching files in path order, reads them as UTF-8 and
/// reports every file that had to be skipped.
#[derive(Parser, Debug)]
#[command(name = "corpus")]
#[command(version)]
#[command(about = "Deterministic document corpus loader", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a directory and list its documents
    Load(commands::LoadArgs),

    /// Show the effective configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  corpus completions bash > ~/.local/share/bash-completion/completions/corpus
    ///   zsh:   corpus completions zsh > ~/.zfunc/_corpus
    ///   fish:  corpus completions fish > ~/.config/fish/completions/corpus.fish
    Completions(commands::CompletionsArgs),
}

/// Install the global tracing subscriber (logs go to stderr)
///
/// RUST_LOG takes precedence over the configured filter. Calling this
/// more than once is harmless.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Handle completions command early (doesn't need config)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;
    init_tracing(&config.logging);
    config.log_config();

    match cli.command {
        Commands::Load(args) => commands::load::execute(args, &config, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
