//! Configuration management for the corpus loader.
//!
//! Handles loading configuration from TOML files and environment
//! variables, with defaults for every setting.

use crate::core::error::{CorpusError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options recognised by a load
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Allowed file suffixes, lowercase and without the leading dot
    #[serde(
        default = "default_extensions",
        deserialize_with = "deserialize_extensions"
    )]
    pub extensions: BTreeSet<String>,

    /// Descend into subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// Upper bound on individual file size (bytes)
    #[serde(default)]
    pub max_file_bytes: Option<u64>,

    /// Glob patterns for files and directories to leave out
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_links: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration (consumed by the binary)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; RUST_LOG wins
    #[serde(default = "default_log_filter")]
    pub filter: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_extensions() -> BTreeSet<String> {
    ["md", "txt"].iter().map(|s| s.to_string()).collect()
}

/// Suffixes that name the same format; configuring one allows the others
const EXTENSION_ALIASES: &[&[&str]] = &[&["md", "markdown"], &["txt", "text"]];

/// Every suffix matched by `ext`, including its aliases
pub fn expand_extension(ext: &str) -> Vec<String> {
    let ext = normalize_extension(ext);
    EXTENSION_ALIASES
        .iter()
        .find(|group| group.contains(&ext.as_str()))
        .map(|group| group.iter().map(|s| s.to_string()).collect())
        .unwrap_or_else(|| vec![ext])
}

fn deserialize_extensions<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(|e| normalize_extension(e)).collect())
}

fn default_log_filter() -> String {
    "corpus_loader=warn".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            recursive: false,
            max_file_bytes: None,
            exclude_patterns: Vec::new(),
            follow_links: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl LoaderConfig {
    /// Replace the extension set, normalising case and leading dots
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Validate loader options
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(CorpusError::ConfigError(
                "At least one file extension must be allowed".to_string(),
            ));
        }

        for ext in &self.extensions {
            if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
                return Err(CorpusError::ConfigError(format!(
                    "Invalid file extension '{ext}'"
                )));
            }
        }

        if self.max_file_bytes == Some(0) {
            return Err(CorpusError::ConfigError(
                "Max file bytes must be non-zero".to_string(),
            ));
        }

        for pattern in &self.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                CorpusError::ConfigError(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }
}

/// Strip a leading dot and lowercase, so ".MD" and "md" mean the same suffix
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CorpusError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. CORPUS_CONFIG env var (via `XdgDirs::config_file`)
    /// 2. XDG config file (~/.config/corpus-loader/config.toml)
    /// 3. ./corpus.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        xdg.log_paths();

        let config_file = xdg.config_file();
        let mut config = if config_file.exists() {
            Self::from_file(config_file)?
        } else if Path::new("corpus.toml").exists() {
            Self::from_file("corpus.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(extensions) = env::var("CORPUS_EXTENSIONS") {
            let parsed: BTreeSet<String> = extensions
                .split(',')
                .map(normalize_extension)
                .filter(|e| !e.is_empty())
                .collect();
            if !parsed.is_empty() {
                self.loader.extensions = parsed;
            }
        }
        if let Ok(recursive) = env::var("CORPUS_RECURSIVE") {
            if let Some(r) = parse_bool(&recursive) {
                self.loader.recursive = r;
            }
        }
        if let Ok(max_bytes) = env::var("CORPUS_MAX_FILE_BYTES") {
            if let Ok(limit) = max_bytes.trim().parse() {
                self.loader.max_file_bytes = Some(limit);
            }
        }
        if let Ok(follow) = env::var("CORPUS_FOLLOW_LINKS") {
            if let Some(f) = parse_bool(&follow) {
                self.loader.follow_links = f;
            }
        }

        if let Ok(filter) = env::var("CORPUS_LOG") {
            self.logging.filter = filter;
        }
        if let Ok(format) = env::var("CORPUS_LOG_FORMAT") {
            match format.trim().to_ascii_lowercase().as_str() {
                "json" => self.logging.format = LogFormat::Json,
                "pretty" => self.logging.format = LogFormat::Pretty,
                _ => {}
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.loader.validate()?;

        if self.logging.filter.trim().is_empty() {
            return Err(CorpusError::ConfigError(
                "Log filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Extensions: {:?}", self.loader.extensions);
        tracing::info!("  Recursive: {}", self.loader.recursive);
        match self.loader.max_file_bytes {
            Some(limit) => tracing::info!("  Max file size: {} bytes", limit),
            None => tracing::info!("  Max file size: unlimited"),
        }
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.loader.exclude_patterns.len()
        );
        tracing::info!("  Follow links: {}", self.loader.follow_links);
    }
}
