//! Load command - load a directory and list its documents

use crate::cli::output::{self, colors, format_bytes, format_duration_ms, format_relative_time};
use crate::cli::OutputFormat;
use crate::core::config::{Config, LoaderConfig};
use crate::core::loader::CorpusLoader;
use crate::core::types::{LoadReport, LoadStats, SkippedFile};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Directory to load
    pub path: PathBuf,

    /// Allowed file extension (can be specified multiple times)
    #[arg(long = "ext", short = 'x')]
    pub extensions: Vec<String>,

    /// Descend into subdirectories
    #[arg(long, short = 'r', overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Stay in the top-level directory even if the config says otherwise
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Skip files larger than this many bytes
    #[arg(long)]
    pub max_file_bytes: Option<u64>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Include document content in the output
    #[arg(long)]
    pub show_content: bool,
}

impl LoadArgs {
    /// Layer command-line options over the configured loader options
    pub fn loader_config(&self, base: &LoaderConfig) -> LoaderConfig {
        let mut config = base.clone();

        if !self.extensions.is_empty() {
            config = config.with_extensions(&self.extensions);
        }
        if self.recursive {
            config.recursive = true;
        } else if self.no_recursive {
            config.recursive = false;
        }
        if self.max_file_bytes.is_some() {
            config.max_file_bytes = self.max_file_bytes;
        }
        if !self.exclude.is_empty() {
            config.exclude_patterns = self.exclude.clone();
        }

        config
    }
}

/// One document in the load response
#[derive(Debug, Serialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub byte_length: u64,
    pub content_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Load result response
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub root: PathBuf,
    pub documents: Vec<DocumentEntry>,
    pub skipped: Vec<SkippedFile>,
    pub stats: LoadStats,
}

impl LoadResponse {
    fn from_report(root: PathBuf, report: LoadReport, show_content: bool) -> Self {
        let documents = report
            .documents
            .into_iter()
            .map(|doc| DocumentEntry {
                path: doc.path().to_path_buf(),
                byte_length: doc.byte_length(),
                content_type: doc.content_type(),
                modified: doc.modified(),
                content: show_content.then(|| doc.into_content()),
            })
            .collect();

        Self {
            root,
            documents,
            skipped: report.skipped,
            stats: report.stats,
        }
    }
}

/// Execute the load command
pub fn execute(
    args: LoadArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_to(args, config, format, &mut out)
}

/// Execute the load command, writing the report to `out`
pub fn execute_to(
    args: LoadArgs,
    config: &Config,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader_config = args.loader_config(&config.loader);
    let loader = CorpusLoader::new(&loader_config)?;
    let corpus = loader.load(&args.path)?;
    let report = corpus.collect_report();

    let response = LoadResponse::from_report(args.path.clone(), report, args.show_content);

    match format {
        OutputFormat::Human => write_human(&response, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Write the human-readable report: one line per document, one per skip
pub fn write_human(response: &LoadResponse, out: &mut dyn Write) -> io::Result<()> {
    output::write_header(out, &format!("Documents in {}", response.root.display()))?;

    for doc in &response.documents {
        let modified = doc
            .modified
            .as_ref()
            .map(format_relative_time)
            .unwrap_or_default();
        writeln!(
            out,
            "  {}  {}  {}  {}",
            colors::file_path(&doc.path.display().to_string()),
            colors::number(&format_bytes(doc.byte_length)),
            colors::dim(doc.content_type),
            colors::dim(&modified)
        )?;
        if let Some(content) = &doc.content {
            for line in content.lines() {
                writeln!(out, "    {}", colors::dim(line))?;
            }
        }
    }

    for skipped in &response.skipped {
        output::write_warning(
            out,
            &format!("skipped {}: {}", skipped.path.display(), skipped.reason),
        )?;
    }

    writeln!(
        out,
        "{} {} documents ({}) in {}, {} skipped",
        colors::success("Loaded"),
        colors::number(&response.stats.files_loaded.to_string()),
        colors::number(&format_bytes(response.stats.bytes_loaded)),
        colors::number(&format_duration_ms(response.stats.duration_ms)),
        colors::number(&response.stats.files_skipped.to_string())
    )
}
