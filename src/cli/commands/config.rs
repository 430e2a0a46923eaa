//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: PathBuf,
    pub config_file_exists: bool,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_to(args, config, format, &mut out)
}

/// Execute the config command, writing to `out`
pub fn execute_to(
    _args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = XdgDirs::new().config_file();

    let response = ConfigResponse {
        config_file_exists: config_file.exists(),
        config_file,
        config,
    };

    match format {
        OutputFormat::Human => write_human(&response, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_human(response: &ConfigResponse<'_>, out: &mut dyn Write) -> io::Result<()> {
    let loader = &response.config.loader;
    writeln!(out, "Configuration:")?;
    writeln!(
        out,
        "  config_file: {}{}",
        response.config_file.display(),
        if response.config_file_exists {
            ""
        } else {
            " (not found, using defaults)"
        }
    )?;
    writeln!(out, "  loader:")?;
    writeln!(out, "    extensions: {:?}", loader.extensions)?;
    writeln!(out, "    recursive: {}", loader.recursive)?;
    match loader.max_file_bytes {
        Some(limit) => writeln!(out, "    max_file_bytes: {limit}")?,
        None => writeln!(out, "    max_file_bytes: unlimited")?,
    }
    writeln!(out, "    exclude_patterns: {:?}", loader.exclude_patterns)?;
    writeln!(out, "    follow_links: {}", loader.follow_links)?;
    writeln!(out, "  logging:")?;
    writeln!(out, "    filter: {}", response.config.logging.filter)?;
    writeln!(out, "    format: {:?}", response.config.logging.format)
}
