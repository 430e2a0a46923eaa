//! corpus - command-line front-end for the corpus loader
//!
//! # Examples
//!
//! ```bash
//! # List the .md/.txt documents directly under ./docs
//! corpus load docs
//!
//! # Recurse, only markdown, skip anything over 1 MiB, JSON output
//! corpus --format json load docs -r --ext md --max-file-bytes 1048576
//!
//! # Show configuration
//! corpus show-config
//! ```

use clap::Parser;
use corpus_loader::cli::{output, run, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
