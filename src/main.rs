//! headergen — generate companion C headers from source files.
//!
//! Walks a directory tree, and for every `.c` file that contains struct
//! definitions or `def`-marked functions writes a header next to it:
//!
//! ```c
//! #pragma once
//!
//! typedef struct Wave Wave;
//!
//! struct Wave { ... };
//!
//! void set_num_channels (struct Wave *wave, u16 new_num_channels);
//! ```
//!
//! Files with neither are left alone. Directories named `external` are skipped.

mod discover;
mod emit;
mod error;
mod extract;
mod model;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use pipeline::{Config, Outcome, Report};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "headergen",
    about = "Generate C headers from struct definitions and def-marked functions"
)]
struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Directory name to skip at any depth (exact component match)
    #[arg(short = 'x', long, default_value = "external")]
    exclude: String,

    /// Source file extension
    #[arg(long, default_value = "c")]
    ext: String,

    /// Header file extension
    #[arg(long, default_value = "h")]
    header_ext: String,

    /// Number of worker threads (0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 1)]
    jobs: usize,

    /// Follow symlinked directories while walking
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Report what would be generated without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Do not rewrite headers whose content is already up to date
    #[arg(long)]
    skip_unchanged: bool,

    /// Exit non-zero if any file failed
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Build the run configuration. Equal extensions would derive each header
    /// path as its own source and overwrite it, so they are rejected.
    fn config(&self) -> Result<Config> {
        let source_ext = self.ext.trim_start_matches('.').to_string();
        let header_ext = self.header_ext.trim_start_matches('.').to_string();
        if source_ext == header_ext {
            anyhow::bail!(
                "--ext and --header-ext must differ (both are \"{}\")",
                source_ext
            );
        }
        Ok(Config {
            exclude_dir: self.exclude.clone(),
            source_ext,
            header_ext,
            follow_links: self.follow_links,
            jobs: self.jobs,
            dry_run: self.dry_run,
            skip_unchanged: self.skip_unchanged,
        })
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = cli.config()?;
    let reports = pipeline::run(&cli.root, &config)
        .with_context(|| format!("failed to scan {}", cli.root.display()))?;

    let failed = print_reports(&reports);
    if failed > 0 && cli.strict {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one line per generated header to stdout and one per failure to stderr.
/// Returns the number of failed files.
fn print_reports(reports: &[Report]) -> usize {
    let mut generated = 0;
    let mut failed = 0;
    for report in reports {
        match &report.outcome {
            Outcome::Generated(header) => {
                generated += 1;
                println!("Generated {}", header.display());
            }
            Outcome::WouldGenerate(header) => {
                generated += 1;
                println!("Would generate {}", header.display());
            }
            Outcome::Unchanged(header) => info!("unchanged {}", header.display()),
            Outcome::Skipped => {}
            Outcome::Failed(e) => {
                failed += 1;
                eprintln!("error: {}: {}", report.source.display(), e);
            }
        }
    }
    info!(
        "{} file(s) scanned, {} header(s) generated, {} failed",
        reports.len(),
        generated,
        failed
    );
    failed
}
