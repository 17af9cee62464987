//! Dump a prefix-filtered subtree of a ZIP or JAR archive to disk
//!
//! # Overview
//!
//! Typical use is pulling the `assets/` tree out of a game client jar:
//!
//! ```text
//! zipdump -input ./data/client.jar -output ./dump/client -prefix assets/
//! ```
//!
//! # Architecture
//!
//! The main entry point handles:
//! 1. CLI argument parsing (Go-style single-dash flags are accepted)
//! 2. Creating the output root and opening the archive; either failing is fatal
//! 3. Running the extractor, which reports per-entry failures and carries on
//!
//! Fatal errors print one `error:` line on stderr and exit with code 1. Per-entry
//! failures are printed the same way but do not change the exit code.

use anyhow::Result;
use std::io::{Stderr, Stdout};
use std::process;

use zipdump::args::Args;
use zipdump::extract::{ensure_output_dir, extract_archive};
use zipdump::report::Reporter;
use zipdump::{format_size, open_archive};

fn main() {
    let args = Args::from_env();
    let mut reporter = Reporter::stdio();

    // Fatal errors get the same one-line `error: context: cause` form as entry errors
    if let Err(err) = run(&args, &mut reporter) {
        reporter.error(&err);
        process::exit(1);
    }
}

fn run(args: &Args, reporter: &mut Reporter<Stdout, Stderr>) -> Result<()> {
    ensure_output_dir(&args.output)?;
    let mut archive = open_archive(&args.input)?;

    let summary = extract_archive(&mut archive, args, reporter);

    if args.verbose {
        reporter.info(format_args!(
            "Extracted {} files ({}), {} directories to {}",
            summary.files,
            format_size(summary.bytes),
            summary.directories,
            args.output.display()
        ));
        if summary.failed > 0 {
            reporter.info(format_args!("{} entries failed", summary.failed));
        }
    }

    Ok(())
}
