//! Command-line argument parsing
//!
//! Defines the CLI interface using clap. Flags use the Go `flag` package spelling
//! (`-input`, `-output`, `-prefix`, `-dir`, `-v`); [`normalize_flags`] rewrites
//! those into clap's double-dash form before parsing, so `--input` works too.
//!
//! # Examples
//!
//! ```
//! use zipdump::args::{Args, normalize_flags};
//! use clap::Parser;
//!
//! let args = Args::try_parse_from(normalize_flags(["zipdump", "-prefix", "assets/minecraft/", "-dir"]))?;
//! assert_eq!(args.prefix, "assets/minecraft/");
//! assert!(args.dir_only);
//! # Ok::<(), clap::Error>(())
//! ```

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "./data/client.jar";
pub const DEFAULT_OUTPUT: &str = "./dump/client";
pub const DEFAULT_PREFIX: &str = "assets/";

/// Long flag names accepted with a single leading dash
const LONG_FLAGS: &[&str] = &["input", "output", "prefix", "dir", "verbose", "help", "version"];

/// Dump a prefix-filtered subtree of a ZIP or JAR archive to disk
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  zipdump                                          Dump assets/ from ./data/client.jar into ./dump/client
  zipdump -input game.jar -output out              Dump assets/ from game.jar into out/
  zipdump -prefix assets/minecraft/textures/ -v    Dump textures only, logging every file
  zipdump -dir                                     Create directories only, skip regular files")]
pub struct Args {
    /// Archive to read
    #[arg(long = "input", value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory to write extracted entries into
    #[arg(long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Only entries whose name starts with this string are processed
    #[arg(long = "prefix", value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Only output directories, skip regular files
    #[arg(
        long = "dir",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub dir_only: bool,

    /// Log every file as it is saved
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            prefix: DEFAULT_PREFIX.to_string(),
            dir_only: false,
            verbose: false,
        }
    }
}

impl Args {
    /// Parse the process arguments, accepting Go-style single-dash flags.
    ///
    /// Exits with clap's usage error (code 2) on invalid input.
    pub fn from_env() -> Self {
        Self::parse_from(normalize_flags(std::env::args_os()))
    }
}

/// Rewrite Go `flag`-style arguments into the form clap expects.
///
/// `-input x`, `-input=x` and `--input=x` all become `--input ...`, and the
/// one-letter `-v=BOOL` / `--v` spellings map onto `--verbose`. The first item is
/// the program name and is passed through, as is everything after a bare `--`
/// and any argument that is not a known flag.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = iter.next().into_iter().collect();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            normalized.push(arg);
            normalized.extend(iter.by_ref());
            break;
        }
        normalized.push(normalize_flag(arg));
    }

    normalized
}

fn normalize_flag(arg: OsString) -> OsString {
    match rewrite_flag(&arg) {
        Some(rewritten) => rewritten.into(),
        None => arg,
    }
}

fn rewrite_flag(arg: &OsStr) -> Option<String> {
    let text = arg.to_str()?;
    let body = text.strip_prefix("--").or_else(|| text.strip_prefix('-'))?;

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let long = match name {
        // clap already understands a bare `-v`
        "v" if value.is_none() && !text.starts_with("--") => return None,
        "v" => "verbose",
        name if LONG_FLAGS.contains(&name) => name,
        _ => return None,
    };

    Some(match value {
        Some(value) => format!("--{long}={value}"),
        None => format!("--{long}"),
    })
}
