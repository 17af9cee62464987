//! Dump a prefix-filtered subtree of a ZIP or JAR archive to disk

pub mod archive;
pub mod args;
pub mod extract;
pub mod linux;
pub mod report;
pub mod utils;

pub use archive::{ArchiveReader, open_archive};
pub use args::Args;
pub use extract::{
    ExtractSummary, Extracted, ensure_output_dir, entry_is_dir, extract_archive, extract_entry,
};
pub use report::Reporter;
pub use utils::{destination_path, format_size, matches_prefix};
