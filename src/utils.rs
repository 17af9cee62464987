//! Utility functions for filtering, path resolution and formatting
//!
//! Provides shared helpers used by the extractor:
//! - Prefix-based entry filtering
//! - Mapping entry names onto destination paths without leaving the output root
//! - Recursive directory creation with a fixed permission mode
//! - Human-readable size formatting
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use zipdump::{destination_path, format_size, matches_prefix};
//!
//! assert!(matches_prefix("assets/icon.png", "assets/"));
//! assert_eq!(
//!     destination_path(Path::new("out"), "assets/icon.png"),
//!     Some(Path::new("out").join("assets/icon.png"))
//! );
//! assert_eq!(format_size(1536 * 1024), "1.5M");
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

/// Permission bits requested for created directories, before the umask is applied
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o777;

/// Byte count for the verbose summary: `B` below 1 KiB, then one decimal in
/// `K`, `M` or `G`.
///
/// ```
/// use zipdump::format_size;
///
/// assert_eq!(format_size(512), "512B");
/// assert_eq!(format_size(1024), "1.0K");
/// assert_eq!(format_size(1536 * 1024), "1.5M");
/// assert_eq!(format_size(2 * 1024 * 1024 * 1024), "2.0G");
/// ```
pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 3] = ["K", "M", "G"];

    if size < 1024 {
        return format!("{}B", size);
    }

    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

/// Whether an entry name passes the prefix filter.
///
/// This is a literal comparison at offset 0: no separator normalisation, no
/// case folding, no glob syntax. An empty prefix matches every entry.
pub fn matches_prefix(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix)
}

/// Whether an entry name denotes a directory (trailing separator)
pub fn is_dir_name(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;

/// Whether a Unix mode (as stored in an entry's external attributes) has the
/// directory file type
pub fn is_dir_mode(mode: u32) -> bool {
    mode & S_IFMT == S_IFDIR
}

/// Resolve the on-disk destination for an entry name.
///
/// Returns `output_dir.join(name)`, or `None` when the name would land outside
/// `output_dir`: absolute paths, drive prefixes, NUL bytes, or `..` components
/// that climb above the root.
pub fn destination_path(output_dir: &Path, name: &str) -> Option<PathBuf> {
    if name.contains('\0') {
        return None;
    }

    let mut depth = 0usize;
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return None,
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::Normal(_) => depth += 1,
            Component::CurDir => {},
        }
    }

    Some(output_dir.join(name))
}

/// Create a directory and all of its missing parents.
///
/// On Unix the directories are requested with [`DIR_MODE`], so the final
/// permissions are `0o777 & !umask`.
pub fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(path)
}
