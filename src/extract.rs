//! Archive extraction
//!
//! Walks the archive in central-directory order, keeps entries whose name starts
//! with the configured prefix, and writes each one under the output directory.
//! A failure on one entry is reported and counted; the walk continues with the
//! next entry.
//!
//! # Examples
//!
//! ```no_run
//! use zipdump::{Args, Reporter, ensure_output_dir, extract_archive, open_archive};
//!
//! let args = Args::default();
//! ensure_output_dir(&args.output)?;
//! let mut archive = open_archive(&args.input)?;
//! let summary = extract_archive(&mut archive, &args, &mut Reporter::stdio());
//! println!("{} files written", summary.files);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read, Seek, Write};
use std::path::Path;
use zip::ZipArchive;

use crate::args::Args;
use crate::linux::{fadvise_dontneed, preallocate_file};
use crate::report::Reporter;
use crate::utils::{create_dir_all, destination_path, is_dir_mode, is_dir_name, matches_prefix};

/// Buffer size for file I/O (256KB for better throughput)
const BUFFER_SIZE: usize = 256 * 1024;

/// Counters for a single extraction run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Regular files written
    pub files: usize,
    /// Directory entries created
    pub directories: usize,
    /// Entries rejected by the prefix filter
    pub filtered: usize,
    /// Entries whose extraction failed
    pub failed: usize,
    /// Bytes written across all files
    pub bytes: u64,
}

/// Outcome of extracting one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted {
    Directory,
    /// Regular file, with the number of bytes written
    File(u64),
}

/// Make sure the output root exists.
///
/// # Errors
///
/// Fails if the directory (or one of its parents) cannot be created. The caller
/// treats this as fatal.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    create_dir_all(path)
        .with_context(|| format!("Failed to create output directory: {}", path.display()))
}

/// Extract every entry of `archive` that matches `args.prefix` into `args.output`.
///
/// For each matching entry, in archive order:
/// 1. directory entries are announced on the info sink;
/// 2. with `args.dir_only`, files are skipped but directory entries are still
///    created on disk, so `-dir` materialises the directory skeleton instead of
///    only listing it;
/// 3. otherwise, with `args.verbose`, the destination path is announced, and the
///    entry is extracted with [`extract_entry`].
///
/// Per-entry failures are written to the error sink and counted in
/// [`ExtractSummary::failed`]; they never stop the run. The output root is
/// expected to exist already (see [`ensure_output_dir`]).
pub fn extract_archive<R, O, E>(
    archive: &mut ZipArchive<R>,
    args: &Args,
    reporter: &mut Reporter<O, E>,
) -> ExtractSummary
where
    R: Read + Seek,
    O: Write,
    E: Write,
{
    let mut summary = ExtractSummary::default();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    for index in 0..archive.len() {
        let Some(name) = archive.name_for_index(index).map(str::to_owned) else {
            continue;
        };

        if !matches_prefix(&name, &args.prefix) {
            summary.filtered += 1;
            continue;
        }

        let is_dir = entry_is_dir(archive, index, &name);
        if is_dir {
            reporter.info(format_args!("Reading directory {:?}", name));
        }

        if args.dir_only && !is_dir {
            continue;
        }

        if args.verbose && !args.dir_only {
            reporter.info(format_args!("Saving file {:?}", args.output.join(&name)));
        }

        match extract_entry(archive, index, &args.output, &mut buffer) {
            Ok(Extracted::Directory) => summary.directories += 1,
            Ok(Extracted::File(bytes)) => {
                summary.files += 1;
                summary.bytes += bytes;
            },
            Err(err) => {
                summary.failed += 1;
                reporter.error(&err);
            },
        }
    }

    summary
}

/// Extract the entry at `index` to `output_dir.join(name)`.
///
/// Directory entries are created recursively. For file entries the parent
/// directory is created first, then the entry stream is opened, the destination
/// file created (truncating any previous file), and all bytes copied. The stream
/// and the file are closed when this function returns, on success or failure.
///
/// # Errors
///
/// Each step wraps its error with the entry name or destination path. A copy
/// that fails part-way leaves the partially written file in place.
pub fn extract_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    output_dir: &Path,
    buffer: &mut [u8],
) -> Result<Extracted> {
    let name = archive
        .name_for_index(index)
        .with_context(|| format!("No entry at index {}", index))?
        .to_owned();

    let outpath = destination_path(output_dir, &name).with_context(|| {
        format!("Refusing to extract {:?} outside of {}", name, output_dir.display())
    })?;

    if entry_is_dir(archive, index, &name) {
        create_dir_all(&outpath)
            .with_context(|| format!("Failed to create directory: {}", outpath.display()))?;
        return Ok(Extracted::Directory);
    }

    if let Some(parent) = outpath.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for file {:?}", name))?;
    }

    let mut entry = archive
        .by_index(index)
        .with_context(|| format!("Failed to open entry {:?}", name))?;
    let size = entry.size();

    let outfile = File::create(&outpath)
        .with_context(|| format!("Failed to create file: {}", outpath.display()))?;

    preallocate_file(&outfile, size);

    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, outfile);
    let bytes_written = copy_with_buffer(&mut entry, &mut writer, buffer)
        .with_context(|| format!("Failed to copy file: {}", outpath.display()))?;

    let outfile = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .with_context(|| format!("Failed to copy file: {}", outpath.display()))?;

    fadvise_dontneed(&outfile, bytes_written);

    Ok(Extracted::File(bytes_written))
}

/// Whether the entry at `index` is a directory.
///
/// A trailing separator on `name` is enough. Otherwise the Unix mode in the
/// central directory (or the MS-DOS directory attribute) decides. The raw entry
/// is only borrowed for its metadata; nothing is decompressed. An entry whose
/// local header cannot be read falls back to the name check, and the error
/// surfaces when extraction opens it.
pub fn entry_is_dir<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize, name: &str) -> bool {
    if is_dir_name(name) {
        return true;
    }

    archive
        .by_index_raw(index)
        .ok()
        .and_then(|entry| entry.unix_mode())
        .is_some_and(is_dir_mode)
}

/// Copy `reader` into `writer` through a caller-owned buffer
fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
) -> io::Result<u64> {
    let mut bytes_written = 0u64;
    loop {
        let bytes_read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        writer.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
    }
    Ok(bytes_written)
}
