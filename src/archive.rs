//! Opening archives for reading
//!
//! Archives larger than [`MMAP_THRESHOLD`] are memory-mapped; smaller ones are read
//! through the file handle directly to avoid mmap setup cost. Both paths produce
//! the same [`ArchiveReader`], so the extractor is written once against
//! `ZipArchive<ArchiveReader>`.

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use zip::ZipArchive;

use crate::linux::{fadvise_sequential, madvise_sequential};

/// Archives above this size are memory-mapped
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read-only byte source backing an opened archive
#[derive(Debug)]
pub enum ArchiveReader {
    Mapped(Cursor<Mmap>),
    File(File),
}

impl ArchiveReader {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl Read for ArchiveReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Mapped(cursor) => cursor.read(buf),
            Self::File(file) => file.read(buf),
        }
    }
}

impl Seek for ArchiveReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::Mapped(cursor) => cursor.seek(pos),
            Self::File(file) => file.seek(pos),
        }
    }
}

/// Open the file at `path` and pick the read strategy by size.
///
/// # Errors
///
/// Fails if the file cannot be opened, stat'ed, or mapped. The message names the
/// path.
pub fn open_reader(path: &Path) -> Result<ArchiveReader> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open archive: {}", path.display()))?;

    let file_size = file
        .metadata()
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .len();

    fadvise_sequential(&file, file_size);

    if file_size > MMAP_THRESHOLD {
        // SAFETY: the mapping is read-only and this process never writes the archive
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map archive: {}", path.display()))?;
        madvise_sequential(mmap.as_ptr(), mmap.len());
        Ok(ArchiveReader::Mapped(Cursor::new(mmap)))
    } else {
        Ok(ArchiveReader::File(file))
    }
}

/// Open `path` as a ZIP archive.
///
/// Only the central directory is parsed here; individual entries are not
/// validated until they are opened for extraction.
///
/// # Errors
///
/// Fails if the file is missing or unreadable, or is not a ZIP archive.
pub fn open_archive(path: &Path) -> Result<ZipArchive<ArchiveReader>> {
    let reader = open_reader(path)?;
    ZipArchive::new(reader)
        .with_context(|| format!("Failed to read ZIP archive: {}", path.display()))
}
