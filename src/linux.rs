//! Linux access-pattern hints
//!
//! The archive is read front to back and every extracted file is written once and
//! never read again, so the kernel gets told as much:
//! - `fadvise`/`madvise` sequential + willneed on the archive
//! - `fallocate(KEEP_SIZE)` on destination files
//! - `fadvise(DONTNEED)` once a destination file is written
//!
//! Every hint is best-effort; failures are ignored. Other platforms get no-ops.

use std::fs::File;
#[cfg(target_os = "linux")]
use std::num::NonZeroU64;

/// Hint that the archive file will be read sequentially and soon
#[cfg(target_os = "linux")]
pub fn fadvise_sequential(file: &File, len: u64) {
    use rustix::fs::{Advice, fadvise};

    let _ = fadvise(file, 0, NonZeroU64::new(len), Advice::Sequential);
    let _ = fadvise(file, 0, NonZeroU64::new(len), Advice::WillNeed);
}

#[cfg(not(target_os = "linux"))]
pub fn fadvise_sequential(_file: &File, _len: u64) {}

/// Same hint for a memory-mapped archive
#[cfg(target_os = "linux")]
pub fn madvise_sequential(addr: *const u8, len: usize) {
    use rustix::mm::{Advice, madvise};

    if len == 0 {
        return;
    }

    // SAFETY: addr and len describe a live mapping owned by the caller
    unsafe {
        let ptr = addr as *mut std::ffi::c_void;
        let _ = madvise(ptr, len, Advice::Sequential);
        let _ = madvise(ptr, len, Advice::WillNeed);
    }
}

#[cfg(not(target_os = "linux"))]
pub fn madvise_sequential(_addr: *const u8, _len: usize) {}

/// Reserve blocks for a destination file without changing its length.
///
/// The visible size only grows as bytes are actually copied, so a failed copy
/// leaves a short file rather than one padded with zeros.
#[cfg(target_os = "linux")]
pub fn preallocate_file(file: &File, size: u64) {
    use rustix::fs::{FallocateFlags, fallocate};

    if size > 0 {
        let _ = fallocate(file, FallocateFlags::KEEP_SIZE, 0, size);
    }
}

#[cfg(not(target_os = "linux"))]
pub fn preallocate_file(_file: &File, _size: u64) {}

/// Drop a fully written destination file from the page cache
#[cfg(target_os = "linux")]
pub fn fadvise_dontneed(file: &File, len: u64) {
    use rustix::fs::{Advice, fadvise};

    let _ = fadvise(file, 0, NonZeroU64::new(len), Advice::DontNeed);
}

#[cfg(not(target_os = "linux"))]
pub fn fadvise_dontneed(_file: &File, _len: u64) {}
