//! Storage tier capabilities
//!
//! The blob store never touches hardware directly. It consumes two
//! capabilities:
//!
//! - [`RetentionStore`]: small byte-addressable memory that survives reset
//!   and deep-sleep but not power loss
//! - [`FlashStore`]: file-like persistent storage addressed by path, with
//!   finite write endurance
//!
//! Implementations provided here:
//!
//! - [`MemoryRetention`] / [`MemoryFlash`]: in-memory fakes with fault
//!   injection, for tests
//! - [`FileRetention`] / [`FsFlash`]: host-filesystem stand-ins, used by
//!   the CLI
//!
//! All primitives report failure through `io::Result`.

mod fs;
mod memory;

use std::io;

pub use fs::{FileRetention, FsFlash, FsFlashFile};
pub use memory::{FlashFaults, MemoryFlash, MemoryFlashFile, MemoryRetention};

/// Fast volatile memory with a fixed capacity
pub trait RetentionStore {
    /// Total addressable bytes
    fn capacity(&self) -> usize;

    /// Fill `buf` from `offset`. Fails if the range exceeds capacity or the
    /// hardware read fails.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> io::Result<()>;

    /// Write all of `buf` at `offset`.
    fn write(&mut self, offset: usize, buf: &[u8]) -> io::Result<()>;
}

/// Open mode for a flash file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read from the start of an existing file
    Read,
    /// Create or truncate, then write from the start
    Write,
}

impl OpenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::Write => "w",
        }
    }
}

/// Handle to an open flash file
pub trait FlashFile {
    /// Read up to `buf.len()` bytes. Returns 0 at end of file.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write up to `buf.len()` bytes. Returns the number accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Release the handle, flushing pending writes.
    fn close(self) -> io::Result<()>;
}

/// Persistent file store addressed by path
pub trait FlashStore {
    type File: FlashFile;

    /// Whether a file exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Open the file at `path`.
    fn open(&mut self, path: &str, mode: OpenMode) -> io::Result<Self::File>;
}

/// Reads until `buf` is full or the file reports end of data.
///
/// Returns the number of bytes read. Interrupted reads are retried. A read
/// count larger than the slice offered fails with `InvalidData`.
pub fn read_full<F: FlashFile>(file: &mut F, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let remaining = buf.len() - filled;
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) if n > remaining => return Err(overreported("read", n, remaining)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Writes until all of `buf` is accepted or the file stops accepting.
///
/// Returns the number of bytes written. A write count larger than the slice
/// offered fails with `InvalidData`.
pub fn write_full<F: FlashFile>(file: &mut F, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        let remaining = buf.len() - written;
        match file.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) if n > remaining => return Err(overreported("write", n, remaining)),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

fn overreported(op: &str, n: usize, offered: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("flash {} reported {} bytes for a {} byte buffer", op, n, offered),
    )
}
