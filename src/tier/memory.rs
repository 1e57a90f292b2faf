//! # In-Memory Tiers
//!
//! Retention and flash fakes that can simulate failures, for testing the
//! fallback protocol without real hardware.
//!
//! Both types are cheap handles over shared state: clone one, hand the
//! clone to the store, and keep the other to inspect or corrupt the tier
//! between calls. Single-threaded only.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use super::{FlashFile, FlashStore, OpenMode, RetentionStore};

fn injected(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("injected {} failure", what))
}

#[derive(Debug)]
struct RetentionState {
    bytes: Vec<u8>,
    fail_reads: bool,
    fail_writes: bool,
    reads: usize,
    writes: usize,
}

/// Retention memory backed by a `Vec<u8>`
#[derive(Debug, Clone)]
pub struct MemoryRetention {
    state: Rc<RefCell<RetentionState>>,
}

impl MemoryRetention {
    /// Zero-filled memory of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self::with_bytes(vec![0u8; capacity])
    }

    /// Memory pre-loaded with `bytes`; capacity is `bytes.len()`
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            state: Rc::new(RefCell::new(RetentionState {
                bytes,
                fail_reads: false,
                fail_writes: false,
                reads: 0,
                writes: 0,
            })),
        }
    }

    /// Copy of the whole memory
    pub fn snapshot(&self) -> Vec<u8> {
        self.state.borrow().bytes.clone()
    }

    /// Copy of `len` bytes from `offset`
    pub fn bytes(&self, offset: usize, len: usize) -> Vec<u8> {
        self.state.borrow().bytes[offset..offset + len].to_vec()
    }

    /// Overwrite memory from `offset` without going through the trait
    pub fn load(&self, offset: usize, data: &[u8]) {
        self.state.borrow_mut().bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    /// XOR one byte, simulating a bit flip
    pub fn corrupt(&self, offset: usize, mask: u8) {
        self.state.borrow_mut().bytes[offset] ^= mask;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Number of read calls, including failed ones
    pub fn read_count(&self) -> usize {
        self.state.borrow().reads
    }

    /// Number of write calls, including failed ones
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

fn check_range(capacity: usize, offset: usize, len: usize) -> io::Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "range {}..{} exceeds retention capacity {}",
                offset,
                offset.saturating_add(len),
                capacity
            ),
        )),
    }
}

impl RetentionStore for MemoryRetention {
    fn capacity(&self) -> usize {
        self.state.borrow().bytes.len()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        if state.fail_reads {
            return Err(injected("retention read"));
        }
        check_range(state.bytes.len(), offset, buf.len())?;
        buf.copy_from_slice(&state.bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, buf: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.writes += 1;
        if state.fail_writes {
            return Err(injected("retention write"));
        }
        check_range(state.bytes.len(), offset, buf.len())?;
        state.bytes[offset..offset + buf.len()].copy_from_slice(buf);
        Ok(())
    }
}

/// Failures to inject into a [`MemoryFlash`]
#[derive(Debug, Clone, Default)]
pub struct FlashFaults {
    /// Opening any file for reading fails
    pub fail_open_read: bool,
    /// Opening any file for writing fails
    pub fail_open_write: bool,
    /// Reads from an open file fail
    pub fail_reads: bool,
    /// A write handle accepts at most this many bytes in total
    pub write_limit: Option<usize>,
    /// Closing any handle fails
    pub fail_close: bool,
}

#[derive(Debug, Default)]
struct FlashState {
    files: BTreeMap<String, Vec<u8>>,
    faults: FlashFaults,
    opens_read: usize,
    opens_write: usize,
}

/// Flash filesystem backed by a map of path to contents
#[derive(Debug, Clone, Default)]
pub struct MemoryFlash {
    state: Rc<RefCell<FlashState>>,
}

impl MemoryFlash {
    /// Empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the file at `path`, if any
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.borrow().files.get(path).cloned()
    }

    /// Create or replace a file without going through the trait
    pub fn put(&self, path: &str, data: &[u8]) {
        self.state
            .borrow_mut()
            .files
            .insert(path.to_string(), data.to_vec());
    }

    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.state.borrow_mut().files.remove(path)
    }

    pub fn set_faults(&self, faults: FlashFaults) {
        self.state.borrow_mut().faults = faults;
    }

    /// Number of successful and failed opens for reading
    pub fn read_open_count(&self) -> usize {
        self.state.borrow().opens_read
    }

    /// Number of successful and failed opens for writing
    pub fn write_open_count(&self) -> usize {
        self.state.borrow().opens_write
    }
}

impl FlashStore for MemoryFlash {
    type File = MemoryFlashFile;

    fn exists(&self, path: &str) -> bool {
        self.state.borrow().files.contains_key(path)
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> io::Result<MemoryFlashFile> {
        let mut state = self.state.borrow_mut();
        match mode {
            OpenMode::Read => {
                state.opens_read += 1;
                if state.faults.fail_open_read {
                    return Err(injected("flash open"));
                }
                let data = state.files.get(path).cloned().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path))
                })?;
                Ok(MemoryFlashFile {
                    state: Rc::clone(&self.state),
                    path: path.to_string(),
                    mode,
                    data,
                    pos: 0,
                    budget: None,
                })
            }
            OpenMode::Write => {
                state.opens_write += 1;
                if state.faults.fail_open_write {
                    return Err(injected("flash open"));
                }
                state.files.insert(path.to_string(), Vec::new());
                Ok(MemoryFlashFile {
                    state: Rc::clone(&self.state),
                    path: path.to_string(),
                    mode,
                    data: Vec::new(),
                    pos: 0,
                    budget: state.faults.write_limit,
                })
            }
        }
    }
}

/// Open handle on a [`MemoryFlash`] file
///
/// Writes land in the shared map immediately; `close` has nothing to flush.
#[derive(Debug)]
pub struct MemoryFlashFile {
    state: Rc<RefCell<FlashState>>,
    path: String,
    mode: OpenMode,
    data: Vec<u8>,
    pos: usize,
    budget: Option<usize>,
}

impl FlashFile for MemoryFlashFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.mode != OpenMode::Read {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file not open for reading",
            ));
        }
        if self.state.borrow().faults.fail_reads {
            return Err(injected("flash read"));
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.mode != OpenMode::Write {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file not open for writing",
            ));
        }
        let n = match self.budget {
            Some(left) => buf.len().min(left),
            None => buf.len(),
        };
        if let Some(left) = self.budget.as_mut() {
            *left -= n;
        }
        self.state
            .borrow_mut()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn close(self) -> io::Result<()> {
        if self.state.borrow().faults.fail_close {
            return Err(injected("flash close"));
        }
        Ok(())
    }
}
