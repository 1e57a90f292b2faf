//! # Host Filesystem Tiers
//!
//! Stand-ins for running the store on a development host:
//! - [`FileRetention`]: a fixed-size file plays the retention memory
//! - [`FsFlash`]: a directory plays the flash filesystem

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

use super::{FlashFile, FlashStore, OpenMode, RetentionStore};

/// Retention memory emulated by a file of fixed capacity
#[derive(Debug)]
pub struct FileRetention {
    path: PathBuf,
    capacity: usize,
}

impl FileRetention {
    /// Open or create the backing file.
    ///
    /// A new file is zero-filled to `capacity`. An existing file is resized
    /// to `capacity` (extended with zeros or truncated).
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;
        if file.metadata()?.len() != capacity as u64 {
            file.set_len(capacity as u64)?;
            file.sync_all()?;
        }

        Ok(Self { path, capacity })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_range(&self, offset: usize, len: usize) -> io::Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.capacity => Ok(()),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "range at offset {} of {} bytes exceeds retention capacity {}",
                    offset, len, self.capacity
                ),
            )),
        }
    }
}

impl RetentionStore for FileRetention {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> io::Result<()> {
        self.check_range(offset, buf.len())?;
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset as u64))?;
        file.read_exact(buf)
    }

    fn write(&mut self, offset: usize, buf: &[u8]) -> io::Result<()> {
        self.check_range(offset, buf.len())?;
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(offset as u64))?;
        file.write_all(buf)?;
        file.sync_all()
    }
}

/// Flash filesystem rooted at a host directory
///
/// Flash paths are relative to the root; a leading `/` is ignored, so
/// `/rtc.bin` maps to `<root>/rtc.bin`.
#[derive(Debug, Clone)]
pub struct FsFlash {
    root: PathBuf,
}

impl FsFlash {
    /// Create a new filesystem-backed flash
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path for a flash path
    ///
    /// Fails with `InvalidInput` if `path` has a `..` component.
    pub fn full_path(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.components().any(|c| c == Component::ParentDir) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("flash path escapes the flash root: {}", path),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl FlashStore for FsFlash {
    type File = FsFlashFile;

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> io::Result<FsFlashFile> {
        let full_path = self.full_path(path)?;
        let file = match mode {
            OpenMode::Read => File::open(&full_path)?,
            OpenMode::Write => {
                if let Some(parent) = full_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                File::create(&full_path)?
            }
        };
        Ok(FsFlashFile { file, mode })
    }
}

/// Open handle on an [`FsFlash`] file
#[derive(Debug)]
pub struct FsFlashFile {
    file: File,
    mode: OpenMode,
}

impl FlashFile for FsFlashFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn close(self) -> io::Result<()> {
        // fsync - a write handle is only done once the data is durable
        if self.mode == OpenMode::Write {
            self.file.sync_all()?;
        }
        Ok(())
    }
}
