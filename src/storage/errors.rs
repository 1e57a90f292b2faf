//! Blob store error types
//!
//! Error codes:
//! - RTC_NOT_READY
//! - RTC_RETENTION_READ_FAILED / RTC_RETENTION_WRITE_FAILED
//! - RTC_FLASH_MISSING / RTC_FLASH_OPEN_FAILED / RTC_FLASH_READ_FAILED
//! - RTC_FLASH_SHORT_READ / RTC_FLASH_WRITE_FAILED / RTC_FLASH_SHORT_WRITE
//! - RTC_INTEGRITY_MISMATCH
//! - RTC_INVALID_CONFIG / RTC_CAPACITY_TOO_SMALL
//!
//! None of these are fatal. Read failures and checksum mismatches are
//! recovered by falling back a tier; write failures are surfaced to the
//! caller without retry.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for blob store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure category of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation invoked before `begin()` succeeded
    NotReady,
    /// A tier's read primitive failed or returned unusable data
    TierReadFailure,
    /// Stored checksum does not match the payload
    IntegrityMismatch,
    /// A tier's write primitive failed
    TierWriteFailure,
    /// Construction-time parameters are unusable
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotReady => "NOT_READY",
            ErrorKind::TierReadFailure => "TIER_READ_FAILURE",
            ErrorKind::IntegrityMismatch => "INTEGRITY_MISMATCH",
            ErrorKind::TierWriteFailure => "TIER_WRITE_FAILURE",
            ErrorKind::Config => "CONFIG",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Blob store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store not initialized, call begin() first")]
    NotReady,

    #[error("retention memory read failed: {0}")]
    RetentionRead(#[source] io::Error),

    #[error("retention memory write failed: {0}")]
    RetentionWrite(#[source] io::Error),

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    IntegrityMismatch { stored: u32, computed: u32 },

    #[error("flash file not found: {0}")]
    FlashMissing(String),

    #[error("failed to open flash file {path}: {source}")]
    FlashOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read flash file {path}: {source}")]
    FlashRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("short read from flash file {path}: expected {expected} bytes, got {actual}")]
    FlashShortRead {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to write flash file {path}: {source}")]
    FlashWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("short write to flash file {path}: expected {expected} bytes, wrote {actual}")]
    FlashShortWrite {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("retention capacity {capacity} is smaller than record size {required}")]
    CapacityTooSmall { capacity: usize, required: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Returns the failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotReady => ErrorKind::NotReady,
            StoreError::RetentionRead(_)
            | StoreError::FlashMissing(_)
            | StoreError::FlashOpen { .. }
            | StoreError::FlashRead { .. }
            | StoreError::FlashShortRead { .. } => ErrorKind::TierReadFailure,
            StoreError::IntegrityMismatch { .. } => ErrorKind::IntegrityMismatch,
            StoreError::RetentionWrite(_)
            | StoreError::FlashWrite { .. }
            | StoreError::FlashShortWrite { .. } => ErrorKind::TierWriteFailure,
            StoreError::CapacityTooSmall { .. } | StoreError::InvalidConfig(_) => {
                ErrorKind::Config
            }
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotReady => "RTC_NOT_READY",
            StoreError::RetentionRead(_) => "RTC_RETENTION_READ_FAILED",
            StoreError::RetentionWrite(_) => "RTC_RETENTION_WRITE_FAILED",
            StoreError::IntegrityMismatch { .. } => "RTC_INTEGRITY_MISMATCH",
            StoreError::FlashMissing(_) => "RTC_FLASH_MISSING",
            StoreError::FlashOpen { .. } => "RTC_FLASH_OPEN_FAILED",
            StoreError::FlashRead { .. } => "RTC_FLASH_READ_FAILED",
            StoreError::FlashShortRead { .. } => "RTC_FLASH_SHORT_READ",
            StoreError::FlashWrite { .. } => "RTC_FLASH_WRITE_FAILED",
            StoreError::FlashShortWrite { .. } => "RTC_FLASH_SHORT_WRITE",
            StoreError::CapacityTooSmall { .. } => "RTC_CAPACITY_TOO_SMALL",
            StoreError::InvalidConfig(_) => "RTC_INVALID_CONFIG",
        }
    }
}
