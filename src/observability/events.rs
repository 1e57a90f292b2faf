//! Observable blob store events
//!
//! Events are explicit and typed; the string names are stable and appear
//! as the `event` key of every log line.

use std::fmt;

/// Observable events in the blob store lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Load
    /// `begin()` starts loading retention memory
    LoadStart,
    /// `begin()` called on a ready store
    AlreadyLoaded,
    /// Stored and computed checksums, side by side
    ChecksumCompared,
    /// Retention record verified
    ChecksumVerified,
    /// Retention record failed verification
    ChecksumMismatch,
    /// Retention read primitive failed
    RetentionReadFailed,
    /// Store is ready
    Ready,

    // Flash fallback
    /// Flash copy loaded after a mismatch
    FlashFallbackOk,
    /// Flash copy unusable, record reset
    FlashFallbackFailed,
    /// No flash file at the configured path
    FlashMissing,
    /// Flash file exists but could not be opened
    FlashOpenFailed,
    /// Flash read finished (carries byte count)
    FlashBytesRead,
    /// Flash read returned an error or too few bytes
    FlashReadFailed,
    /// Closing a flash read handle failed
    FlashCloseFailed,
    /// Record zeroed and resealed
    MemoryReset,

    // Write
    /// Record written to retention memory
    RetentionWriteOk,
    /// Retention write primitive failed
    RetentionWriteFailed,
    /// Record written to flash
    FlashWriteOk,
    /// Flash write failed
    FlashWriteFailed,

    // Misuse
    /// Operation called before `begin()`
    NotReady,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::LoadStart => "BLOB_LOAD_START",
            Event::AlreadyLoaded => "BLOB_ALREADY_LOADED",
            Event::ChecksumCompared => "BLOB_CHECKSUM_COMPARED",
            Event::ChecksumVerified => "BLOB_CHECKSUM_VERIFIED",
            Event::ChecksumMismatch => "BLOB_CHECKSUM_MISMATCH",
            Event::RetentionReadFailed => "BLOB_RETENTION_READ_FAILED",
            Event::Ready => "BLOB_READY",
            Event::FlashFallbackOk => "BLOB_FLASH_FALLBACK_OK",
            Event::FlashFallbackFailed => "BLOB_FLASH_FALLBACK_FAILED",
            Event::FlashMissing => "BLOB_FLASH_MISSING",
            Event::FlashOpenFailed => "BLOB_FLASH_OPEN_FAILED",
            Event::FlashBytesRead => "BLOB_FLASH_BYTES_READ",
            Event::FlashReadFailed => "BLOB_FLASH_READ_FAILED",
            Event::FlashCloseFailed => "BLOB_FLASH_CLOSE_FAILED",
            Event::MemoryReset => "BLOB_MEMORY_RESET",
            Event::RetentionWriteOk => "BLOB_RETENTION_WRITE_OK",
            Event::RetentionWriteFailed => "BLOB_RETENTION_WRITE_FAILED",
            Event::FlashWriteOk => "BLOB_FLASH_WRITE_OK",
            Event::FlashWriteFailed => "BLOB_FLASH_WRITE_FAILED",
            Event::NotReady => "BLOB_NOT_READY",
        }
    }

    /// Whether this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::ChecksumMismatch
                | Event::RetentionReadFailed
                | Event::FlashFallbackFailed
                | Event::FlashMissing
                | Event::FlashOpenFailed
                | Event::FlashReadFailed
                | Event::FlashCloseFailed
                | Event::RetentionWriteFailed
                | Event::FlashWriteFailed
                | Event::NotReady
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::LoadStart.as_str(), "BLOB_LOAD_START");
        assert_eq!(Event::ChecksumMismatch.as_str(), "BLOB_CHECKSUM_MISMATCH");
        assert_eq!(Event::NotReady.to_string(), "BLOB_NOT_READY");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::FlashMissing.is_failure());
        assert!(Event::RetentionWriteFailed.is_failure());
        assert!(!Event::Ready.is_failure());
        assert!(!Event::FlashFallbackOk.is_failure());
    }
}
