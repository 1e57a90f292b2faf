//! Dual-tier blob store
//!
//! # Load sequence (`begin`)
//!
//! 1. Read the record from retention memory at offset 0
//! 2. Retention read fails → not ready, error returned
//! 3. Verify checksum over the payload
//! 4. Mismatch → load the flash copy; if that is unusable, reset the
//!    record and write the reset record back to flash (self-heal)
//! 5. Mark ready
//!
//! # Write paths
//!
//! - `save`: retention memory only, cheap, no flash wear
//! - `persist`: retention memory, then flash
//!
//! The record held in memory is always `data_length + 4` bytes and, after
//! any reset, carries a checksum that matches its payload.

use std::fmt;

use crate::config::StoreConfig;
use crate::observability::{
    Diagnostics, Event, JsonLogger, LogSink, MetricsSnapshot, StoreMetrics, Verbosity,
};
use crate::tier::{read_full, write_full, FlashFile, FlashStore, OpenMode, RetentionStore};

use super::errors::{StoreError, StoreResult};
use super::record::BlobRecord;

/// Retention memory offset of the record
const RECORD_OFFSET: usize = 0;

/// Where the active payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Retention record passed its checksum
    Retention,
    /// Retention record was corrupt; flash copy loaded
    Flash,
    /// Both tiers unusable; payload zeroed
    Reset,
}

impl LoadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadSource::Retention => "retention",
            LoadSource::Flash => "flash",
            LoadSource::Reset => "reset",
        }
    }
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-size blob persisted across retention memory and flash.
///
/// Every operation except [`begin`](Self::begin) fails with
/// [`StoreError::NotReady`] until `begin` has succeeded once.
pub struct DurableBlobStore<R, F> {
    record: BlobRecord,
    ready: bool,
    source: Option<LoadSource>,
    path: String,
    retention: R,
    flash: F,
    diag: Diagnostics,
    metrics: StoreMetrics,
}

impl<R: RetentionStore, F: FlashStore> DurableBlobStore<R, F> {
    /// Create a store that logs JSON lines to stderr.
    pub fn new(config: StoreConfig, retention: R, flash: F) -> StoreResult<Self> {
        Self::with_logger(config, retention, flash, Box::new(JsonLogger::stderr()))
    }

    /// Create a store that logs to `sink`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the path is empty or `data_length` is zero
    /// - `CapacityTooSmall` if the record does not fit in retention memory
    pub fn with_logger(
        config: StoreConfig,
        retention: R,
        flash: F,
        sink: Box<dyn LogSink>,
    ) -> StoreResult<Self> {
        config.validate()?;

        let required = config.record_len();
        if retention.capacity() < required {
            return Err(StoreError::CapacityTooSmall {
                capacity: retention.capacity(),
                required,
            });
        }

        Ok(Self {
            record: BlobRecord::zeroed(config.data_length),
            ready: false,
            source: None,
            path: config.path,
            retention,
            flash,
            diag: Diagnostics::new(config.verbosity, sink),
            metrics: StoreMetrics::new(),
        })
    }

    /// Load the record, falling back to flash if retention is corrupt.
    ///
    /// Idempotent: once ready, returns the original source without touching
    /// either tier. A failed flash fallback does not fail `begin`; the
    /// record is reset instead and the source is [`LoadSource::Reset`].
    ///
    /// # Errors
    ///
    /// `RetentionRead` if the retention read primitive fails. The store
    /// stays not ready.
    pub fn begin(&mut self) -> StoreResult<LoadSource> {
        if let (true, Some(source)) = (self.ready, self.source) {
            self.diag
                .info(Event::AlreadyLoaded, &[("source", source.as_str())]);
            return Ok(source);
        }

        self.diag.info(Event::LoadStart, &[("path", &self.path)]);

        let mut buf = vec![0u8; self.record.encoded_len()];
        if let Err(e) = self.retention.read(RECORD_OFFSET, &mut buf) {
            self.diag
                .warn(Event::RetentionReadFailed, &[("error", &e.to_string())]);
            return Err(StoreError::RetentionRead(e));
        }
        self.metrics.increment_retention_reads();

        self.record.fill_from(&buf);

        let stored = self.record.checksum();
        let computed = self.record.computed_checksum();
        self.diag.trace(
            Event::ChecksumCompared,
            &[
                ("computed", &format!("{:08X}", computed)),
                ("stored", &format!("{:08X}", stored)),
            ],
        );

        let source = if stored == computed {
            self.diag.info(Event::ChecksumVerified, &[]);
            LoadSource::Retention
        } else {
            self.metrics.increment_checksum_mismatches();
            let mismatch = StoreError::IntegrityMismatch { stored, computed };
            self.diag.warn(
                Event::ChecksumMismatch,
                &[("error", &mismatch.to_string()), ("path", &self.path)],
            );

            match self.load_from_flash() {
                Ok(()) => {
                    self.diag.info(Event::FlashFallbackOk, &[("path", &self.path)]);
                    LoadSource::Flash
                }
                Err(e) => {
                    self.diag.warn(
                        Event::FlashFallbackFailed,
                        &[("code", e.code()), ("error", &e.to_string())],
                    );
                    LoadSource::Reset
                }
            }
        };

        self.ready = true;
        self.source = Some(source);
        self.diag.info(Event::Ready, &[("source", source.as_str())]);
        Ok(source)
    }

    /// Seal the record and write it to retention memory.
    ///
    /// Never touches flash.
    pub fn save(&mut self) -> StoreResult<()> {
        self.ensure_ready()?;

        let checksum = self.record.seal();
        let bytes = self.record.encode();

        match self.retention.write(RECORD_OFFSET, &bytes) {
            Ok(()) => {
                self.metrics.increment_retention_writes();
                self.diag.info(
                    Event::RetentionWriteOk,
                    &[("checksum", &format!("{:08X}", checksum))],
                );
                Ok(())
            }
            Err(e) => {
                self.diag
                    .warn(Event::RetentionWriteFailed, &[("error", &e.to_string())]);
                Err(StoreError::RetentionWrite(e))
            }
        }
    }

    /// [`save`](Self::save), then write the same record to flash.
    ///
    /// Flash is only written if the retention write succeeded.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.ensure_ready()?;
        self.save()?;
        self.write_to_flash()
    }

    /// Mutable view of the payload.
    ///
    /// Edits become durable on the next `save` or `persist`.
    pub fn data_mut(&mut self) -> StoreResult<&mut [u8]> {
        self.ensure_ready()?;
        Ok(self.record.payload_mut())
    }

    /// Read-only view of the payload.
    ///
    /// Fails with `NotReady` before `begin`, without logging.
    pub fn data(&self) -> StoreResult<&[u8]> {
        if !self.ready {
            return Err(StoreError::NotReady);
        }
        Ok(self.record.payload())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Source of the active payload, `None` before `begin`
    pub fn source(&self) -> Option<LoadSource> {
        self.source
    }

    /// Flash key of the persistent copy
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn data_length(&self) -> usize {
        self.record.data_length()
    }

    /// Checksum currently held in memory (as of the last load or save)
    pub fn checksum(&self) -> u32 {
        self.record.checksum()
    }

    pub fn verbosity(&self) -> Verbosity {
        self.diag.verbosity()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn retention(&self) -> &R {
        &self.retention
    }

    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Release the tiers
    pub fn into_parts(self) -> (R, F) {
        (self.retention, self.flash)
    }

    fn ensure_ready(&mut self) -> StoreResult<()> {
        if self.ready {
            return Ok(());
        }
        self.diag
            .error(Event::NotReady, &[("hint", "call begin() before other calls")]);
        Err(StoreError::NotReady)
    }

    /// Replace the record with the flash copy.
    ///
    /// Any unusable flash copy (missing, unopenable, unreadable, short)
    /// triggers a self-heal and an error. The flash copy is not
    /// checksum-verified.
    fn load_from_flash(&mut self) -> StoreResult<()> {
        if !self.flash.exists(&self.path) {
            self.diag.warn(Event::FlashMissing, &[("path", &self.path)]);
            self.self_heal();
            return Err(StoreError::FlashMissing(self.path.clone()));
        }

        let mut file = match self.flash.open(&self.path, OpenMode::Read) {
            Ok(file) => file,
            Err(e) => {
                self.diag.warn(
                    Event::FlashOpenFailed,
                    &[("error", &e.to_string()), ("path", &self.path)],
                );
                self.self_heal();
                return Err(StoreError::FlashOpen {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let expected = self.record.encoded_len();
        let mut buf = vec![0u8; expected];
        let read = read_full(&mut file, &mut buf);
        if let Err(e) = file.close() {
            self.diag.warn(
                Event::FlashCloseFailed,
                &[("error", &e.to_string()), ("path", &self.path)],
            );
        }

        let actual = match read {
            Ok(n) => n,
            Err(e) => {
                self.diag.warn(
                    Event::FlashReadFailed,
                    &[("error", &e.to_string()), ("path", &self.path)],
                );
                self.self_heal();
                return Err(StoreError::FlashRead {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        self.diag
            .info(Event::FlashBytesRead, &[("bytes", &actual.to_string())]);

        if actual != expected {
            self.diag.warn(
                Event::FlashReadFailed,
                &[
                    ("actual", &actual.to_string()),
                    ("expected", &expected.to_string()),
                ],
            );
            self.self_heal();
            return Err(StoreError::FlashShortRead {
                path: self.path.clone(),
                expected,
                actual,
            });
        }

        self.record.fill_from(&buf);
        self.metrics.increment_flash_reads();
        Ok(())
    }

    /// Reset the record and write it back so the next load finds a valid
    /// file. A failed write-back is logged and otherwise ignored.
    fn self_heal(&mut self) {
        self.memory_reset();
        // write_to_flash logs its own failure
        let _ = self.write_to_flash();
    }

    /// Write the whole record to flash, truncating the previous copy.
    fn write_to_flash(&mut self) -> StoreResult<()> {
        let bytes = self.record.encode();

        let mut file = match self.flash.open(&self.path, OpenMode::Write) {
            Ok(file) => file,
            Err(e) => {
                self.diag.error(
                    Event::FlashWriteFailed,
                    &[
                        ("error", &e.to_string()),
                        ("hint", "is the filesystem mounted?"),
                        ("path", &self.path),
                    ],
                );
                return Err(StoreError::FlashOpen {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let written = write_full(&mut file, &bytes).and_then(|n| file.close().map(|()| n));
        let written = match written {
            Ok(n) => n,
            Err(e) => {
                self.diag.error(
                    Event::FlashWriteFailed,
                    &[("error", &e.to_string()), ("path", &self.path)],
                );
                return Err(StoreError::FlashWrite {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        if written != bytes.len() {
            self.diag.error(
                Event::FlashWriteFailed,
                &[
                    ("expected", &bytes.len().to_string()),
                    ("path", &self.path),
                    ("written", &written.to_string()),
                ],
            );
            return Err(StoreError::FlashShortWrite {
                path: self.path.clone(),
                expected: bytes.len(),
                actual: written,
            });
        }

        self.metrics.increment_flash_writes();
        self.diag
            .info(Event::FlashWriteOk, &[("bytes", &written.to_string())]);
        Ok(())
    }

    /// Zero the record, then reseal it.
    fn memory_reset(&mut self) {
        self.record.reset();
        self.metrics.increment_resets();
        self.diag.info(
            Event::MemoryReset,
            &[("checksum", &format!("{:08X}", self.record.checksum()))],
        );
    }
}

impl<R, F> fmt::Debug for DurableBlobStore<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableBlobStore")
            .field("path", &self.path)
            .field("data_length", &self.record.data_length())
            .field("ready", &self.ready)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemoryLog;
    use crate::storage::calculate_crc32;
    use crate::tier::{FlashFaults, MemoryFlash, MemoryRetention};

    const PATH: &str = "/rtc.bin";

    fn config(verbosity: Verbosity) -> StoreConfig {
        StoreConfig::new(PATH, 8, verbosity)
    }

    fn store(
        retention: &MemoryRetention,
        flash: &MemoryFlash,
        log: &MemoryLog,
    ) -> DurableBlobStore<MemoryRetention, MemoryFlash> {
        DurableBlobStore::with_logger(
            config(Verbosity::Verbose),
            retention.clone(),
            flash.clone(),
            Box::new(log.clone()),
        )
        .unwrap()
    }

    fn encoded(payload: &[u8]) -> Vec<u8> {
        BlobRecord::sealed(payload).encode()
    }

    #[test]
    fn test_new_rejects_small_retention() {
        let err = DurableBlobStore::with_logger(
            config(Verbosity::Silent),
            MemoryRetention::new(11),
            MemoryFlash::new(),
            Box::new(MemoryLog::new()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityTooSmall {
                capacity: 11,
                required: 12
            }
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = DurableBlobStore::with_logger(
            StoreConfig::new(PATH, 0, Verbosity::Silent),
            MemoryRetention::new(64),
            MemoryFlash::new(),
            Box::new(MemoryLog::new()),
        )
        .unwrap_err();
        assert_eq!(err.code(), "RTC_INVALID_CONFIG");
    }

    #[test]
    fn test_new_rejects_overflowing_length() {
        let err = DurableBlobStore::with_logger(
            StoreConfig::new(PATH, usize::MAX, Verbosity::Silent),
            MemoryRetention::new(64),
            MemoryFlash::new(),
            Box::new(MemoryLog::new()),
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_data_borrows_shared() {
        let retention = MemoryRetention::new(64);
        retention.load(0, &encoded(b"ABCDEFGH"));
        let log = MemoryLog::new();
        let mut store = store(&retention, &MemoryFlash::new(), &log);
        store.begin().unwrap();

        let data = store.data().unwrap();
        assert_eq!(store.checksum(), calculate_crc32(data));
        assert_eq!(store.data_length(), data.len());
    }

    #[test]
    fn test_flash_close_failure_is_logged() {
        let retention = MemoryRetention::new(64);
        retention.corrupt(0, 0xFF);
        let flash = MemoryFlash::new();
        flash.put(PATH, &encoded(b"FLASHCPY"));
        flash.set_faults(FlashFaults {
            fail_close: true,
            ..FlashFaults::default()
        });
        let log = MemoryLog::new();
        let mut store = DurableBlobStore::with_logger(
            config(Verbosity::Errors),
            retention.clone(),
            flash.clone(),
            Box::new(log.clone()),
        )
        .unwrap();

        assert_eq!(store.begin().unwrap(), LoadSource::Flash);
        assert_eq!(store.data().unwrap(), b"FLASHCPY");
        assert!(log.contains("BLOB_FLASH_CLOSE_FAILED"));
        assert!(!log.contains("BLOB_FLASH_READ_FAILED"));
    }

    #[test]
    fn test_begin_accepts_valid_retention() {
        let retention = MemoryRetention::new(64);
        retention.load(0, &encoded(b"ABCDEFGH"));
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Retention);
        assert_eq!(store.data().unwrap(), b"ABCDEFGH");
        assert_eq!(flash.read_open_count(), 0);
        assert_eq!(flash.write_open_count(), 0);
        assert!(log.contains("BLOB_CHECKSUM_VERIFIED"));
    }

    #[test]
    fn test_begin_is_idempotent() {
        let retention = MemoryRetention::new(64);
        retention.load(0, &encoded(b"ABCDEFGH"));
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        store.begin().unwrap();
        assert_eq!(retention.read_count(), 1);

        assert_eq!(store.begin().unwrap(), LoadSource::Retention);
        assert!(store.is_ready());
        assert_eq!(retention.read_count(), 1);
        assert!(log.contains("BLOB_ALREADY_LOADED"));
    }

    #[test]
    fn test_begin_retention_read_failure_leaves_store_not_ready() {
        let retention = MemoryRetention::new(64);
        retention.set_fail_reads(true);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        let err = store.begin().unwrap_err();
        assert!(matches!(err, StoreError::RetentionRead(_)));
        assert!(!store.is_ready());
        assert_eq!(store.source(), None);
        assert_eq!(flash.read_open_count(), 0);

        retention.set_fail_reads(false);
        assert!(store.begin().is_ok());
    }

    #[test]
    fn test_mismatch_loads_flash_without_revalidating() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        // Flash copy with a wrong checksum is still trusted
        let mut flash_bytes = encoded(b"FLASHCPY");
        flash_bytes[0] ^= 0xFF;
        flash.put(PATH, &flash_bytes);
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Flash);
        assert_eq!(store.data().unwrap(), b"FLASHCPY");
        assert_eq!(&store.checksum().to_le_bytes(), &flash_bytes[..4]);
        assert_eq!(store.metrics().checksum_mismatches, 1);
        assert_eq!(store.metrics().flash_reads, 1);
    }

    #[test]
    fn test_flash_open_failure_self_heals() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        flash.put(PATH, &encoded(b"FLASHCPY"));
        flash.set_faults(FlashFaults {
            fail_open_read: true,
            ..FlashFaults::default()
        });
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Reset);
        assert_eq!(store.data().unwrap(), &[0u8; 8]);
        assert_eq!(flash.file(PATH).unwrap(), encoded(&[0u8; 8]));
        assert!(log.contains("BLOB_FLASH_OPEN_FAILED"));
    }

    #[test]
    fn test_flash_read_error_self_heals() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        flash.put(PATH, &encoded(b"FLASHCPY"));
        flash.set_faults(FlashFaults {
            fail_reads: true,
            ..FlashFaults::default()
        });
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Reset);
        assert_eq!(flash.file(PATH).unwrap(), encoded(&[0u8; 8]));
        assert_eq!(store.metrics().resets, 1);
    }

    #[test]
    fn test_short_flash_file_self_heals() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        flash.put(PATH, &encoded(b"FLASHCPY")[..7]);
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Reset);
        let healed = flash.file(PATH).unwrap();
        assert_eq!(healed.len(), 12);
        assert_eq!(&healed[..4], &calculate_crc32(&[0u8; 8]).to_le_bytes());
    }

    #[test]
    fn test_oversized_flash_file_uses_leading_record() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let mut bytes = encoded(b"FLASHCPY");
        bytes.extend_from_slice(b"trailing");
        flash.put(PATH, &bytes);
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Flash);
        assert_eq!(store.data().unwrap(), b"FLASHCPY");
    }

    #[test]
    fn test_heal_write_failure_still_begins() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        flash.set_faults(FlashFaults {
            fail_open_write: true,
            ..FlashFaults::default()
        });
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert_eq!(store.begin().unwrap(), LoadSource::Reset);
        assert!(store.is_ready());
        assert!(flash.file(PATH).is_none());
        assert!(log.contains("BLOB_FLASH_WRITE_FAILED"));
    }

    #[test]
    fn test_operations_before_begin_fail() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);

        assert!(matches!(store.save(), Err(StoreError::NotReady)));
        assert!(matches!(store.persist(), Err(StoreError::NotReady)));
        assert!(matches!(store.data_mut(), Err(StoreError::NotReady)));
        assert!(matches!(store.data(), Err(StoreError::NotReady)));

        assert_eq!(retention.write_count(), 0);
        assert_eq!(flash.write_open_count(), 0);
        // data() reports NotReady without logging
        assert_eq!(log.events().iter().filter(|e| *e == "BLOB_NOT_READY").count(), 3);
    }

    #[test]
    fn test_save_writes_sealed_record_to_retention_only() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        flash.put(PATH, &encoded(&[0u8; 8]));
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);
        store.begin().unwrap();
        let opens_before = flash.write_open_count();

        store.data_mut().unwrap().copy_from_slice(b"NEWVALUE");
        store.save().unwrap();

        assert_eq!(retention.bytes(0, 12), encoded(b"NEWVALUE"));
        assert_eq!(flash.write_open_count(), opens_before);
        assert_eq!(store.checksum(), calculate_crc32(b"NEWVALUE"));
    }

    #[test]
    fn test_save_reports_retention_write_failure() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);
        store.begin().unwrap();

        retention.set_fail_writes(true);
        let err = store.save().unwrap_err();
        assert!(matches!(err, StoreError::RetentionWrite(_)));
        assert!(log.contains("BLOB_RETENTION_WRITE_FAILED"));
    }

    #[test]
    fn test_persist_skips_flash_when_save_fails() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);
        store.begin().unwrap();
        let before = flash.file(PATH);
        let opens_before = flash.write_open_count();

        retention.set_fail_writes(true);
        store.data_mut().unwrap()[0] = 0x55;
        assert!(store.persist().is_err());
        assert_eq!(flash.write_open_count(), opens_before);
        assert_eq!(flash.file(PATH), before);
    }

    #[test]
    fn test_persist_short_write_is_reported() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = store(&retention, &flash, &log);
        store.begin().unwrap();

        flash.set_faults(FlashFaults {
            write_limit: Some(5),
            ..FlashFaults::default()
        });
        let err = store.persist().unwrap_err();
        assert!(matches!(
            err,
            StoreError::FlashShortWrite {
                expected: 12,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_silent_store_logs_nothing() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = DurableBlobStore::with_logger(
            config(Verbosity::Silent),
            retention.clone(),
            flash.clone(),
            Box::new(log.clone()),
        )
        .unwrap();

        assert!(store.save().is_err());
        store.begin().unwrap();
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_errors_tier_logs_warnings_only() {
        let retention = MemoryRetention::new(64);
        let flash = MemoryFlash::new();
        let log = MemoryLog::new();
        let mut store = DurableBlobStore::with_logger(
            config(Verbosity::Errors),
            retention.clone(),
            flash.clone(),
            Box::new(log.clone()),
        )
        .unwrap();

        store.begin().unwrap();
        let events = log.events();
        assert!(events.contains(&"BLOB_CHECKSUM_MISMATCH".to_string()));
        assert!(events.contains(&"BLOB_FLASH_MISSING".to_string()));
        assert!(!events.contains(&"BLOB_LOAD_START".to_string()));
        assert!(!events.contains(&"BLOB_READY".to_string()));
    }
}
