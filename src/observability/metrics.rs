//! Blob store counters
//!
//! - Counters only, monotonic
//! - Reset only when the store is constructed
//! - `flash_writes` is the number to watch for wear

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Operation counters for one store instance
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Successful retention reads
    retention_reads: AtomicU64,
    /// Successful retention writes
    retention_writes: AtomicU64,
    /// Successful flash loads
    flash_reads: AtomicU64,
    /// Successful flash writes (full record)
    flash_writes: AtomicU64,
    /// Retention records rejected by checksum
    checksum_mismatches: AtomicU64,
    /// Records zeroed because flash was unusable
    resets: AtomicU64,
}

impl StoreMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_retention_reads(&self) {
        self.retention_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_retention_writes(&self) {
        self.retention_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_flash_reads(&self) {
        self.flash_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_flash_writes(&self) {
        self.flash_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_checksum_mismatches(&self) {
        self.checksum_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_resets(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn flash_writes(&self) -> u64 {
        self.flash_writes.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            retention_reads: self.retention_reads.load(Ordering::Relaxed),
            retention_writes: self.retention_writes.load(Ordering::Relaxed),
            flash_reads: self.flash_reads.load(Ordering::Relaxed),
            flash_writes: self.flash_writes.load(Ordering::Relaxed),
            checksum_mismatches: self.checksum_mismatches.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}

/// Serializable copy of [`StoreMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub retention_reads: u64,
    pub retention_writes: u64,
    pub flash_reads: u64,
    pub flash_writes: u64,
    pub checksum_mismatches: u64,
    pub resets: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = StoreMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increments() {
        let metrics = StoreMetrics::new();
        metrics.increment_retention_reads();
        metrics.increment_retention_writes();
        metrics.increment_retention_writes();
        metrics.increment_flash_writes();
        metrics.increment_checksum_mismatches();
        metrics.increment_resets();

        let snap = metrics.snapshot();
        assert_eq!(snap.retention_reads, 1);
        assert_eq!(snap.retention_writes, 2);
        assert_eq!(snap.flash_reads, 0);
        assert_eq!(snap.flash_writes, 1);
        assert_eq!(snap.checksum_mismatches, 1);
        assert_eq!(snap.resets, 1);
        assert_eq!(metrics.flash_writes(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = StoreMetrics::new();
        metrics.increment_flash_reads();
        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["flash_reads"], 1);
        assert_eq!(json["resets"], 0);
    }
}
