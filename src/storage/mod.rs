//! Blob storage for rtcblob
//!
//! Holds one fixed-size blob in memory and persists it across two tiers:
//! retention memory (fast, lost on power loss) and flash (slow, durable,
//! finite write endurance).
//!
//! # Design Principles
//!
//! - Same record layout on both tiers: checksum, then payload
//! - Retention record checksum-verified on every load
//! - Flash is the fallback and is written only on `persist` or self-heal
//! - A usable record is always left in memory, zeroed if nothing better
//!
//! # Usage
//!
//! ```
//! use rtcblob::config::StoreConfig;
//! use rtcblob::observability::{MemoryLog, Verbosity};
//! use rtcblob::storage::{DurableBlobStore, LoadSource};
//! use rtcblob::tier::{MemoryFlash, MemoryRetention};
//!
//! let mut store = DurableBlobStore::with_logger(
//!     StoreConfig::new("/rtc.bin", 8, Verbosity::Silent),
//!     MemoryRetention::new(512),
//!     MemoryFlash::new(),
//!     Box::new(MemoryLog::new()),
//! )
//! .unwrap();
//!
//! assert_eq!(store.begin().unwrap(), LoadSource::Reset);
//! store.data_mut().unwrap()[0] = 42;
//! store.save().unwrap();
//! ```

mod checksum;
mod errors;
mod record;
mod store;

pub use checksum::{calculate_crc32, verify_checksum};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use record::{BlobRecord, CHECKSUM_LEN};
pub use store::{DurableBlobStore, LoadSource};
