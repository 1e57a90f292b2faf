//! Configuration
//!
//! [`StoreConfig`] carries the construction-time parameters of a store.
//! [`HostConfig`] adds the host stand-ins for the two tiers and is what the
//! CLI reads from its JSON config file:
//!
//! ```json
//! {
//!   "path": "/rtc.bin",
//!   "data_length": 8,
//!   "verbosity": 1,
//!   "flash_root": "./flash",
//!   "retention_file": "./rtc.mem",
//!   "retention_capacity": 512
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Verbosity;
use crate::storage::{StoreError, StoreResult, CHECKSUM_LEN};

/// Construction-time parameters of a blob store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Flash key of the persistent copy
    pub path: String,

    /// Payload length in bytes
    pub data_length: usize,

    /// Logging tier (optional, default 1)
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl StoreConfig {
    pub fn new(path: impl Into<String>, data_length: usize, verbosity: Verbosity) -> Self {
        Self {
            path: path.into(),
            data_length,
            verbosity,
        }
    }

    /// Encoded record size on either tier
    ///
    /// Saturates for lengths that [`validate`](Self::validate) rejects.
    pub fn record_len(&self) -> usize {
        self.data_length.saturating_add(CHECKSUM_LEN)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.path.trim().is_empty() {
            return Err(StoreError::InvalidConfig("path must not be empty".into()));
        }

        if Path::new(&self.path)
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(StoreError::InvalidConfig(format!(
                "path must not contain '..': {}",
                self.path
            )));
        }

        if self.data_length == 0 {
            return Err(StoreError::InvalidConfig("data_length must be > 0".into()));
        }

        if self.data_length.checked_add(CHECKSUM_LEN).is_none() {
            return Err(StoreError::InvalidConfig(format!(
                "data_length {} overflows the record size",
                self.data_length
            )));
        }

        Ok(())
    }
}

/// Default retention capacity: 512 bytes of user RTC memory
pub const DEFAULT_RETENTION_CAPACITY: usize = 512;

fn default_retention_capacity() -> usize {
    DEFAULT_RETENTION_CAPACITY
}

/// CLI configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(flatten)]
    pub store: StoreConfig,

    /// Directory standing in for the flash filesystem
    pub flash_root: PathBuf,

    /// File standing in for retention memory
    pub retention_file: PathBuf,

    /// Retention memory size in bytes (optional, default 512)
    #[serde(default = "default_retention_capacity")]
    pub retention_capacity: usize,
}

impl HostConfig {
    /// Configuration with every host file placed under `base`
    pub fn under(base: &Path) -> Self {
        Self {
            store: StoreConfig::new("/rtc.bin", 8, Verbosity::Errors),
            flash_root: base.join("flash"),
            retention_file: base.join("rtc.mem"),
            retention_capacity: DEFAULT_RETENTION_CAPACITY,
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: HostConfig = serde_json::from_str(&content)
            .map_err(|e| StoreError::InvalidConfig(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::InvalidConfig(format!("failed to encode config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            StoreError::InvalidConfig(format!("failed to write {}: {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> StoreResult<()> {
        self.store.validate()?;

        if self.retention_capacity < self.store.record_len() {
            return Err(StoreError::CapacityTooSmall {
                capacity: self.retention_capacity,
                required: self.store.record_len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_config_validation() {
        assert!(StoreConfig::new("/rtc.bin", 8, Verbosity::Errors)
            .validate()
            .is_ok());

        let err = StoreConfig::new("", 8, Verbosity::Errors)
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), "RTC_INVALID_CONFIG");

        assert!(StoreConfig::new("/rtc.bin", 0, Verbosity::Errors)
            .validate()
            .is_err());
    }

    #[test]
    fn test_store_config_rejects_overflowing_length() {
        let err = StoreConfig::new("/rtc.bin", usize::MAX, Verbosity::Errors)
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), "RTC_INVALID_CONFIG");

        assert!(StoreConfig::new("/rtc.bin", usize::MAX - CHECKSUM_LEN, Verbosity::Errors)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_store_config_rejects_parent_components() {
        for path in ["../x", "/flash/../../etc/passwd", "a/.."] {
            let err = StoreConfig::new(path, 8, Verbosity::Errors)
                .validate()
                .unwrap_err();
            assert_eq!(err.code(), "RTC_INVALID_CONFIG", "path {}", path);
        }
        assert!(StoreConfig::new("/dir/rtc.bin", 8, Verbosity::Errors)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_load_rejects_overflowing_length() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rtcblob.json");
        fs::write(
            &path,
            r#"{
                "path": "/rtc.bin",
                "data_length": 18446744073709551615,
                "flash_root": "f",
                "retention_file": "r"
            }"#,
        )
        .unwrap();

        let err = HostConfig::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_record_len() {
        assert_eq!(StoreConfig::new("/a", 8, Verbosity::Silent).record_len(), 12);
    }

    #[test]
    fn test_host_config_defaults() {
        let json = r#"{
            "path": "/rtc.bin",
            "data_length": 16,
            "flash_root": "/tmp/flash",
            "retention_file": "/tmp/rtc.mem"
        }"#;
        let config: HostConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.store.verbosity, Verbosity::Errors);
        assert_eq!(config.retention_capacity, 512);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_host_config_rejects_small_capacity() {
        let mut config = HostConfig::under(Path::new("/tmp"));
        config.store.data_length = 600;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            StoreError::CapacityTooSmall {
                capacity: 512,
                required: 604
            }
        ));
    }

    #[test]
    fn test_host_config_rejects_bad_verbosity() {
        let json = r#"{
            "path": "/rtc.bin",
            "data_length": 8,
            "verbosity": 5,
            "flash_root": "f",
            "retention_file": "r"
        }"#;
        assert!(serde_json::from_str::<HostConfig>(json).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rtcblob.json");
        let config = HostConfig::under(temp.path());

        config.save(&path).unwrap();
        assert_eq!(HostConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = HostConfig::load(&temp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code(), "RTC_INVALID_CONFIG");
    }
}
