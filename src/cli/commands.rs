//! CLI command implementations
//!
//! Each command loads the host configuration, opens both host tiers,
//! runs `begin()` and then does its own work. Commands return the JSON
//! payload; [`run_command`] wraps it in the response envelope.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::config::HostConfig;
use crate::storage::{calculate_crc32, DurableBlobStore};
use crate::tier::{FileRetention, FsFlash};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Store over the host tiers
pub type HostStore = DurableBlobStore<FileRetention, FsFlash>;

/// Run CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Init { config } => init(&config)?,
        Command::Show { config } => show(&config)?,
        Command::Write {
            config,
            hex,
            persist: also_flash,
        } => write(&config, &hex, also_flash)?,
        Command::Persist { config } => persist(&config)?,
        Command::Status { config } => status(&config)?,
        Command::Crc { hex } => crc(&hex)?,
    };

    write_response(data)
}

/// Write a default configuration if none exists and create the flash root
pub fn init(config_path: &Path) -> CliResult<Value> {
    let created = !config_path.exists();

    let config = if created {
        let base = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let config = HostConfig::under(base);
        config.save(config_path)?;
        config
    } else {
        HostConfig::load(config_path)?
    };

    fs::create_dir_all(&config.flash_root).map_err(|e| {
        CliError::io_error(format!(
            "failed to create {}: {}",
            config.flash_root.display(),
            e
        ))
    })?;

    Ok(json!({
        "config": config_path.display().to_string(),
        "created": created,
        "flash_root": config.flash_root.display().to_string(),
        "retention_file": config.retention_file.display().to_string(),
    }))
}

/// Load the blob and print its source, checksum and payload
pub fn show(config_path: &Path) -> CliResult<Value> {
    let mut store = open_store(config_path)?;
    let source = store.begin()?;
    let payload = hex::encode(store.data()?);

    Ok(json!({
        "source": source.as_str(),
        "checksum": format_checksum(store.checksum()),
        "payload": payload,
    }))
}

/// Replace the payload and save it, optionally to flash too
///
/// Input shorter than the payload is zero-padded.
pub fn write(config_path: &Path, hex_input: &str, also_flash: bool) -> CliResult<Value> {
    let bytes = hex::decode(hex_input.trim())?;

    let mut store = open_store(config_path)?;
    if bytes.len() > store.data_length() {
        return Err(CliError::invalid_input(format!(
            "payload is {} bytes, maximum is {}",
            bytes.len(),
            store.data_length()
        )));
    }

    store.begin()?;

    let data = store.data_mut()?;
    data.fill(0);
    data[..bytes.len()].copy_from_slice(&bytes);

    if also_flash {
        store.persist()?;
    } else {
        store.save()?;
    }

    Ok(json!({
        "checksum": format_checksum(store.checksum()),
        "payload": hex::encode(store.data()?),
        "persisted": also_flash,
    }))
}

/// Write the current blob to both tiers
pub fn persist(config_path: &Path) -> CliResult<Value> {
    let mut store = open_store(config_path)?;
    let source = store.begin()?;
    store.persist()?;

    Ok(json!({
        "source": source.as_str(),
        "checksum": format_checksum(store.checksum()),
        "path": store.path(),
    }))
}

/// Print readiness, load source, sizes and counters
pub fn status(config_path: &Path) -> CliResult<Value> {
    let mut store = open_store(config_path)?;
    let source = store.begin()?;

    Ok(json!({
        "ready": store.is_ready(),
        "source": source.as_str(),
        "path": store.path(),
        "data_length": store.data_length(),
        "verbosity": store.verbosity().level(),
        "metrics": serde_json::to_value(store.metrics())?,
    }))
}

/// Checksum of arbitrary bytes
pub fn crc(hex_input: &str) -> CliResult<Value> {
    let bytes = hex::decode(hex_input.trim())?;

    Ok(json!({
        "length": bytes.len(),
        "checksum": format_checksum(calculate_crc32(&bytes)),
    }))
}

fn open_store(config_path: &Path) -> CliResult<HostStore> {
    let config = HostConfig::load(config_path)?;

    let retention =
        FileRetention::open(&config.retention_file, config.retention_capacity).map_err(|e| {
            CliError::io_error(format!(
                "failed to open {}: {}",
                config.retention_file.display(),
                e
            ))
        })?;
    let flash = FsFlash::new(config.flash_root);

    Ok(DurableBlobStore::new(config.store, retention, flash)?)
}

fn format_checksum(checksum: u32) -> String {
    format!("{:08X}", checksum)
}
