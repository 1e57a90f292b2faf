//! CLI module for rtcblob
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the flash root
//! - show / status: Load the blob and report on it
//! - write / persist: Modify and save the blob
//! - crc: Checksum arbitrary bytes

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{crc, init, persist, run, run_command, show, status, write, HostStore};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{ok_envelope, write_response, write_response_to};
