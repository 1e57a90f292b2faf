//! CLI argument definitions using clap
//!
//! Commands:
//! - rtcblob init --config <path>
//! - rtcblob show --config <path>
//! - rtcblob write --config <path> --hex <HEX> [--persist]
//! - rtcblob persist --config <path>
//! - rtcblob status --config <path>
//! - rtcblob crc --hex <HEX>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rtcblob - checksummed blob in retention memory with flash fallback
#[derive(Parser, Debug)]
#[command(name = "rtcblob")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration and create the flash directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./rtcblob.json")]
        config: PathBuf,
    },

    /// Load the blob and print it
    Show {
        /// Path to configuration file
        #[arg(long, default_value = "./rtcblob.json")]
        config: PathBuf,
    },

    /// Replace the payload and save it
    Write {
        /// Path to configuration file
        #[arg(long, default_value = "./rtcblob.json")]
        config: PathBuf,

        /// New payload as hex; zero-padded to the payload length
        #[arg(long)]
        hex: String,

        /// Also write flash
        #[arg(long)]
        persist: bool,
    },

    /// Write the current blob to both tiers
    Persist {
        /// Path to configuration file
        #[arg(long, default_value = "./rtcblob.json")]
        config: PathBuf,
    },

    /// Print readiness, load source and counters
    Status {
        /// Path to configuration file
        #[arg(long, default_value = "./rtcblob.json")]
        config: PathBuf,
    },

    /// Print the record checksum of arbitrary bytes
    Crc {
        /// Input bytes as hex
        #[arg(long)]
        hex: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
