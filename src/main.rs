//! rtcblob CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, prints errors to stderr
//! and exits non-zero on failure.

use rtcblob::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("[ERROR] {}", e);
        std::process::exit(1);
    }
}
