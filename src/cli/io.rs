//! JSON output for the CLI
//!
//! - Output: single JSON object per command on stdout
//! - Errors go to stderr via main

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Wrap command output in the success envelope
pub fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Write a success response to `out`
pub fn write_response_to<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, &ok_envelope(data))?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}
