//! Structured JSON logger for the blob store
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields in alphabetical order
//! - Synchronous, no buffering
//! - Output is gated by a [`Verbosity`] tier fixed at store construction

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Fine-grained detail (checksum values, byte counts)
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging tier
///
/// Serialized as its numeric level: 0 = silent, 1 = warnings and errors,
/// 2 = verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Verbosity {
    Silent = 0,
    Errors = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Whether a line of `severity` is emitted at this tier
    pub fn allows(&self, severity: Severity) -> bool {
        match self {
            Verbosity::Silent => false,
            Verbosity::Errors => severity >= Severity::Warn,
            Verbosity::Verbose => true,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Errors
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Verbosity::Silent),
            1 => Ok(Verbosity::Errors),
            2 => Ok(Verbosity::Verbose),
            other => Err(format!("verbosity must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<Verbosity> for u8 {
    fn from(verbosity: Verbosity) -> u8 {
        verbosity.level()
    }
}

/// Destination for log lines
pub trait LogSink {
    fn log_line(&mut self, severity: Severity, event: &str, fields: &[(&str, &str)]);
}

/// Render one JSON log line, newline included
pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);

    output.push('{');

    // Always output event first
    output.push_str("\"event\":\"");
    escape_json_string(&mut output, event);
    output.push('"');

    output.push_str(",\"severity\":\"");
    output.push_str(severity.as_str());
    output.push('"');

    // Sort fields alphabetically for deterministic output
    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push_str(",\"");
        escape_json_string(&mut output, key);
        output.push_str("\":\"");
        escape_json_string(&mut output, value);
        output.push('"');
    }

    output.push('}');
    output.push('\n');
    output
}

/// Escape special characters for JSON strings
fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}

/// Writes JSON lines to any writer (stderr by default)
pub struct JsonLogger<W: Write> {
    writer: W,
}

impl JsonLogger<io::Stderr> {
    pub fn stderr() -> Self {
        Self {
            writer: io::stderr(),
        }
    }
}

impl<W: Write> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for JsonLogger<W> {
    fn log_line(&mut self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = format_line(severity, event, fields);
        // Write atomically (one syscall); a failing log never fails the store
        let _ = self.writer.write_all(line.as_bytes());
        let _ = self.writer.flush();
    }
}

/// Captures log lines in memory
///
/// Clones share the same buffer, so a test can keep one clone while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, newline-terminated JSON
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Event names of captured lines, in order
    pub fn events(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| {
                serde_json::from_str::<serde_json::Value>(line)
                    .ok()
                    .and_then(|v| v["event"].as_str().map(str::to_string))
            })
            .collect()
    }

    /// Whether an event with this name was captured
    pub fn contains(&self, event: &str) -> bool {
        self.events().iter().any(|e| e == event)
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl LogSink for MemoryLog {
    fn log_line(&mut self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        self.lines
            .borrow_mut()
            .push(format_line(severity, event, fields));
    }
}

/// Verbosity-gated front end over a [`LogSink`]
pub struct Diagnostics {
    verbosity: Verbosity,
    sink: Box<dyn LogSink>,
}

impl Diagnostics {
    pub fn new(verbosity: Verbosity, sink: Box<dyn LogSink>) -> Self {
        Self { verbosity, sink }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Log if the verbosity tier allows `severity`
    pub fn log(&mut self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if self.verbosity.allows(severity) {
            self.sink.log_line(severity, event.as_str(), fields);
        }
    }

    /// Log at TRACE level
    pub fn trace(&mut self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(&mut self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(&mut self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(&mut self, event: Event, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}
