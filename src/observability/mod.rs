//! Observability for the blob store
//!
//! - Structured logging (JSON lines), gated by verbosity
//! - Typed lifecycle events
//! - Operation counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. A failing log sink never fails a store operation
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```
//! use rtcblob::observability::{Diagnostics, Event, MemoryLog, Verbosity};
//!
//! let log = MemoryLog::new();
//! let mut diag = Diagnostics::new(Verbosity::Verbose, Box::new(log.clone()));
//! diag.info(Event::Ready, &[("path", "/rtc.bin")]);
//! assert!(log.contains("BLOB_READY"));
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{format_line, Diagnostics, JsonLogger, LogSink, MemoryLog, Severity, Verbosity};
pub use metrics::{MetricsSnapshot, StoreMetrics};
