//! rtcblob - checksummed two-tier persistence of a fixed-size blob
//!
//! Retention memory is fast but lost on power loss; flash survives power
//! loss but wears out. The store keeps one blob in both, verifies the fast
//! copy on load, and falls back to the slow one when it is corrupt.

pub mod cli;
pub mod config;
pub mod observability;
pub mod storage;
pub mod tier;
