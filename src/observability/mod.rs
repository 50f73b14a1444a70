//! Structured logging for the calculator.
//!
//! All crate code logs through `tracing` macros; this module installs the
//! subscriber that turns those events into text.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | rotating LogFile
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating log file writer

pub mod file_writer;
mod init;

pub use file_writer::LogFile;
pub use init::init_tracing;
