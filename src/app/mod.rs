//! Application layer: keypad mapping and the dual-calculator surface.
//!
//! This module sits between whatever presents the calculator (the terminal
//! driver in `main.rs`, or an embedding UI) and the engine. It owns no
//! arithmetic of its own.
//!
//! # Architecture
//!
//! ```text
//! Symbol → Key / Command → handle_command → Engine input operation → display channels
//!                               │
//!                               └─► DualCalculator (focus, transfer)
//! ```
//!
//! # Modules
//!
//! - [`dual`]: Two independent engines with result transfer
//! - [`handler`]: Command parsing and dispatch
//! - [`keys`]: Keypad symbols

pub mod dual;
pub mod handler;
pub mod keys;

pub use dual::{DualCalculator, DualSnapshot, Side};
pub use handler::{handle_command, handle_key, Command};
pub use keys::Key;
