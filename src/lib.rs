//! keypad-calc: a keystroke-driven calculator engine.
//!
//! The crate models the logic behind a pocket-calculator screen:
//! - Digit, decimal point, operator, equals, sign, percent, delete and clear keys
//! - Exact decimal arithmetic (`0.1 + 0.2` shows `0.3`)
//! - Two observable display strings: the formatted result and the running expression
//! - Two independent calculators with result transfer between them

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal driver (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Symbol → key mapping
//! │  - Command dispatch                                 │  ← Dual calculator
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                   │  ← State machine
//! │  - Input operations and transitions                 │
//! │  - Replay-last display channels                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │  ← Pure helpers
//! │  - Operators, decimal parsing and formatting        │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Keypad mapping, command handling, dual calculator
//! - [`domain`]: Errors, operators, number parsing and display formatting
//! - [`engine`]: The calculator state machine and its display channels
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! ```toml
//! initial_value = "0"
//! max_fraction_digits = 4
//! trace_level = "debug"
//! log_file = "/tmp/keypad-calc.log"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use keypad_calc::{Engine, Operator};
//!
//! let mut engine = Engine::default();
//! engine.number_pressed("1");
//! engine.decimal_pressed();
//! engine.number_pressed("5");
//! engine.operation_pressed(Operator::Multiply);
//! engine.number_pressed("1000");
//! engine.equal_pressed();
//!
//! assert_eq!(engine.result(), "1,500");
//! assert_eq!(engine.process(), "1.5 × 1000");
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod observability;

pub use app::{handle_command, Command, DualCalculator, Key, Side};
pub use domain::{CalcError, Operator, Result};
pub use engine::{Engine, EngineSnapshot, Mode};

use domain::number::{self, DEFAULT_MAX_FRACTION_DIGITS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Largest accepted `max_fraction_digits`.
pub const FRACTION_DIGITS_LIMIT: u32 = 10;

/// Calculator configuration.
///
/// Loaded from a TOML file, or from a flat key/value map supplied by an
/// embedding host. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Operand both calculators start with. Default: `"0"`
    pub initial_value: String,

    /// Fractional digits kept on the result display. Default: `4`
    pub max_fraction_digits: u32,

    /// Tracing filter, e.g. `debug` or `keypad_calc=trace`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_value: "0".to_string(),
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Config`] for malformed TOML, unknown keys, an
    /// `initial_value` that is not a number, or `max_fraction_digits` above
    /// [`FRACTION_DIGITS_LIMIT`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use keypad_calc::Config;
    ///
    /// let config = Config::from_toml_str("max_fraction_digits = 2").unwrap();
    /// assert_eq!(config.max_fraction_digits, 2);
    /// assert_eq!(config.initial_value, "0");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| CalcError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Builds a configuration from a flat string map.
    ///
    /// Missing or unusable values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use keypad_calc::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("initial_value".to_string(), "1,200".to_string());
    /// map.insert("max_fraction_digits".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.initial_value, "1,200");
    /// assert_eq!(config.max_fraction_digits, 4);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let initial_value = map
            .get("initial_value")
            .filter(|v| number::parse_operand(v).is_ok())
            .cloned()
            .unwrap_or(defaults.initial_value);

        let max_fraction_digits = map
            .get("max_fraction_digits")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|d| *d <= FRACTION_DIGITS_LIMIT)
            .unwrap_or(defaults.max_fraction_digits);

        Self {
            initial_value,
            max_fraction_digits,
            trace_level: map.get("trace_level").cloned(),
            log_file: map.get("log_file").map(PathBuf::from),
        }
    }

    fn validate(self) -> Result<Self> {
        if number::parse_operand(&self.initial_value).is_err() {
            return Err(CalcError::Config(format!(
                "initial_value {:?} is not a number",
                self.initial_value
            )));
        }
        if self.max_fraction_digits > FRACTION_DIGITS_LIMIT {
            return Err(CalcError::Config(format!(
                "max_fraction_digits must be at most {FRACTION_DIGITS_LIMIT}, got {}",
                self.max_fraction_digits
            )));
        }
        Ok(self)
    }
}

/// Builds the dual calculator described by `config`.
///
/// # Example
///
/// ```rust
/// use keypad_calc::{initialize, Config, Mode, Side};
///
/// let config = Config {
///     initial_value: "250".to_string(),
///     ..Default::default()
/// };
/// let calc = initialize(&config);
/// assert_eq!(calc.engine(Side::Right).mode(), Mode::EnteringNumber);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> DualCalculator {
    tracing::debug!(
        initial_value = %config.initial_value,
        max_fraction_digits = config.max_fraction_digits,
        "initializing calculators"
    );
    DualCalculator::new(&config.initial_value, config.max_fraction_digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn full_toml_document() {
        let config = Config::from_toml_str(
            r#"
            initial_value = "12,000"
            max_fraction_digits = 6
            trace_level = "debug"
            log_file = "/tmp/calc.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_value, "12,000");
        assert_eq!(config.max_fraction_digits, 6);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/calc.log")));
    }

    #[test]
    fn rejects_bad_values() {
        for text in [
            "max_fraction_digits = 11",
            "initial_value = \"twelve\"",
            "theme = \"dark\"",
            "max_fraction_digits = \"four\"",
        ] {
            assert!(
                matches!(Config::from_toml_str(text), Err(CalcError::Config(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_value = \"42\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.initial_value, "42");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CalcError::Io(_))));
    }

    #[test]
    fn map_falls_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("initial_value".to_string(), "abc".to_string());
        map.insert("max_fraction_digits".to_string(), "99".to_string());
        map.insert("log_file".to_string(), "/tmp/x.log".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.initial_value, "0");
        assert_eq!(config.max_fraction_digits, 4);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config {
            initial_value: "1234.56789".to_string(),
            max_fraction_digits: 2,
            ..Config::default()
        };
        let calc = initialize(&config);
        assert_eq!(calc.left().result(), "1,234.57");
        assert_eq!(calc.right().process(), "1234.56789");
    }
}
