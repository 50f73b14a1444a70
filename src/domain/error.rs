//! Error types for the calculator.
//!
//! This module defines the centralized error type [`CalcError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Calculation errors never escape the engine: they drive it into its invalid
//! mode and their `Display` text becomes the published result. The remaining
//! variants belong to configuration loading and the terminal driver.

use thiserror::Error;

/// The main error type for calculator operations.
///
/// # Examples
///
/// ```
/// use keypad_calc::CalcError;
///
/// assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by zero");
/// assert!(CalcError::InvalidInput.is_calculation());
/// assert!(!CalcError::Config("bad".to_string()).is_calculation());
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// An operand string could not be parsed as a decimal number.
    #[error("Invalid input")]
    InvalidInput,

    /// Division with a divisor that is exactly zero.
    #[error("Cannot divide by zero")]
    DivideByZero,

    /// Operator symbol outside the supported set.
    #[error("Unknown operation")]
    UnknownOperation,

    /// Arithmetic result does not fit the decimal range.
    #[error("Result out of range")]
    Overflow,

    /// Configuration is invalid or malformed.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalcError {
    /// Returns `true` for errors that put an engine into its invalid mode.
    #[must_use]
    pub const fn is_calculation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput | Self::DivideByZero | Self::UnknownOperation | Self::Overflow
        )
    }
}

/// A specialized `Result` type for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;
