//! Domain layer for the calculator.
//!
//! This module contains the pure building blocks the engine is assembled from,
//! independent of how inputs arrive or how outputs are shown.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`number`]: Operand parsing and result display formatting
//! - [`operator`]: The four binary operators and their evaluation
//!
//! # Examples
//!
//! ```
//! use keypad_calc::domain::{number, Operator, Result};
//!
//! fn add(lhs: &str, rhs: &str) -> Result<String> {
//!     let sum = Operator::Add.apply(number::parse_operand(lhs)?, number::parse_operand(rhs)?)?;
//!     Ok(number::to_operand(sum))
//! }
//!
//! assert_eq!(add("0.1", "0.2").unwrap(), "0.3");
//! ```

pub mod error;
pub mod number;
pub mod operator;

pub use error::{CalcError, Result};
pub use operator::Operator;
