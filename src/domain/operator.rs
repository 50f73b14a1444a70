//! Binary operators and their exact decimal evaluation.

use super::error::{CalcError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four binary operators a calculator key can select.
///
/// Rendered with the typographic glyphs shown on the keypad (`+ − × ÷`).
/// Parsing also accepts the ASCII spellings `-`, `*`, `x` and `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "−")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    /// Canonical display glyph.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Applies the operator to `lhs` and `rhs`.
    ///
    /// # Errors
    ///
    /// - [`CalcError::DivideByZero`] when dividing by exactly zero
    /// - [`CalcError::Overflow`] when the result leaves the decimal range
    ///
    /// # Example
    ///
    /// ```
    /// use keypad_calc::Operator;
    /// use rust_decimal::Decimal;
    ///
    /// let sum = Operator::Add.apply(Decimal::new(1, 1), Decimal::new(2, 1)).unwrap();
    /// assert_eq!(sum.to_string(), "0.3");
    /// ```
    pub fn apply(self, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
        let value = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs.is_zero() {
                    return Err(CalcError::DivideByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        value.ok_or(CalcError::Overflow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Self::Add),
            "−" | "-" => Ok(Self::Subtract),
            "×" | "*" | "x" => Ok(Self::Multiply),
            "÷" | "/" => Ok(Self::Divide),
            _ => Err(CalcError::UnknownOperation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parses_glyphs_and_ascii_aliases() {
        assert_eq!("−".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("-".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("x".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("/".parse::<Operator>().unwrap(), Operator::Divide);
        assert!(matches!("^".parse::<Operator>(), Err(CalcError::UnknownOperation)));
    }

    #[test]
    fn displays_canonical_glyph() {
        assert_eq!(Operator::Divide.to_string(), "÷");
        assert_eq!("*".parse::<Operator>().unwrap().to_string(), "×");
    }

    #[test]
    fn arithmetic_is_exact() {
        assert_eq!(Operator::Add.apply(dec("0.1"), dec("0.2")).unwrap(), dec("0.3"));
        assert_eq!(Operator::Subtract.apply(dec("5"), dec("8")).unwrap(), dec("-3"));
        assert_eq!(Operator::Multiply.apply(dec("1.5"), dec("4")).unwrap(), dec("6"));
        assert_eq!(Operator::Divide.apply(dec("1"), dec("8")).unwrap(), dec("0.125"));
    }

    #[test]
    fn divide_by_zero_is_rejected() {
        assert!(matches!(
            Operator::Divide.apply(dec("5"), dec("0.000")),
            Err(CalcError::DivideByZero)
        ));
    }

    #[test]
    fn overflow_is_reported_instead_of_panicking() {
        assert!(matches!(
            Operator::Multiply.apply(Decimal::MAX, dec("2")),
            Err(CalcError::Overflow)
        ));
    }
}
