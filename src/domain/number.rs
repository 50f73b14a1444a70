//! Decimal parsing and display formatting for operand strings.
//!
//! Operands travel through the engine as raw text (no grouping separators) so
//! that digit entry, deletion and sign toggling stay purely textual. This module
//! converts that text to [`Decimal`] for arithmetic and renders values for the
//! result display.

use super::error::{CalcError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Thousands separator inserted by [`format_display`].
pub const GROUPING_SEPARATOR: char = ',';

/// Default number of fractional digits kept on the result display.
pub const DEFAULT_MAX_FRACTION_DIGITS: u32 = 4;

/// Removes every grouping separator from `value`.
///
/// # Example
///
/// ```
/// use keypad_calc::domain::number::strip_separators;
///
/// assert_eq!(strip_separators("1,234,567.5"), "1234567.5");
/// ```
#[must_use]
pub fn strip_separators(value: &str) -> String {
    value.replace(GROUPING_SEPARATOR, "")
}

/// Parses an operand string as an exact decimal.
///
/// Separators are ignored. A trailing decimal point (`"5."`) and a missing
/// integer part (`".5"`, `"-.5"`) are accepted the way they appear mid-entry.
///
/// # Errors
///
/// Returns [`CalcError::InvalidInput`] for empty text, a lone sign or point,
/// or anything else that is not a decimal number, and [`CalcError::Overflow`]
/// for a well-formed number that does not fit a [`Decimal`].
pub fn parse_operand(value: &str) -> Result<Decimal> {
    let cleaned = strip_separators(value);
    let trimmed = cleaned.strip_suffix('.').unwrap_or(&cleaned);

    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if magnitude.is_empty() || magnitude.starts_with(|c: char| c == '-' || c == '+') {
        return Err(CalcError::InvalidInput);
    }

    let padded = if magnitude.starts_with('.') {
        format!("0{magnitude}")
    } else {
        magnitude.to_string()
    };

    let parsed = Decimal::from_str(&padded).map_err(|_| {
        if is_decimal_literal(&padded) {
            CalcError::Overflow
        } else {
            CalcError::InvalidInput
        }
    })?;
    Ok(if negative { -parsed } else { parsed })
}

/// Digits with at most one decimal point.
fn is_decimal_literal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && text.bytes().filter(|&b| b == b'.').count() <= 1
}

/// Renders a computed value as raw operand text.
///
/// Trailing fractional zeros are dropped and negative zero collapses to `"0"`.
#[must_use]
pub fn to_operand(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats a result string for display.
///
/// Text that already contains a separator, or that ends in a decimal point
/// because the user is mid-entry, passes through untouched, as does anything
/// that does not parse (error messages, a lone `"-"`). Numbers are rounded to
/// `max_fraction_digits`, lose trailing fractional zeros and get thousands
/// separators. Numbers too large for a [`Decimal`] are grouped as typed.
///
/// # Example
///
/// ```
/// use keypad_calc::domain::number::format_display;
///
/// assert_eq!(format_display("1234567.891234", 4), "1,234,567.8912");
/// assert_eq!(format_display("12.", 4), "12.");
/// assert_eq!(format_display("Cannot divide by zero", 4), "Cannot divide by zero");
/// ```
#[must_use]
pub fn format_display(raw: &str, max_fraction_digits: u32) -> String {
    if raw.contains(GROUPING_SEPARATOR) || raw.ends_with('.') {
        return raw.to_string();
    }
    let rounded = match parse_operand(raw) {
        Ok(value) => value
            .abs()
            .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointNearestEven)
            .normalize()
            .to_string(),
        Err(CalcError::Overflow) => raw.trim_start_matches('-').to_string(),
        Err(_) => return raw.to_string(),
    };

    let (integer, fraction) = match rounded.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rounded.as_str(), None),
    };

    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if raw.starts_with('-') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mid_entry_forms() {
        assert_eq!(parse_operand("5.").unwrap(), Decimal::from(5));
        assert_eq!(parse_operand(".5").unwrap(), Decimal::new(5, 1));
        assert_eq!(parse_operand("-.5").unwrap(), Decimal::new(-5, 1));
        assert_eq!(parse_operand("12,345").unwrap(), Decimal::from(12345));
    }

    #[test]
    fn rejects_non_numbers() {
        for bad in ["", "-", ".", "-.", "--5", "abc", "Invalid input", "1.2.3"] {
            assert!(
                matches!(parse_operand(bad), Err(CalcError::InvalidInput)),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn out_of_range_numbers_overflow() {
        let thirty_ones = "1".repeat(30);
        assert!(matches!(parse_operand(&thirty_ones), Err(CalcError::Overflow)));
        assert!(matches!(
            parse_operand(&format!("-{thirty_ones}.")),
            Err(CalcError::Overflow)
        ));
    }

    #[test]
    fn out_of_range_numbers_are_still_grouped() {
        let typed = "1".repeat(30);
        let shown = format_display(&typed, 4);
        assert_eq!(shown, format!("111{}", ",111".repeat(9)));
        assert_eq!(format_display(&format!("-{typed}"), 4), format!("-{shown}"));
    }

    #[test]
    fn operand_text_is_normalized() {
        assert_eq!(to_operand(Decimal::new(500, 3)), "0.5");
        assert_eq!(to_operand(Decimal::new(800, 2)), "8");
        assert_eq!(to_operand(-Decimal::ZERO), "0");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_display("12345", 4), "12,345");
        assert_eq!(format_display("1000000", 4), "1,000,000");
        assert_eq!(format_display("999", 4), "999");
        assert_eq!(format_display("-1234.5", 4), "-1,234.5");
    }

    #[test]
    fn limits_and_trims_fraction_digits() {
        assert_eq!(format_display("0.3333333333333333333333333333", 4), "0.3333");
        assert_eq!(format_display("3.10", 4), "3.1");
        assert_eq!(format_display("2.00001", 4), "2");
        assert_eq!(format_display("0.66666", 2), "0.67");
    }

    #[test]
    fn passes_through_formatted_and_unparseable_text() {
        assert_eq!(format_display("1,234", 4), "1,234");
        assert_eq!(format_display("0.", 4), "0.");
        assert_eq!(format_display("-", 4), "-");
        assert_eq!(format_display("", 4), "");
    }

    #[test]
    fn keeps_textual_negative_zero() {
        assert_eq!(format_display("-0", 4), "-0");
    }
}
