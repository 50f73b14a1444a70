//! Keypad symbols and their mapping to engine inputs.

use crate::domain::Operator;
use std::fmt;

/// One key on the calculator keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit `0`–`9`.
    Digit(char),
    /// The decimal point.
    Decimal,
    /// One of the four operator keys.
    Operator(Operator),
    /// `=`
    Equals,
    /// `C`
    Clear,
    /// `±`
    ToggleSign,
    /// `%`
    Percent,
    /// Backspace.
    Delete,
}

impl Key {
    /// Maps a pressed symbol to a key.
    ///
    /// Returns `None` for symbols the keypad does not have.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keypad_calc::app::Key;
    /// use keypad_calc::Operator;
    ///
    /// assert_eq!(Key::from_symbol("7"), Some(Key::Digit('7')));
    /// assert_eq!(Key::from_symbol("÷"), Some(Key::Operator(Operator::Divide)));
    /// assert_eq!(Key::from_symbol("del"), Some(Key::Delete));
    /// assert_eq!(Key::from_symbol("sqrt"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let key = match symbol {
            "." => Self::Decimal,
            "=" => Self::Equals,
            "C" | "c" => Self::Clear,
            "±" => Self::ToggleSign,
            "%" => Self::Percent,
            "⌫" | "del" => Self::Delete,
            _ => {
                if let Ok(op) = symbol.parse::<Operator>() {
                    return Some(Self::Operator(op));
                }
                let mut chars = symbol.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Splits a run of symbols such as `"12+3="` into keys.
    ///
    /// A token that is itself a symbol (`"del"`, `"C"`) maps to a single key;
    /// otherwise every character must be one. Returns `None` if any is unknown.
    #[must_use]
    pub fn parse_sequence(token: &str) -> Option<Vec<Self>> {
        if let Some(key) = Self::from_symbol(token) {
            return Some(vec![key]);
        }
        let mut buf = [0u8; 4];
        token
            .chars()
            .map(|c| Self::from_symbol(c.encode_utf8(&mut buf)))
            .collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("C"),
            Self::ToggleSign => f.write_str("±"),
            Self::Percent => f.write_str("%"),
            Self::Delete => f.write_str("⌫"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_keypad_symbol() {
        for symbol in ["0", "9", ".", "+", "−", "×", "÷", "=", "C", "±", "%", "⌫"] {
            let key = Key::from_symbol(symbol).unwrap();
            assert_eq!(key.to_string(), symbol);
        }
    }

    #[test]
    fn rejects_multi_digit_and_unknown_symbols() {
        assert_eq!(Key::from_symbol("12"), None);
        assert_eq!(Key::from_symbol("a"), None);
        assert_eq!(Key::from_symbol(""), None);
    }

    #[test]
    fn splits_symbol_runs() {
        let keys = Key::parse_sequence("12+3=").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Digit('1'),
                Key::Digit('2'),
                Key::Operator(Operator::Add),
                Key::Digit('3'),
                Key::Equals,
            ]
        );
        assert_eq!(Key::parse_sequence("del"), Some(vec![Key::Delete]));
        assert_eq!(Key::parse_sequence("1q"), None);
    }
}
