//! Command handling for keypad input and calculator transfers.
//!
//! This module translates discrete user commands into engine calls. A keypad
//! key always becomes exactly one engine input operation; the remaining
//! commands act on the [`DualCalculator`] around the engines.
//!
//! # Command Types
//!
//! - **Keypad**: `Key(..)`, routed to the focused engine
//! - **Focus**: `SwitchFocus`, moves keypad input to the other engine
//! - **Transfer**: `Transfer(side)`, seeds the opposite engine with `side`'s result
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::app::{handle_command, Command, DualCalculator};
//!
//! let mut calc = DualCalculator::default();
//! for token in ["12", "+", "30", "=", ">>"] {
//!     for command in Command::parse(token).unwrap() {
//!         handle_command(&mut calc, &command);
//!     }
//! }
//! assert_eq!(calc.right().result(), "42");
//! ```

use super::dual::{DualCalculator, Side};
use super::keys::Key;
use crate::engine::Engine;

/// A discrete user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A keypad key for the focused engine.
    Key(Key),
    /// Moves keypad focus to the other engine.
    SwitchFocus,
    /// Copies the result of the given side into the other side.
    Transfer(Side),
}

impl Command {
    /// Parses one whitespace-free token.
    ///
    /// `tab` switches focus, `>>` transfers left to right and `<<` right to
    /// left. Anything else is read as keypad symbols via [`Key::parse_sequence`].
    #[must_use]
    pub fn parse(token: &str) -> Option<Vec<Self>> {
        match token {
            "tab" => Some(vec![Self::SwitchFocus]),
            ">>" => Some(vec![Self::Transfer(Side::Left)]),
            "<<" => Some(vec![Self::Transfer(Side::Right)]),
            _ => Key::parse_sequence(token).map(|keys| keys.into_iter().map(Self::Key).collect()),
        }
    }
}

/// Delivers one key to an engine as exactly one input operation.
pub fn handle_key(engine: &mut Engine, key: &Key) {
    match key {
        Key::Digit(digit) => {
            let mut buf = [0u8; 4];
            engine.number_pressed(digit.encode_utf8(&mut buf));
        }
        Key::Decimal => engine.decimal_pressed(),
        Key::Operator(op) => engine.operation_pressed(*op),
        Key::Equals => engine.equal_pressed(),
        Key::Clear => engine.clear_pressed(),
        Key::ToggleSign => engine.toggle_sign(),
        Key::Percent => engine.apply_percentage(),
        Key::Delete => engine.delete_pressed(),
    }
}

/// Applies a command to the dual calculator.
///
/// Returns `false` when the command had no effect (a refused transfer).
pub fn handle_command(calc: &mut DualCalculator, command: &Command) -> bool {
    let _span = tracing::debug_span!("handle_command", command = ?command).entered();

    match command {
        Command::Key(key) => {
            handle_key(calc.focused_mut(), key);
            true
        }
        Command::SwitchFocus => {
            calc.switch_focus();
            true
        }
        Command::Transfer(from) => calc.transfer(*from),
    }
}
