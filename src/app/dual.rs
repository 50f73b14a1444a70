//! Two independent calculators with result transfer between them.
//!
//! The engines share no state. The only interaction is an explicit transfer,
//! which reads one engine's published result, strips its grouping separators
//! and feeds it to the other engine's `reset_initial_value`.

use crate::domain::number::{strip_separators, DEFAULT_MAX_FRACTION_DIGITS};
use crate::engine::{Engine, EngineSnapshot};
use serde::Serialize;
use std::fmt;

/// Which of the two calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Serializable view of both calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DualSnapshot {
    pub focus: Side,
    pub left: EngineSnapshot,
    pub right: EngineSnapshot,
}

/// A pair of calculators plus the side keypad input goes to.
#[derive(Debug)]
pub struct DualCalculator {
    left: Engine,
    right: Engine,
    focus: Side,
}

impl DualCalculator {
    /// Creates two engines showing `initial_value`, focus on the left.
    #[must_use]
    pub fn new(initial_value: &str, max_fraction_digits: u32) -> Self {
        Self::from_engines(
            Engine::with_fraction_digits(initial_value, max_fraction_digits),
            Engine::with_fraction_digits(initial_value, max_fraction_digits),
        )
    }

    /// Wraps two existing engines, focus on the left.
    #[must_use]
    pub const fn from_engines(left: Engine, right: Engine) -> Self {
        Self {
            left,
            right,
            focus: Side::Left,
        }
    }

    #[must_use]
    pub const fn left(&self) -> &Engine {
        &self.left
    }

    #[must_use]
    pub const fn right(&self) -> &Engine {
        &self.right
    }

    #[must_use]
    pub const fn engine(&self, side: Side) -> &Engine {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn engine_mut(&mut self, side: Side) -> &mut Engine {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[must_use]
    pub const fn focus(&self) -> Side {
        self.focus
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
        tracing::debug!(focus = ?self.focus, "focus switched");
    }

    /// The engine keypad input currently goes to.
    pub fn focused_mut(&mut self) -> &mut Engine {
        self.engine_mut(self.focus)
    }

    #[must_use]
    pub fn snapshot(&self) -> DualSnapshot {
        DualSnapshot {
            focus: self.focus,
            left: self.left.snapshot(),
            right: self.right.snapshot(),
        }
    }

    /// Seeds the other engine with the result shown on `from`.
    ///
    /// Refused, returning `false`, while `from` shows an error message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keypad_calc::app::{DualCalculator, Side};
    ///
    /// let mut calc = DualCalculator::default();
    /// calc.focused_mut().number_pressed("2500");
    /// assert!(calc.transfer(Side::Left));
    /// assert_eq!(calc.right().result(), "2,500");
    /// assert_eq!(calc.right().process(), "2500");
    /// ```
    pub fn transfer(&mut self, from: Side) -> bool {
        let source = self.engine(from);
        if source.mode().is_invalid() {
            tracing::debug!(?from, "transfer refused, source shows an error");
            return false;
        }
        let value = strip_separators(source.result());
        tracing::info!(?from, %value, "transferring result");
        self.engine_mut(from.other()).reset_initial_value(&value);
        true
    }
}

impl Default for DualCalculator {
    fn default() -> Self {
        Self::new("0", DEFAULT_MAX_FRACTION_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Mode;
    use crate::Operator;

    #[test]
    fn engines_are_independent() {
        let mut calc = DualCalculator::default();
        calc.engine_mut(Side::Left).number_pressed("5");
        calc.engine_mut(Side::Left).operation_pressed(Operator::Add);

        assert_eq!(calc.left().mode(), Mode::OperatorPending);
        assert_eq!(calc.right().mode(), Mode::Initial);
        assert_eq!(calc.right().result(), "0");
    }

    #[test]
    fn transfer_uses_the_displayed_result() {
        let mut calc = DualCalculator::default();
        let right = calc.engine_mut(Side::Right);
        right.number_pressed("1");
        right.operation_pressed(Operator::Divide);
        right.number_pressed("3");
        right.equal_pressed();

        assert!(calc.transfer(Side::Right));
        assert_eq!(calc.left().state().current_input, "0.3333");
        assert_eq!(calc.left().mode(), Mode::EnteringNumber);
    }

    #[test]
    fn transfer_of_zero_lands_in_initial_mode() {
        let mut calc = DualCalculator::default();
        calc.engine_mut(Side::Right).number_pressed("9");
        assert!(calc.transfer(Side::Left));
        assert_eq!(calc.right().mode(), Mode::Initial);
        assert_eq!(calc.right().result(), "0");
    }

    #[test]
    fn snapshot_serializes_both_sides() {
        let mut calc = DualCalculator::default();
        calc.switch_focus();
        calc.focused_mut().number_pressed("3");

        let json = serde_json::to_value(calc.snapshot()).unwrap();
        assert_eq!(json["focus"], "right");
        assert_eq!(json["right"]["result"], "3");
        assert_eq!(json["left"]["mode"], "initial");
    }

    #[test]
    fn transfer_from_error_is_refused() {
        let mut calc = DualCalculator::default();
        let left = calc.engine_mut(Side::Left);
        left.number_pressed("1");
        left.operation_pressed(Operator::Divide);
        left.number_pressed("0");
        left.equal_pressed();
        calc.engine_mut(Side::Right).number_pressed("4");

        assert!(!calc.transfer(Side::Left));
        assert_eq!(calc.right().result(), "4");
    }

    #[test]
    fn transfer_clears_an_invalid_target() {
        let mut calc = DualCalculator::default();
        let right = calc.engine_mut(Side::Right);
        right.number_pressed("1");
        right.operation_pressed(Operator::Divide);
        right.number_pressed("0");
        right.equal_pressed();
        calc.engine_mut(Side::Left).number_pressed("8");

        assert!(calc.transfer(Side::Left));
        assert_eq!(calc.right().mode(), Mode::EnteringNumber);
        assert_eq!(calc.right().result(), "8");
    }
}
