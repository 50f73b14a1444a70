//! Engine state record and its serializable snapshot.
//!
//! [`EngineState`] is the single source of truth behind one calculator. It is
//! owned exclusively by an [`Engine`](super::Engine); callers only ever see it
//! through a shared reference or an [`EngineSnapshot`].
//!
//! # State Components
//!
//! - **Operands**: `current_input` and `previous_input`, raw text without
//!   grouping separators
//! - **Operator**: the pending or last-executed binary operator
//! - **Result / Process**: the authoritative texts behind the two display channels
//! - **Mode**: the state machine tag, see [`Mode`]

use super::mode::Mode;
use crate::domain::number::strip_separators;
use crate::domain::{CalcError, Operator};
use serde::Serialize;

/// Mutable state of one calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    /// Operand currently being typed or just computed. May be empty.
    pub current_input: String,

    /// Left-hand operand captured when an operator was pressed.
    pub previous_input: String,

    /// Pending operator, or the operator `=` will repeat after a result.
    pub operation: Option<Operator>,

    /// Value to render as the result, before display formatting.
    pub result_string: String,

    /// Value to render as the running expression.
    pub process_string: String,

    /// Current state machine tag.
    pub mode: Mode,
}

impl EngineState {
    /// Creates a state seeded with `initial_value`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keypad_calc::engine::{EngineState, Mode};
    ///
    /// let state = EngineState::new("1,024");
    /// assert_eq!(state.current_input, "1024");
    /// assert_eq!(state.mode, Mode::EnteringNumber);
    /// assert_eq!(EngineState::new("0").mode, Mode::Initial);
    /// ```
    #[must_use]
    pub fn new(initial_value: &str) -> Self {
        let mut state = Self {
            current_input: String::new(),
            previous_input: String::new(),
            operation: None,
            result_string: String::new(),
            process_string: String::new(),
            mode: Mode::Initial,
        };
        state.reset(initial_value);
        state
    }

    /// Reinitializes every field in place around `value`.
    ///
    /// Grouping separators are stripped first, so a formatted result read from
    /// another calculator can be fed back in directly.
    pub fn reset(&mut self, value: &str) {
        let unformatted = strip_separators(value);
        self.mode = Mode::for_reset_value(&unformatted);
        self.previous_input.clear();
        self.operation = None;
        self.result_string.clone_from(&unformatted);
        self.current_input = unformatted;
        self.refresh_process();
    }

    /// Enters [`Mode::Invalid`], showing `error` as the result.
    pub fn fail(&mut self, error: &CalcError) {
        self.result_string = error.to_string();
        self.process_string.clear();
        self.current_input.clear();
        self.previous_input.clear();
        self.operation = None;
        self.mode = Mode::Invalid;
    }

    /// Rebuilds `process_string` from the operands and operator.
    pub fn refresh_process(&mut self) {
        self.process_string = match self.operation {
            None => self.current_input.clone(),
            Some(op) => format!("{} {} {}", self.previous_input, op, self.current_input),
        };
    }
}

/// Serializable point-in-time view of an engine.
///
/// `result` and `process` are the last values published on the display
/// channels, so `result` is already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub current_input: String,
    pub previous_input: String,
    pub operation: Option<Operator>,
    pub result: String,
    pub process: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_pending_work() {
        let mut state = EngineState::new("5");
        state.previous_input = "3".to_string();
        state.operation = Some(Operator::Add);

        state.reset("12,345");

        assert_eq!(state.current_input, "12345");
        assert_eq!(state.result_string, "12345");
        assert!(state.previous_input.is_empty());
        assert_eq!(state.operation, None);
        assert_eq!(state.process_string, "12345");
        assert_eq!(state.mode, Mode::EnteringNumber);
    }

    #[test]
    fn process_shows_pending_expression() {
        let mut state = EngineState::new("0");
        state.previous_input = "5".to_string();
        state.current_input = "3".to_string();
        state.operation = Some(Operator::Multiply);
        state.refresh_process();
        assert_eq!(state.process_string, "5 × 3");

        state.current_input.clear();
        state.refresh_process();
        assert_eq!(state.process_string, "5 × ");
    }

    #[test]
    fn fail_wipes_operands() {
        let mut state = EngineState::new("9");
        state.previous_input = "1".to_string();
        state.operation = Some(Operator::Divide);

        state.fail(&CalcError::DivideByZero);

        assert_eq!(state.result_string, "Cannot divide by zero");
        assert!(state.current_input.is_empty());
        assert!(state.previous_input.is_empty());
        assert!(state.process_string.is_empty());
        assert_eq!(state.operation, None);
        assert!(state.mode.is_invalid());
    }

    #[test]
    fn snapshot_serializes_glyphs_and_mode_names() {
        let snapshot = EngineSnapshot {
            mode: Mode::OperatorPending,
            current_input: String::new(),
            previous_input: "5".to_string(),
            operation: Some(Operator::Subtract),
            result: "5".to_string(),
            process: "5 − ".to_string(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["mode"], "operator_pending");
        assert_eq!(json["operation"], "−");
    }
}
