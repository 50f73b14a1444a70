//! The calculator engine: input operations, transitions and publication.
//!
//! Every input operation follows the same pattern:
//! 1. If the engine is [`Mode::Invalid`] the call is dropped, nothing is published
//! 2. The transition for the current mode mutates [`EngineState`]
//! 3. A calculation failure replaces that with the invalid-mode transition
//! 4. Both channels are published once, result first, then process
//!
//! `clear_pressed` and `reset_initial_value` skip step 1; they are the only way
//! out of the invalid mode.

use super::channel::{Channel, SubscriptionId};
use super::mode::Mode;
use super::state::{EngineSnapshot, EngineState};
use crate::domain::number::{self, DEFAULT_MAX_FRACTION_DIGITS};
use crate::domain::{CalcError, Operator, Result};
use rust_decimal::Decimal;
use std::fmt;

/// A single calculator.
///
/// # Example
///
/// ```rust
/// use keypad_calc::{Engine, Operator};
///
/// let mut engine = Engine::default();
/// engine.number_pressed("5");
/// engine.operation_pressed(Operator::Add);
/// engine.number_pressed("3");
/// assert_eq!(engine.process(), "5 + 3");
///
/// engine.equal_pressed();
/// assert_eq!(engine.result(), "8");
///
/// engine.equal_pressed();
/// assert_eq!(engine.result(), "11");
/// ```
pub struct Engine {
    state: EngineState,
    max_fraction_digits: u32,
    result: Channel,
    process: Channel,
}

impl Engine {
    /// Creates an engine showing `initial_value`.
    #[must_use]
    pub fn new(initial_value: &str) -> Self {
        Self::with_fraction_digits(initial_value, DEFAULT_MAX_FRACTION_DIGITS)
    }

    /// Creates an engine whose result display keeps up to `max_fraction_digits`.
    #[must_use]
    pub fn with_fraction_digits(initial_value: &str, max_fraction_digits: u32) -> Self {
        let state = EngineState::new(initial_value);
        let result = Channel::new(
            "result",
            number::format_display(&state.result_string, max_fraction_digits),
        );
        let process = Channel::new("process", state.process_string.clone());
        tracing::debug!(initial_value, mode = ?state.mode, "engine created");
        Self {
            state,
            max_fraction_digits,
            result,
            process,
        }
    }

    /// Current state machine tag.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Read-only view of the internal state.
    #[must_use]
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    /// Last published (formatted) result.
    #[must_use]
    pub fn result(&self) -> &str {
        self.result.latest()
    }

    /// Last published process expression.
    #[must_use]
    pub fn process(&self) -> &str {
        self.process.latest()
    }

    /// Captures the state together with the published display values.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.state.mode,
            current_input: self.state.current_input.clone(),
            previous_input: self.state.previous_input.clone(),
            operation: self.state.operation,
            result: self.result().to_string(),
            process: self.process().to_string(),
        }
    }

    /// Subscribes to the result channel; the current value is delivered at once.
    pub fn subscribe_result<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.result.subscribe(subscriber)
    }

    /// Subscribes to the process channel; the current value is delivered at once.
    pub fn subscribe_process<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.process.subscribe(subscriber)
    }

    /// Removes a subscription from whichever channel holds it.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.result.unsubscribe(id) || self.process.unsubscribe(id)
    }

    /// Appends `digits` to the operand being typed, or starts a new one.
    pub fn number_pressed(&mut self, digits: &str) {
        self.guarded("number_pressed", |state| {
            if matches!(state.mode, Mode::Initial | Mode::AfterEquals) {
                state.operation = None;
                state.current_input = digits.to_string();
                state.mode = Mode::EnteringNumber;
            } else {
                state.current_input.push_str(digits);
            }
            state.result_string.clone_from(&state.current_input);
            Ok(())
        });
    }

    /// Adds a decimal point unless the operand already has one.
    pub fn decimal_pressed(&mut self) {
        self.guarded("decimal_pressed", |state| {
            match state.mode {
                Mode::Initial => {
                    state.current_input = "0.".to_string();
                    state.mode = Mode::EnteringNumber;
                }
                Mode::AfterEquals => {
                    state.operation = None;
                    state.current_input.clone_from(&state.result_string);
                    state.mode = Mode::EnteringNumber;
                }
                _ => {}
            }
            if !state.current_input.contains('.') {
                state.current_input.push('.');
            }
            state.result_string.clone_from(&state.current_input);
            Ok(())
        });
    }

    /// Selects `op` as the pending operator.
    ///
    /// While an operator is pending and no right-hand digits have been typed,
    /// this swaps the operator. Once digits follow, the press is ignored.
    pub fn operation_pressed(&mut self, op: Operator) {
        self.guarded("operation_pressed", |state| {
            select_operator(state, op);
            Ok(())
        });
    }

    /// Symbol-level variant of [`Engine::operation_pressed`].
    ///
    /// A symbol outside `+ − × ÷` (or their ASCII spellings) fails the engine
    /// with "Unknown operation".
    pub fn operation_symbol_pressed(&mut self, symbol: &str) {
        self.guarded("operation_pressed", |state| {
            let op = symbol.parse::<Operator>()?;
            select_operator(state, op);
            Ok(())
        });
    }

    /// Executes the pending operation, or repeats the last one after a result.
    pub fn equal_pressed(&mut self) {
        self.guarded("equal_pressed", |state| match state.mode {
            Mode::AfterEquals => {
                state.previous_input.clone_from(&state.result_string);
                execute(state)
            }
            Mode::OperatorPending => {
                if state.current_input.is_empty() {
                    state.current_input.clone_from(&state.previous_input);
                }
                execute(state)
            }
            _ => Ok(()),
        });
    }

    /// Divides the active operand by 100.
    pub fn apply_percentage(&mut self) {
        self.guarded("apply_percentage", |state| {
            if state.mode == Mode::Initial {
                state.current_input = "0".to_string();
            } else {
                let from_result = state.mode == Mode::AfterEquals;
                let source = if from_result {
                    &state.result_string
                } else {
                    &state.current_input
                };
                let value = number::parse_operand(source)?;
                state.current_input = number::to_operand(value / Decimal::ONE_HUNDRED);
                if from_result {
                    state.previous_input.clone_from(&state.current_input);
                    state.mode = Mode::EnteringNumber;
                }
            }
            state.operation = None;
            state.result_string.clone_from(&state.current_input);
            Ok(())
        });
    }

    /// Adds or removes a leading minus sign on the active operand.
    ///
    /// The change is textual, so `"0"` becomes `"-0"` and back.
    pub fn toggle_sign(&mut self) {
        self.guarded("toggle_sign", |state| {
            if state.mode == Mode::OperatorPending && state.current_input.is_empty() {
                return Ok(());
            }
            let mut operand = if state.mode == Mode::AfterEquals {
                state.operation = None;
                state.mode = Mode::EnteringNumber;
                state.result_string.clone()
            } else {
                state.current_input.clone()
            };
            if operand.starts_with('-') {
                operand.remove(0);
            } else {
                operand.insert(0, '-');
            }
            state.current_input = operand;
            state.result_string.clone_from(&state.current_input);
            Ok(())
        });
    }

    /// Deletes the last character, or cancels an operator with no operand after it.
    pub fn delete_pressed(&mut self) {
        self.guarded("delete_pressed", |state| {
            match state.mode {
                Mode::EnteringNumber => {
                    state.current_input.pop();
                    if state.current_input.is_empty() {
                        state.current_input = "0".to_string();
                        state.mode = Mode::Initial;
                    }
                }
                Mode::AfterEquals => {
                    state.current_input.clone_from(&state.result_string);
                    state.current_input.pop();
                    state.operation = None;
                    if state.current_input.is_empty() {
                        state.current_input = "0".to_string();
                        state.mode = Mode::Initial;
                    } else {
                        state.mode = Mode::EnteringNumber;
                    }
                }
                Mode::OperatorPending => {
                    if state.current_input.is_empty() {
                        state.operation = None;
                        state.current_input = std::mem::take(&mut state.previous_input);
                        state.mode = Mode::EnteringNumber;
                    } else {
                        state.current_input.pop();
                    }
                }
                Mode::Initial | Mode::Invalid => {}
            }
            state.result_string.clone_from(&state.current_input);
            Ok(())
        });
    }

    /// Resets to `"0"`. Works in every mode.
    pub fn clear_pressed(&mut self) {
        self.reset_initial_value("0");
    }

    /// Reinitializes the engine around `value`. Works in every mode.
    ///
    /// Grouping separators in `value` are ignored, so another engine's
    /// formatted result can be passed straight in.
    pub fn reset_initial_value(&mut self, value: &str) {
        let _span = tracing::debug_span!("reset_initial_value", value).entered();
        let from = self.state.mode;
        self.state.reset(value);
        tracing::debug!(from = ?from, to = ?self.state.mode, "engine reset");
        self.publish();
    }

    fn guarded<F>(&mut self, input: &'static str, transition: F)
    where
        F: FnOnce(&mut EngineState) -> Result<()>,
    {
        let _span = tracing::debug_span!("engine_input", input).entered();

        let from = self.state.mode;
        if from.is_invalid() {
            tracing::debug!("input ignored while invalid");
            return;
        }

        if let Err(error) = transition(&mut self.state) {
            tracing::warn!(%error, "calculation failed");
            self.state.fail(&error);
        }

        if from != self.state.mode {
            tracing::debug!(from = ?from, to = ?self.state.mode, "mode transition");
        }
        self.publish();
    }

    fn publish(&mut self) {
        self.state.refresh_process();
        let display = number::format_display(&self.state.result_string, self.max_fraction_digits);
        self.result.publish(display);
        self.process.publish(self.state.process_string.clone());
    }
}

fn select_operator(state: &mut EngineState, op: Operator) {
    match state.mode {
        Mode::EnteringNumber => {
            state.operation = Some(op);
            state.previous_input.clone_from(&state.current_input);
            state.result_string.clone_from(&state.current_input);
            state.current_input.clear();
            state.mode = Mode::OperatorPending;
        }
        Mode::AfterEquals => {
            state.operation = Some(op);
            state.previous_input.clone_from(&state.result_string);
            state.current_input.clear();
            state.mode = Mode::OperatorPending;
        }
        Mode::OperatorPending if state.current_input.is_empty() => {
            state.operation = Some(op);
        }
        _ => {}
    }
}

fn execute(state: &mut EngineState) -> Result<()> {
    let lhs = number::parse_operand(&state.previous_input)?;
    let rhs = number::parse_operand(&state.current_input)?;
    let op = state.operation.ok_or(CalcError::UnknownOperation)?;
    let value = op.apply(lhs, rhs)?;

    tracing::debug!(%lhs, %op, %rhs, %value, "operation executed");
    state.result_string = number::to_operand(value);
    state.mode = Mode::AfterEquals;
    Ok(())
}

impl Default for Engine {
    fn default() -> Self {
        Self::new("0")
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("max_fraction_digits", &self.max_fraction_digits)
            .field("result", &self.result)
            .field("process", &self.process)
            .finish()
    }
}
