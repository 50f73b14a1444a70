//! Input-handling mode of the calculator engine.
//!
//! Exactly one mode is active at a time and it fully determines how each input
//! operation is interpreted.
//!
//! # State Machine
//!
//! ```text
//! Initial ──digit / "."──► EnteringNumber ──operator──► OperatorPending ──"="──► AfterEquals
//!    ▲                          │   ▲                        │                     │  │
//!    └──────delete to empty─────┘   └────delete operator─────┘                     │  │
//!                                   ▲                                              │  │
//!                                   └────────digit / "." / "%" / "±" / delete──────┘  │
//!                                                       OperatorPending ◄──operator───┘
//!
//! arithmetic or parse failure ──► Invalid ──clear / reset──► Initial | EnteringNumber
//! ```

use serde::Serialize;

/// Discrete state of the engine's input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Showing the default `"0"`; the next digit replaces it.
    Initial,

    /// Typing the first operand, or editing a value taken over from a result.
    EnteringNumber,

    /// An operator is selected; digits now build the right-hand operand.
    OperatorPending,

    /// A result was just computed; `=` repeats the last operation.
    AfterEquals,

    /// A calculation failed. Every input is ignored until clear or reset.
    Invalid,
}

impl Mode {
    /// Mode an engine lands in after being reset to `value`.
    #[must_use]
    pub fn for_reset_value(value: &str) -> Self {
        if value == "0" {
            Self::Initial
        } else {
            Self::EnteringNumber
        }
    }

    /// Returns `true` once a calculation has failed.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}
