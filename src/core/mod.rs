//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - Key events and the standard keypad
//! - The sanitize → evaluate → format pipeline
//! - The input state machine transition function
//! - The session history log
//!
//! Nothing in this module reads a clock, spawns a task or holds shared
//! state; the imperative shell lives in [`crate::effects`] and
//! [`crate::session`].

mod evaluate;
mod format;
mod history;
mod key;
mod sanitize;
mod state;
mod transition;

pub use evaluate::{evaluate, EvalError, EvaluationOutcome, Token, MAX_DEPTH};
pub use format::{format_result, format_with_precision, DEFAULT_DECIMAL_PLACES};
pub use history::{HistoryEntry, HistoryLog};
pub use key::{KeyDef, KeyEvent, KeyKind, Keypad, CLEAR, EQUALS};
pub use sanitize::{is_allowed, sanitize};
pub use state::{CalculatorState, Mode, Recovery, State, ERROR_MARKER, ZERO_MARKER};
pub use transition::{transition, Calculation, Step};
