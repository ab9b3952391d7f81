//! Reckon: a keypad calculator core
//!
//! Reckon follows the "pure core, imperative shell" split. The core turns
//! key presses into calculator states with pure functions; the shell adds
//! the clock, history ids and the timed error recovery.
//!
//! # Core Concepts
//!
//! - **Pipeline**: `sanitize` → `evaluate` → `format_result`, with a
//!   dedicated parser for `+ - * /` and parentheses
//! - **Modes**: explicit `Fresh`, `Editing`, `PostResult` and `Failed`
//!   tags decide how the next key is interpreted
//! - **History**: append-only log of successful evaluations, clearable and
//!   re-selectable
//! - **Session**: serialized event handling with a cancellable recovery
//!   timer
//!
//! # Example
//!
//! ```rust
//! use reckon::core::{transition, CalculatorState, KeyEvent, Mode};
//!
//! let keys = [
//!     KeyEvent::number("4"),
//!     KeyEvent::equals(),
//!     KeyEvent::operator("*"),
//!     KeyEvent::number("3"),
//!     KeyEvent::equals(),
//! ];
//!
//! let state = keys
//!     .iter()
//!     .fold(CalculatorState::fresh(), |s, k| transition(&s, k, 8).state);
//!
//! assert_eq!(state.display, "12");
//! assert_eq!(state.mode, Mode::PostResult);
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod session;

// Re-export commonly used types
pub use config::{CalculatorConfig, ConfigBuilder};
pub use core::{CalculatorState, HistoryEntry, HistoryLog, KeyEvent, KeyKind, Mode};
pub use effects::{CalculatorMachine, SessionEnv, SystemEnv};
pub use session::{Session, SessionError, Snapshot};
