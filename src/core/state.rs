//! Calculator state and input modes.
//!
//! The mode is stored as an explicit tag next to the display/expression
//! pair instead of being inferred from field equality, so a typed
//! expression that happens to equal the previous result never looks like
//! a post-result state.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Text shown in the display for a fresh calculator.
pub const ZERO_MARKER: &str = "0";

/// Text shown in the display after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Trait for state machine modes.
///
/// All methods are pure. Modes are small immutable values describing how
/// the next key press is interpreted.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the mode's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// How the calculator interprets the next number or operator key.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Display shows the zero marker; the next key starts a new expression.
    Fresh,
    /// An expression is being typed.
    Editing,
    /// A result was just produced; operators chain from it, numbers discard it.
    PostResult,
    /// The display shows the error marker. Input behaves as in `Fresh`.
    Failed,
}

impl State for Mode {
    fn name(&self) -> &str {
        match self {
            Self::Fresh => "Fresh",
            Self::Editing => "Editing",
            Self::PostResult => "PostResult",
            Self::Failed => "Failed",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl Mode {
    /// Mode implied by a display produced from typed input.
    ///
    /// A display equal to the zero marker keeps the calculator fresh so
    /// the next digit replaces the leading zero.
    pub fn for_display(display: &str) -> Self {
        if display == ZERO_MARKER {
            Self::Fresh
        } else {
            Self::Editing
        }
    }

    /// Whether input in this mode starts over instead of appending.
    pub fn starts_over(&self) -> bool {
        matches!(self, Self::Fresh | Self::Failed)
    }
}

/// The `(display, expression, last_result)` triple plus its mode.
///
/// `generation` increases with every handled event. A pending error
/// recovery captures it and only applies while it still matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub display: String,
    pub expression: String,
    pub last_result: Option<String>,
    pub mode: Mode,
    #[serde(skip)]
    pub generation: u64,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Restoration scheduled by a failed evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovery {
    /// Generation of the failed state this recovery belongs to
    pub generation: u64,
    /// Display text to restore
    pub display: String,
}

impl CalculatorState {
    /// Initial state: zero marker, empty expression, no result.
    pub fn fresh() -> Self {
        Self {
            display: ZERO_MARKER.to_string(),
            expression: String::new(),
            last_result: None,
            mode: Mode::Fresh,
            generation: 0,
        }
    }

    /// Same visible fields, next generation.
    pub(crate) fn bumped(&self) -> Self {
        Self {
            generation: self.generation + 1,
            ..self.clone()
        }
    }

    /// Compare the fields a renderer sees, ignoring the generation.
    pub fn same_view(&self, other: &Self) -> bool {
        self.display == other.display
            && self.expression == other.expression
            && self.last_result == other.last_result
            && self.mode == other.mode
    }

    /// Apply a pending recovery if nothing happened since it was scheduled.
    ///
    /// Returns `None` when the recovery is stale: a newer event bumped the
    /// generation, or the state is no longer showing the error marker.
    pub fn recover(&self, recovery: &Recovery) -> Option<Self> {
        if self.generation != recovery.generation || self.mode != Mode::Failed {
            return None;
        }

        Some(Self {
            display: recovery.display.clone(),
            mode: Mode::for_display(&recovery.display),
            generation: self.generation + 1,
            ..self.clone()
        })
    }
}
