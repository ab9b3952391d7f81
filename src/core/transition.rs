//! Pure transition function of the input state machine.

use super::evaluate::evaluate;
use super::format::format_with_precision;
use super::key::{KeyEvent, KeyKind, CLEAR, EQUALS};
use super::sanitize::sanitize;
use super::state::{CalculatorState, Mode, Recovery, State, ERROR_MARKER, ZERO_MARKER};

/// A successful evaluation, not yet stamped with an id or time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    /// Expression as it was typed
    pub expression: String,
    /// Formatted result
    pub result: String,
}

/// Output of one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: CalculatorState,
    /// Present when `equals` produced a result
    pub completed: Option<Calculation>,
    /// Present when `equals` failed and the display must be restored later
    pub recovery: Option<Recovery>,
}

impl Step {
    fn to(state: CalculatorState) -> Self {
        Self {
            state,
            completed: None,
            recovery: None,
        }
    }
}

/// Compute the next state for `event`.
///
/// Every handled event bumps the generation, which invalidates any
/// recovery scheduled earlier. Unknown function or action values leave
/// the state untouched.
///
/// # Example
///
/// ```rust
/// use reckon::core::{transition, CalculatorState, KeyEvent};
///
/// let state = CalculatorState::fresh();
/// let state = transition(&state, &KeyEvent::number("2"), 8).state;
/// let state = transition(&state, &KeyEvent::operator("+"), 8).state;
/// let state = transition(&state, &KeyEvent::number("2"), 8).state;
/// let step = transition(&state, &KeyEvent::equals(), 8);
///
/// assert_eq!(step.state.display, "4");
/// assert_eq!(step.completed.unwrap().expression, "2+2");
/// ```
pub fn transition(state: &CalculatorState, event: &KeyEvent, decimal_places: u32) -> Step {
    let step = match event.kind {
        KeyKind::Function if event.value == CLEAR => Step::to(CalculatorState {
            generation: state.generation + 1,
            ..CalculatorState::fresh()
        }),
        KeyKind::Action if event.value == EQUALS => equals(state, decimal_places),
        KeyKind::Function | KeyKind::Action => {
            tracing::trace!(value = %event.value, kind = ?event.kind, "ignoring unknown key");
            return Step::to(state.clone());
        }
        KeyKind::Number | KeyKind::Operator => Step::to(input(state, event)),
    };

    if step.state.mode != state.mode {
        tracing::debug!(
            from = state.mode.name(),
            to = step.state.mode.name(),
            key = %event.value,
            "mode changed"
        );
    }

    step
}

fn equals(state: &CalculatorState, decimal_places: u32) -> Step {
    let sanitized = sanitize(&state.expression);
    if sanitized.is_empty() {
        return Step::to(state.bumped());
    }

    match evaluate(&sanitized) {
        Ok(value) => {
            let result = format_with_precision(value, decimal_places);
            tracing::debug!(expression = %state.expression, %result, "evaluated");

            Step {
                completed: Some(Calculation {
                    expression: state.expression.clone(),
                    result: result.clone(),
                }),
                recovery: None,
                state: CalculatorState {
                    display: result.clone(),
                    expression: result.clone(),
                    last_result: Some(result),
                    mode: Mode::PostResult,
                    generation: state.generation + 1,
                },
            }
        }
        Err(error) => {
            tracing::debug!(expression = %state.expression, %error, "evaluation failed");

            let failed = CalculatorState {
                display: ERROR_MARKER.to_string(),
                mode: Mode::Failed,
                ..state.bumped()
            };
            let restore = if state.expression.is_empty() {
                ZERO_MARKER.to_string()
            } else {
                state.expression.clone()
            };

            Step {
                recovery: Some(Recovery {
                    generation: failed.generation,
                    display: restore,
                }),
                completed: None,
                state: failed,
            }
        }
    }
}

fn input(state: &CalculatorState, event: &KeyEvent) -> CalculatorState {
    let value = event.value.as_str();
    let is_operator = event.kind == KeyKind::Operator;

    let (text, last_result) = match state.mode {
        Mode::Fresh | Mode::Failed if is_operator => (format!("{ZERO_MARKER}{value}"), None),
        Mode::Fresh | Mode::Failed => (value.to_string(), None),
        Mode::PostResult if is_operator => (format!("{}{value}", state.display), None),
        Mode::PostResult => (value.to_string(), None),
        Mode::Editing => (
            format!("{}{value}", state.display),
            state.last_result.clone(),
        ),
    };

    CalculatorState {
        mode: Mode::for_display(&text),
        display: text.clone(),
        expression: text,
        last_result,
        generation: state.generation + 1,
    }
}
