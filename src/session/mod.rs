//! Session shell: serialized key handling and timed error recovery.
//!
//! A [`Session`] owns one [`CalculatorMachine`] behind an async mutex, so
//! key events are processed one at a time to completion. A failed
//! evaluation shows the error marker and spawns a tokio task that restores
//! the previous expression after the configured delay. Any later event
//! that changes the state aborts that task, and the task itself re-checks
//! the state generation before restoring, so a late wake-up can never
//! overwrite newer input.
//!
//! Sessions must be driven from within a tokio runtime.
//!
//! # Example
//!
//! ```rust
//! use reckon::core::KeyEvent;
//! use reckon::session::Session;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), reckon::session::SessionError> {
//! let session = Session::system();
//!
//! session.press(KeyEvent::number("2")).await?;
//! session.press(KeyEvent::operator("+")).await?;
//! session.press(KeyEvent::number("2")).await?;
//! let entry = session.press(KeyEvent::equals()).await?;
//!
//! assert_eq!(entry.unwrap().result, "4");
//! assert_eq!(session.snapshot().await.display, "4");
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::SessionError;

use crate::config::CalculatorConfig;
use crate::core::{CalculatorState, HistoryEntry, KeyEvent, Mode, Recovery};
use crate::effects::{CalculatorMachine, SessionEnv, SystemEnv};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Everything a renderer needs, read after each transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub display: String,
    pub expression: String,
    pub last_result: Option<String>,
    pub mode: Mode,
    /// Expression shown above the display when it differs from it
    pub expression_line: Option<String>,
    /// Whether the display holds the error marker
    pub is_error: bool,
    /// Full history, oldest first
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    fn capture(machine: &CalculatorMachine) -> Self {
        let state = machine.current_state();
        Self {
            display: state.display.clone(),
            expression: state.expression.clone(),
            last_result: state.last_result.clone(),
            mode: state.mode,
            expression_line: (state.expression != state.display)
                .then(|| state.expression.clone()),
            is_error: state.mode == Mode::Failed,
            history: machine.history().entries().to_vec(),
        }
    }
}

struct Inner {
    machine: CalculatorMachine,
    pending: Option<JoinHandle<()>>,
}

impl Inner {
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            tracing::trace!("pending recovery cancelled");
            handle.abort();
        }
    }
}

/// A single calculator session.
pub struct Session<Env: SessionEnv = SystemEnv> {
    inner: Arc<Mutex<Inner>>,
    env: Env,
    config: CalculatorConfig,
}

impl Session<SystemEnv> {
    /// Session with the default configuration, wall clock and UUID ids.
    pub fn system() -> Self {
        Self::new(CalculatorConfig::default(), SystemEnv)
    }
}

impl<Env: SessionEnv> Session<Env> {
    pub fn new(config: CalculatorConfig, env: Env) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                machine: CalculatorMachine::new(&config),
                pending: None,
            })),
            env,
            config,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Handle one key press.
    ///
    /// Returns the history entry created when `equals` succeeds.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while running the machine step.
    pub async fn press(&self, event: KeyEvent) -> Result<Option<HistoryEntry>, SessionError> {
        let mut inner = self.inner.lock().await;
        let before = inner.machine.current_state().generation;

        let step = inner.machine.press(&event, &self.env).await?;
        // ignored keys leave the generation alone and must not cancel a recovery
        if step.state.generation != before {
            inner.cancel_pending();
        }
        if let Some(recovery) = step.recovery {
            inner.pending = Some(self.schedule(recovery));
        }

        Ok(step.entry)
    }

    /// Press several keys in order, collecting created history entries.
    ///
    /// # Errors
    ///
    /// Stops at the first failing key press.
    pub async fn press_all<I>(&self, events: I) -> Result<Vec<HistoryEntry>, SessionError>
    where
        I: IntoIterator<Item = KeyEvent>,
    {
        let mut entries = Vec::new();
        for event in events {
            entries.extend(self.press(event).await?);
        }
        Ok(entries)
    }

    fn schedule(&self, recovery: Recovery) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let delay = self.config.recovery_delay();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = inner.lock().await;
            if inner.machine.recover(&recovery) {
                inner.pending = None;
            }
        })
    }

    /// Load a history entry's result, replacing the current input.
    ///
    /// An unknown id leaves the state and any pending recovery alone.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownEntry`] if no entry has this id.
    pub async fn select_entry(&self, id: &str) -> Result<CalculatorState, SessionError> {
        let mut inner = self.inner.lock().await;
        let state = inner.machine.select_entry(id)?.clone();
        inner.cancel_pending();
        Ok(state)
    }

    /// Empty the history. The calculator display is untouched.
    pub async fn clear_history(&self) {
        self.inner.lock().await.machine.clear_history();
    }

    pub async fn state(&self) -> CalculatorState {
        self.inner.lock().await.machine.current_state().clone()
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.inner.lock().await.machine.history().entries().to_vec()
    }

    /// Time between the oldest and newest history entry.
    pub async fn history_duration(&self) -> Option<Duration> {
        self.inner.lock().await.machine.history().duration()
    }

    /// Whether an error recovery is waiting to fire.
    pub async fn has_pending_recovery(&self) -> bool {
        self.inner
            .lock()
            .await
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Full render view: state plus history.
    pub async fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.inner.lock().await.machine)
    }
}

impl<Env: SessionEnv> Drop for Session<Env> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_lock() {
            inner.cancel_pending();
        }
    }
}
