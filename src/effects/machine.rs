//! Calculator machine that runs transitions as effects.

use crate::config::CalculatorConfig;
use crate::core::{
    transition, CalculatorState, HistoryEntry, HistoryLog, KeyEvent, Recovery, State, Step,
};
use crate::effects::env::SessionEnv;
use crate::session::SessionError;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

/// Result of executing a single step
#[derive(Clone, Debug, PartialEq)]
pub struct MachineStep {
    /// State to move to
    pub state: CalculatorState,

    /// History entry created by a successful evaluation
    pub entry: Option<HistoryEntry>,

    /// Restoration to schedule after a failed evaluation
    pub recovery: Option<Recovery>,
}

/// Calculator state plus the session history it feeds.
#[derive(Clone, Debug)]
pub struct CalculatorMachine {
    current: CalculatorState,
    history: HistoryLog,
    decimal_places: u32,
}

impl CalculatorMachine {
    /// Create a machine in the fresh state
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            current: CalculatorState::fresh(),
            history: HistoryLog::new(),
            decimal_places: config.decimal_places(),
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &CalculatorState {
        &self.current
    }

    /// Get session history (pure)
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Compute the step for one key press.
    ///
    /// The transition itself is computed immediately; the returned effect
    /// only stamps a completed calculation with an id and time from the
    /// environment. After running the effect, call `apply_step()`.
    pub fn step<Env: SessionEnv>(
        &self,
        event: &KeyEvent,
    ) -> BoxedEffect<MachineStep, SessionError, Env> {
        let Step {
            state,
            completed,
            recovery,
        } = transition(&self.current, event, self.decimal_places);

        from_fn(move |env: &Env| {
            let entry = completed.as_ref().map(|calc| HistoryEntry {
                id: env.next_id(),
                expression: calc.expression.clone(),
                result: calc.result.clone(),
                timestamp: env.now_millis(),
            });

            Ok(MachineStep {
                state: state.clone(),
                entry,
                recovery: recovery.clone(),
            })
        })
        .boxed()
    }

    /// Apply the result from step() to update machine state.
    pub fn apply_step(&mut self, step: &MachineStep) {
        self.current = step.state.clone();
        if let Some(entry) = &step.entry {
            self.history = self.history.record(entry.clone());
        }
    }

    /// Run `step()` against `env` and apply it.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while running the step effect.
    pub async fn press<Env: SessionEnv>(
        &mut self,
        event: &KeyEvent,
        env: &Env,
    ) -> Result<MachineStep, SessionError> {
        let step = self.step::<Env>(event).run(env).await?;
        self.apply_step(&step);
        Ok(step)
    }

    /// Apply a scheduled recovery. Returns `false` if it was stale.
    pub fn recover(&mut self, recovery: &Recovery) -> bool {
        match self.current.recover(recovery) {
            Some(restored) => {
                tracing::debug!(display = %restored.display, "error display recovered");
                self.current = restored;
                true
            }
            None => {
                tracing::trace!(
                    scheduled = recovery.generation,
                    current = self.current.generation,
                    mode = self.current.mode.name(),
                    "stale recovery ignored"
                );
                false
            }
        }
    }

    /// Load a history entry's result into the calculator.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownEntry`] if no entry has this id.
    pub fn select_entry(&mut self, id: &str) -> Result<&CalculatorState, SessionError> {
        let entry = self
            .history
            .find(id)
            .ok_or_else(|| SessionError::UnknownEntry { id: id.to_string() })?;

        tracing::debug!(id, result = %entry.result, "history entry selected");
        self.current = self.history.select_entry(entry, &self.current);
        Ok(&self.current)
    }

    /// Empty the session history. Calculator state is untouched.
    pub fn clear_history(&mut self) {
        tracing::debug!(entries = self.history.len(), "history cleared");
        self.history.clear();
    }
}

impl Default for CalculatorMachine {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyKind, Mode};
    use crate::effects::env::FixedEnv;

    fn keys(input: &str) -> Vec<KeyEvent> {
        input
            .chars()
            .map(|c| match c {
                '0'..='9' | '.' => KeyEvent::number(c.to_string()),
                '=' => KeyEvent::equals(),
                'C' => KeyEvent::clear(),
                _ => KeyEvent::operator(c.to_string()),
            })
            .collect()
    }

    async fn run(machine: &mut CalculatorMachine, env: &FixedEnv, input: &str) {
        for event in keys(input) {
            machine.press(&event, env).await.unwrap();
        }
    }

    #[tokio::test]
    async fn successful_step_appends_history() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::new(1_000, 10);

        run(&mut machine, &env, "2+2").await;
        let step = machine.press(&KeyEvent::equals(), &env).await.unwrap();

        let entry = step.entry.unwrap();
        assert_eq!(entry.id, "entry-1");
        assert_eq!(entry.expression, "2+2");
        assert_eq!(entry.result, "4");
        assert_eq!(entry.timestamp, 1_010);

        assert_eq!(machine.current_state().display, "4");
        assert_eq!(machine.history().len(), 1);
    }

    #[tokio::test]
    async fn step_does_not_mutate_until_applied() {
        let machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        let step = machine
            .step::<FixedEnv>(&KeyEvent::number("9"))
            .run(&env)
            .await
            .unwrap();

        assert_eq!(step.state.display, "9");
        assert_eq!(machine.current_state().display, "0");
    }

    #[tokio::test]
    async fn failed_step_returns_recovery() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        run(&mut machine, &env, "10/0").await;
        let step = machine.press(&KeyEvent::equals(), &env).await.unwrap();

        assert!(step.entry.is_none());
        assert_eq!(machine.current_state().display, "Error");
        assert!(machine.history().is_empty());

        let recovery = step.recovery.unwrap();
        assert!(machine.recover(&recovery));
        assert_eq!(machine.current_state().display, "10/0");
        assert!(!machine.recover(&recovery));
    }

    #[tokio::test]
    async fn recovery_is_stale_after_new_input() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        run(&mut machine, &env, "7*").await;
        let step = machine.press(&KeyEvent::equals(), &env).await.unwrap();
        machine.press(&KeyEvent::number("3"), &env).await.unwrap();

        assert!(!machine.recover(&step.recovery.unwrap()));
        assert_eq!(machine.current_state().display, "3");
    }

    #[tokio::test]
    async fn select_entry_reenters_post_result() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        run(&mut machine, &env, "6*7=C1+").await;
        let state = machine.select_entry("entry-1").unwrap();
        assert_eq!(state.display, "42");
        assert_eq!(state.mode, Mode::PostResult);

        run(&mut machine, &env, "-2=").await;
        assert_eq!(machine.current_state().display, "40");
        assert_eq!(machine.history().len(), 2);
    }

    #[tokio::test]
    async fn select_unknown_entry_fails() {
        let mut machine = CalculatorMachine::default();
        let result = machine.select_entry("missing");
        assert!(matches!(result, Err(SessionError::UnknownEntry { .. })));
    }

    #[tokio::test]
    async fn clear_history_keeps_state() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        run(&mut machine, &env, "1+1=2+2=").await;
        assert_eq!(machine.history().len(), 2);

        machine.clear_history();
        assert!(machine.history().is_empty());
        assert_eq!(machine.current_state().display, "4");
    }

    #[tokio::test]
    async fn ignored_keys_do_not_reach_history() {
        let mut machine = CalculatorMachine::default();
        let env = FixedEnv::default();

        let step = machine
            .press(&KeyEvent::new("memory", KeyKind::Action), &env)
            .await
            .unwrap();
        assert!(step.entry.is_none());
        assert!(step.recovery.is_none());
    }
}
