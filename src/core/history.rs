//! Session history of completed calculations.
//!
//! The log is append-only: entries are never edited or removed one by
//! one, only cleared in bulk.

use super::state::{CalculatorState, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single successful evaluation.
///
/// # Example
///
/// ```rust
/// use reckon::core::HistoryEntry;
///
/// let entry = HistoryEntry {
///     id: "a1".to_string(),
///     expression: "2+2".to_string(),
///     result: "4".to_string(),
///     timestamp: 0,
/// };
/// assert_eq!(entry.time_label(), "00:00");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: String,
    /// Expression exactly as typed
    pub expression: String,
    /// Formatted result
    pub result: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Creation time as a UTC datetime.
    ///
    /// Out-of-range timestamps fall back to the epoch.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// Two-digit `HH:MM` label used by history panels.
    pub fn time_label(&self) -> String {
        self.recorded_at().format("%H:%M").to_string()
    }
}

/// Ordered, oldest-first list of history entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an entry, returning a new log.
    ///
    /// Pure: the existing log is left as it was.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reckon::core::{HistoryEntry, HistoryLog};
    ///
    /// let log = HistoryLog::new();
    /// let entry = HistoryEntry {
    ///     id: "1".to_string(),
    ///     expression: "1+1".to_string(),
    ///     result: "2".to_string(),
    ///     timestamp: 1_700_000_000_000,
    /// };
    ///
    /// let updated = log.record(entry);
    /// assert_eq!(updated.len(), 1);
    /// assert!(log.is_empty());
    /// ```
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Time between the oldest and newest entry.
    ///
    /// Returns `None` for an empty log or if the clock went backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.recorded_at()
            .signed_duration_since(first.recorded_at())
            .to_std()
            .ok()
    }

    /// State produced by loading `entry` back into the calculator.
    ///
    /// The result becomes both display and expression and the calculator
    /// re-enters `PostResult`: an operator chains from the loaded value, a
    /// digit starts over. Any pending error recovery is invalidated.
    pub fn select_entry(&self, entry: &HistoryEntry, current: &CalculatorState) -> CalculatorState {
        CalculatorState {
            display: entry.result.clone(),
            expression: entry.result.clone(),
            last_result: Some(entry.result.clone()),
            mode: Mode::PostResult,
            generation: current.generation + 1,
        }
    }
}
