//! Environments supplying time and identity to machine steps.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Side-effecting inputs a step needs: the clock and an id source.
pub trait SessionEnv: Clone + Send + Sync + 'static {
    /// Current time in milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// A fresh identifier for a history entry
    fn next_id(&self) -> String;
}

/// Wall clock and random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl SessionEnv for SystemEnv {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic environment: sequential ids and a clock that advances a
/// fixed amount per entry.
///
/// Clones share the same counter. Exposed for integration tests.
#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct FixedEnv {
    start_millis: i64,
    step_millis: i64,
    counter: Arc<AtomicU64>,
}

impl FixedEnv {
    pub fn new(start_millis: i64, step_millis: i64) -> Self {
        Self {
            start_millis,
            step_millis,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn issued(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Default for FixedEnv {
    fn default() -> Self {
        Self::new(0, 1000)
    }
}

impl SessionEnv for FixedEnv {
    /// Time of the most recently issued id.
    fn now_millis(&self) -> i64 {
        let issued = i64::try_from(self.issued()).unwrap_or(i64::MAX);
        self.start_millis
            .saturating_add(self.step_millis.saturating_mul(issued))
    }

    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("entry-{n}")
    }
}
