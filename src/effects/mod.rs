//! Effectful calculator operations using Stillwater 0.11.0.
//!
//! This module provides the "imperative shell" around the pure core:
//! the transition is computed by [`crate::core::transition`], and the
//! only side effects a step needs (reading the clock and minting a
//! history id) come from the step's environment.
//!
//! # Key Concepts
//!
//! - **Environment**: [`SessionEnv`] supplies time and ids; [`SystemEnv`]
//!   uses the wall clock and UUIDs
//! - **Machine**: [`CalculatorMachine`] owns the state and history
//! - **Effects**: `step()` returns a `BoxedEffect`; run it, then
//!   `apply_step()`

mod env;
mod machine;

pub use env::{FixedEnv, SessionEnv, SystemEnv};
pub use machine::{CalculatorMachine, MachineStep};
