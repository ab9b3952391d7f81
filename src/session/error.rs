//! Session error types.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors surfaced by the session shell
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No history entry carries the requested id
    #[error("No history entry with id '{id}'")]
    UnknownEntry { id: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {}", join(.0))]
    InvalidConfig(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
