//! Configuration violations.

use std::time::Duration;
use thiserror::Error;

/// Problems found while validating a calculator configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Recovery delay must be greater than zero")]
    ZeroRecoveryDelay,

    #[error("Recovery delay ({delay:?}) exceeds maximum ({max:?})")]
    RecoveryDelayTooLong { delay: Duration, max: Duration },

    #[error("Decimal places ({places}) exceeds maximum ({max})")]
    TooManyDecimalPlaces { places: u32, max: u32 },
}
