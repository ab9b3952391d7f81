//! Builder API for calculator configuration.

use crate::config::violations::ConfigViolation;
use crate::config::{CalculatorConfig, MAX_DECIMAL_PLACES, MAX_RECOVERY_DELAY};
use crate::core::DEFAULT_DECIMAL_PLACES;
use crate::session::SessionError;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Delay before the error marker is replaced by the previous expression.
pub const DEFAULT_RECOVERY_DELAY: Duration = Duration::from_millis(1500);

/// Builder for creating a validated [`CalculatorConfig`]
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    recovery_delay: Duration,
    decimal_places: u32,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            recovery_delay: DEFAULT_RECOVERY_DELAY,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// Set how long the error marker stays visible
    pub fn recovery_delay(mut self, delay: Duration) -> Self {
        self.recovery_delay = delay;
        self
    }

    /// Set how many decimal places results keep
    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if self.recovery_delay.is_zero() {
            Validation::fail(ConfigViolation::ZeroRecoveryDelay)
        } else {
            Validation::success(())
        });

        checks.push(if self.recovery_delay > MAX_RECOVERY_DELAY {
            Validation::fail(ConfigViolation::RecoveryDelayTooLong {
                delay: self.recovery_delay,
                max: MAX_RECOVERY_DELAY,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.decimal_places > MAX_DECIMAL_PLACES {
            Validation::fail(ConfigViolation::TooManyDecimalPlaces {
                places: self.decimal_places,
                max: MAX_DECIMAL_PLACES,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] listing every violation.
    pub fn build(self) -> Result<CalculatorConfig, SessionError> {
        match self.validate() {
            Validation::Success(()) => Ok(CalculatorConfig {
                recovery_delay: self.recovery_delay,
                decimal_places: self.decimal_places,
            }),
            Validation::Failure(violations) => Err(SessionError::InvalidConfig(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
