//! Calculator configuration.
//!
//! Settings are assembled with [`ConfigBuilder`] and validated with
//! Stillwater's `Validation`, so a bad configuration reports every
//! problem at once instead of the first one found.
//!
//! # Example
//!
//! ```rust
//! use reckon::config::ConfigBuilder;
//! use std::time::Duration;
//!
//! let config = ConfigBuilder::new()
//!     .recovery_delay(Duration::from_millis(800))
//!     .decimal_places(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.decimal_places(), 4);
//! ```
//!
//! Configurations also deserialize from JSON, with the delay in
//! milliseconds; deserialization runs the same validation.

pub mod builder;
pub mod violations;

pub use builder::{ConfigBuilder, DEFAULT_RECOVERY_DELAY};
pub use violations::ConfigViolation;

use crate::session::SessionError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted error-recovery delay.
pub const MAX_RECOVERY_DELAY: Duration = Duration::from_secs(60);

/// Most decimal places a result may keep; beyond this `f64` has no digits left.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Validated calculator settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct CalculatorConfig {
    pub(crate) recovery_delay: Duration,
    pub(crate) decimal_places: u32,
}

impl CalculatorConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn recovery_delay(&self) -> Duration {
        self.recovery_delay
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            recovery_delay: DEFAULT_RECOVERY_DELAY,
            decimal_places: crate::core::DEFAULT_DECIMAL_PLACES,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct RawConfig {
    recovery_delay_ms: u64,
    decimal_places: u32,
}

impl Default for RawConfig {
    fn default() -> Self {
        CalculatorConfig::default().into()
    }
}

impl From<CalculatorConfig> for RawConfig {
    fn from(config: CalculatorConfig) -> Self {
        Self {
            recovery_delay_ms: u64::try_from(config.recovery_delay.as_millis()).unwrap_or(u64::MAX),
            decimal_places: config.decimal_places,
        }
    }
}

impl TryFrom<RawConfig> for CalculatorConfig {
    type Error = SessionError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        ConfigBuilder::new()
            .recovery_delay(Duration::from_millis(raw.recovery_delay_ms))
            .decimal_places(raw.decimal_places)
            .build()
    }
}
