// Booking engine configuration
// Every field has a default so a partial JSON document is enough to override one value

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// Hard limits checked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingLimits {
    pub max_stay_nights: u32,
    pub max_guests: u32,
}

impl Default for BookingLimits {
    fn default() -> Self {
        Self {
            max_stay_nights: 30,
            max_guests: 4,
        }
    }
}

// Artificial latency for the mock async actions, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedDelays {
    pub availability_ms: u64,
    pub login_ms: u64,
    pub register_ms: u64,
    pub booking_ms: u64,
}

impl SimulatedDelays {
    pub fn none() -> Self {
        Self {
            availability_ms: 0,
            login_ms: 0,
            register_ms: 0,
            booking_ms: 0,
        }
    }

    pub fn availability(&self) -> Duration {
        Duration::from_millis(self.availability_ms)
    }

    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn register(&self) -> Duration {
        Duration::from_millis(self.register_ms)
    }

    pub fn booking(&self) -> Duration {
        Duration::from_millis(self.booking_ms)
    }
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            availability_ms: 500,
            login_ms: 1000,
            register_ms: 1500,
            booking_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub limits: BookingLimits,
    pub delays: SimulatedDelays,
    // Probability that the mock inventory reports a room as available
    pub availability_ratio: f64,
    pub tax_rate_pct: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            limits: BookingLimits::default(),
            delays: SimulatedDelays::default(),
            availability_ratio: 0.8,
            tax_rate_pct: 10,
        }
    }
}

impl BookingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BookingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.availability_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "availability_ratio",
                reason: format!("{} is outside 0.0..=1.0", self.availability_ratio),
            });
        }
        if self.limits.max_guests == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_guests",
                reason: "must allow at least one guest".to_string(),
            });
        }
        if self.limits.max_stay_nights == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_stay_nights",
                reason: "must allow at least one night".to_string(),
            });
        }
        Ok(())
    }

    // Same limits and rates, but every mock action resolves immediately
    pub fn without_delays(mut self) -> Self {
        self.delays = SimulatedDelays::none();
        self
    }
}
