use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inter-arrival time of tuples emitted by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Distribution {
    /// Fixed period between emissions.
    Deterministic { value: f64 },

    /// Period drawn uniformly from `[min, max]`.
    Uniform { min: f64, max: f64 },
}

impl Distribution {
    pub fn deterministic(value: f64) -> Self {
        Distribution::Deterministic { value }
    }

    pub fn next_value<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Distribution::Deterministic { value } => value,
            Distribution::Uniform { min, max } => rng.random_range(min..=max),
        }
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Distribution::Deterministic { value } => value,
            Distribution::Uniform { min, max } => (min + max) / 2.0,
        }
    }

    /// A zero or negative period would make the sensor emit forever at one instant.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Distribution::Deterministic { value } if value.is_finite() && value > 0.0 => Ok(()),
            Distribution::Uniform { min, max } if min.is_finite() && max.is_finite() && min > 0.0 && max >= min => Ok(()),
            other => Err(Error::ConfigurationError(format!("invalid emission distribution {:?}", other))),
        }
    }
}
