use serde::Serialize;

use crate::error::{Error, Result};

/// Ratio of output tuples to input tuples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FractionalSelectivity {
    pub fraction: f64,
}

impl FractionalSelectivity {
    pub fn new(fraction: f64) -> Result<Self> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(Error::GraphError(format!("selectivity must lie in (0, 1], got {}", fraction)));
        }
        Ok(Self { fraction })
    }
}

/// `module` turns `input_tuple_type` into `output_tuple_type` at the given ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectivityRule {
    pub module: String,
    pub input_tuple_type: String,
    pub output_tuple_type: String,
    pub selectivity: FractionalSelectivity,
}

/// Turns a fractional ratio into whole tuples without randomness: the fraction
/// accumulates per input and a tuple is released each time a full unit is reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectivityAccumulator {
    credit: f64,
}

impl SelectivityAccumulator {
    /// Number of output tuples produced by one more input tuple.
    pub fn feed(&mut self, selectivity: FractionalSelectivity) -> u32 {
        self.credit += selectivity.fraction;

        let mut released = 0;
        // tolerate float drift such as 0.1 * 10 == 0.9999999999999999
        while self.credit >= 1.0 - 1e-9 {
            self.credit -= 1.0;
            released += 1;
        }
        released
    }
}
