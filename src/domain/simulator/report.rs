use std::collections::BTreeMap;

use serde::Serialize;

/// Latency samples of one tracked loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopLatency {
    pub label: String,
    pub samples: u64,
    pub total: f64,
    pub min: f64,
    pub max: f64,
}

impl LoopLatency {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Default::default() }
    }

    pub fn record(&mut self, latency: f64) {
        if self.samples == 0 {
            self.min = latency;
            self.max = latency;
        } else {
            self.min = self.min.min(latency);
            self.max = self.max.max(latency);
        }
        self.samples += 1;
        self.total += latency;
    }

    /// `None` when the loop was never completed.
    pub fn average(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.total / self.samples as f64)
    }
}

/// What an engine run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub strategy: String,
    pub end_time: f64,

    /// Simulated time of the last processed event.
    pub finish_time: f64,

    /// Sensor name → emitted tuples.
    pub emitted: BTreeMap<String, u64>,

    /// Sensor name → mean inter-arrival time of its emission distribution.
    pub emission_mean: BTreeMap<String, f64>,

    /// Actuator name → delivered tuples.
    pub delivered: BTreeMap<String, u64>,

    /// Tuple type → tuples that travelled an edge of that type.
    pub tuples_by_type: BTreeMap<String, u64>,

    /// Tuples that found no module instance or actuator to go to.
    pub dropped: u64,

    pub loops: Vec<LoopLatency>,

    /// Module → device names.
    pub placement: BTreeMap<String, Vec<String>>,
}

impl SimulationReport {
    pub fn total_emitted(&self) -> u64 {
        self.emitted.values().sum()
    }

    pub fn total_delivered(&self) -> u64 {
        self.delivered.values().sum()
    }

    pub fn loop_latency(&self, label: &str) -> Option<&LoopLatency> {
        self.loops.iter().find(|l| l.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_latency_statistics() {
        let mut latency = LoopLatency::new("a -> b");
        assert_eq!(latency.average(), None);

        latency.record(10.0);
        latency.record(20.0);

        assert_eq!(latency.samples, 2);
        assert_eq!(latency.average(), Some(15.0));
        assert_eq!(latency.min, 10.0);
        assert_eq!(latency.max, 20.0);
    }
}
