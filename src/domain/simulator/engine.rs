use crate::domain::application::application::Application;
use crate::domain::endpoint::actuator::Actuator;
use crate::domain::endpoint::sensor::Sensor;
use crate::domain::placement::placement_strategy::PlacementStrategy;
use crate::domain::simulator::report::SimulationReport;
use crate::domain::topology::topology::Topology;
use crate::error::Result;

/// Everything the engine needs to simulate one scenario. Ownership of the
/// built topology, endpoints and graph moves into the engine on submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub topology: Topology,
    pub sensors: Vec<Sensor>,
    pub actuators: Vec<Actuator>,
    pub application: Application,
    pub strategy: PlacementStrategy,
}

/// Structural counts of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub devices: usize,
    pub sensors: usize,
    pub actuators: usize,
    pub modules: usize,
    pub edges: usize,
    pub loops: usize,
    pub strategy: String,
}

impl Submission {
    pub fn summary(&self) -> SubmissionSummary {
        SubmissionSummary {
            devices: self.topology.len(),
            sensors: self.sensors.len(),
            actuators: self.actuators.len(),
            modules: self.application.modules.len(),
            edges: self.application.edges.len(),
            loops: self.application.loops.len(),
            strategy: self.strategy.to_string(),
        }
    }
}

/// The simulation engine as seen by the scenario driver.
pub trait SimulationEngine: std::fmt::Debug {
    /// Accepts a scenario and resolves its placement.
    fn submit(&mut self, submission: Submission) -> Result<()>;

    /// Runs the submitted scenario until `end_time` and reports the outcome.
    fn run(&mut self, end_time: f64) -> Result<SimulationReport>;
}
