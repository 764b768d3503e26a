use crate::domain::simulator::engine::{SimulationEngine, Submission};
use crate::domain::simulator::report::SimulationReport;
use crate::error::Result;

/// Hands a built scenario to an engine and drives it to completion.
#[derive(Debug)]
pub struct Controller {
    pub name: String,
    engine: Box<dyn SimulationEngine>,
}

impl Controller {
    pub fn new(name: impl Into<String>, engine: Box<dyn SimulationEngine>) -> Self {
        Self { name: name.into(), engine }
    }

    pub fn submit_application(&mut self, submission: Submission) -> Result<()> {
        let summary = submission.summary();
        log::info!(
            "[{}] Submitting application '{}' with {} placement ({} devices, {} sensors, {} actuators).",
            self.name,
            submission.application.app_id,
            summary.strategy,
            summary.devices,
            summary.sensors,
            summary.actuators
        );
        self.engine.submit(submission)
    }

    pub fn start_simulation(&mut self, end_time: f64) -> Result<SimulationReport> {
        log::info!("[{}] Starting simulation until t={}.", self.name, end_time);
        self.engine.run(end_time)
    }
}
