use crate::domain::scenario::builder::{BuiltScenario, ScenarioBuilder};
use crate::domain::scenario::config::ScenarioConfig;
use crate::domain::scenario::strategy::select_placement_strategy;
use crate::domain::simulator::controller::Controller;
use crate::domain::simulator::engine::SimulationEngine;
use crate::domain::simulator::report::SimulationReport;
use crate::error::{Error, Result};

const CONTROLLER_NAME: &str = "master-controller";

/// Life cycle of a single-shot scenario run:
/// `Created → Configured → Submitted → Completed`, or `Failed` from any step.
#[derive(Debug)]
pub enum ScenarioState {
    Created,
    Configured(Box<BuiltScenario>),
    Submitted { strategy: String },
    Completed(SimulationReport),
    Failed(String),
}

impl ScenarioState {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioState::Created => "Created",
            ScenarioState::Configured(_) => "Configured",
            ScenarioState::Submitted { .. } => "Submitted",
            ScenarioState::Completed(_) => "Completed",
            ScenarioState::Failed(_) => "Failed",
        }
    }
}

/// Drives one scenario from construction to the end of the simulation.
/// Nothing is retried; the first error moves the run to `Failed`.
#[derive(Debug)]
pub struct Orchestrator {
    config: ScenarioConfig,
    controller: Controller,
    state: ScenarioState,
}

impl Orchestrator {
    pub fn new(config: ScenarioConfig, engine: Box<dyn SimulationEngine>) -> Self {
        Self { config, controller: Controller::new(CONTROLLER_NAME, engine), state: ScenarioState::Created }
    }

    /// Builds devices, endpoints and the application graph.
    pub fn configure(&mut self) -> Result<()> {
        if !matches!(self.state, ScenarioState::Created) {
            return Err(Error::SubmissionError(format!("cannot configure a scenario in state {}", self.state.name())));
        }

        match ScenarioBuilder::new(self.config.clone()).build() {
            Ok(built) => {
                self.state = ScenarioState::Configured(Box::new(built));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    pub fn report(&self) -> Option<&SimulationReport> {
        match &self.state {
            ScenarioState::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// Chooses the placement strategy and hands everything to the engine.
    pub fn submit(&mut self) -> Result<()> {
        let built = match std::mem::replace(&mut self.state, ScenarioState::Failed("submission interrupted".to_string())) {
            ScenarioState::Configured(built) => built,
            other => {
                let error = Error::SubmissionError(format!("cannot submit a scenario in state {}", other.name()));
                self.state = other;
                return Err(error);
            }
        };

        let strategy = select_placement_strategy(self.config.direct_cloud, &built.topology);
        let strategy_name = strategy.to_string();

        match self.controller.submit_application(built.into_submission(strategy)) {
            Ok(()) => {
                log::info!("Scenario submitted with {} placement.", strategy_name);
                self.state = ScenarioState::Submitted { strategy: strategy_name };
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Runs the engine until the configured end time.
    pub fn complete(&mut self) -> Result<()> {
        if !matches!(self.state, ScenarioState::Submitted { .. }) {
            return Err(Error::SubmissionError(format!("cannot start a scenario in state {}", self.state.name())));
        }

        match self.controller.start_simulation(self.config.end_time) {
            Ok(report) => {
                self.state = ScenarioState::Completed(report);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Configure, submit and complete in one go.
    pub fn run(config: ScenarioConfig, engine: Box<dyn SimulationEngine>) -> Result<SimulationReport> {
        let mut orchestrator = Self::new(config, engine);
        orchestrator.configure()?;
        orchestrator.submit()?;
        orchestrator.complete()?;
        orchestrator.into_report()
    }

    pub fn into_report(self) -> Result<SimulationReport> {
        match self.state {
            ScenarioState::Completed(report) => Ok(report),
            other => Err(Error::SubmissionError(format!("scenario finished in state {}", other.name()))),
        }
    }

    fn fail(&mut self, error: Error) -> Error {
        log::error!("Scenario failed: {}", error);
        self.state = ScenarioState::Failed(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulator::simulator_mock::MockEngine;

    #[test]
    fn test_state_transitions() {
        let mut orchestrator = Orchestrator::new(ScenarioConfig::default(), Box::new(MockEngine::new()));
        assert_eq!(orchestrator.state().name(), "Created");
        assert!(orchestrator.submit().is_err());

        orchestrator.configure().unwrap();
        assert_eq!(orchestrator.state().name(), "Configured");
        assert!(orchestrator.configure().is_err());
        assert!(orchestrator.complete().is_err());

        orchestrator.submit().unwrap();
        assert_eq!(orchestrator.state().name(), "Submitted");
        assert!(orchestrator.submit().is_err());
        assert_eq!(orchestrator.state().name(), "Submitted");

        orchestrator.complete().unwrap();
        assert_eq!(orchestrator.state().name(), "Completed");
        assert!(orchestrator.report().is_some());
    }

    #[test]
    fn test_engine_refusal_ends_in_failed() {
        let mut orchestrator = Orchestrator::new(ScenarioConfig::default(), Box::new(MockEngine::failing()));
        orchestrator.configure().unwrap();

        let result = orchestrator.submit();
        assert!(matches!(result, Err(Error::SubmissionError(_))));
        assert!(matches!(orchestrator.state(), ScenarioState::Failed(_)));
        assert!(orchestrator.complete().is_err());
    }

    #[test]
    fn test_construction_fault_ends_in_failed() {
        let config = ScenarioConfig { end_time: -1.0, ..ScenarioConfig::default() };
        let mut orchestrator = Orchestrator::new(config, Box::new(MockEngine::new()));

        let result = orchestrator.configure();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
        assert!(matches!(orchestrator.state(), ScenarioState::Failed(_)));
        assert!(orchestrator.submit().is_err());
        assert!(orchestrator.into_report().is_err());
    }
}
