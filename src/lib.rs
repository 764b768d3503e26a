use crate::domain::scenario::config::ScenarioConfig;
use crate::domain::scenario::orchestrator::Orchestrator;
use crate::domain::simulator::event_simulator::EventSimulator;
use crate::domain::simulator::report::SimulationReport;
use crate::error::Result;

pub mod api;
pub mod cli;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Builds the scenario described by `config` and simulates it with the
/// built-in event engine.
pub fn run_scenario(config: ScenarioConfig) -> Result<SimulationReport> {
    log::info!(
        "Running scenario '{}' with {} area(s), {} camera(s) per area, direct cloud: {}.",
        config.app_id,
        config.num_areas,
        config.cameras_per_area,
        config.direct_cloud
    );

    let engine = EventSimulator::new(config.seed);
    Orchestrator::run(config, Box::new(engine))
}
