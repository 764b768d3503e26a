use crate::domain::application::application::Application;
use crate::domain::device::device::DeviceRole;
use crate::domain::endpoint::actuator::Actuator;
use crate::domain::endpoint::attacher::{EndpointSettings, attach_endpoints};
use crate::domain::endpoint::sensor::Sensor;
use crate::domain::placement::placement_strategy::PlacementStrategy;
use crate::domain::scenario::config::ScenarioConfig;
use crate::domain::scenario::parking_app::{CAMERA_SENSOR, PTZ_CONTROL_ACTUATOR, build_application};
use crate::domain::simulator::engine::Submission;
use crate::domain::topology::hierarchy::build_hierarchy;
use crate::domain::topology::topology::Topology;
use crate::domain::utils::id::{AppId, EntityId, EntityIdGenerator};
use crate::error::Result;

/// Devices, endpoints and graph of one scenario, not yet handed to an engine.
#[derive(Debug, Clone)]
pub struct BuiltScenario {
    /// The user the application is registered for.
    pub broker_id: EntityId,
    pub topology: Topology,
    pub sensors: Vec<Sensor>,
    pub actuators: Vec<Actuator>,
    pub application: Application,
}

impl BuiltScenario {
    pub fn into_submission(self, strategy: PlacementStrategy) -> Submission {
        Submission { topology: self.topology, sensors: self.sensors, actuators: self.actuators, application: self.application, strategy }
    }
}

/// Builds a scenario step by step. Every step completes before the next one
/// starts and any failure aborts the whole build.
#[derive(Debug)]
pub struct ScenarioBuilder {
    config: ScenarioConfig,
    ids: EntityIdGenerator,
}

impl ScenarioBuilder {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, ids: EntityIdGenerator::new() }
    }

    pub fn build(mut self) -> Result<BuiltScenario> {
        self.config.validate()?;

        let broker_id = self.ids.generate();
        let app_id = AppId::new(self.config.app_id.clone());

        let application = build_application(app_id.clone(), broker_id)?;

        let topology =
            build_hierarchy(&mut self.ids, self.config.num_areas, self.config.cameras_per_area, &self.config.profiles, &self.config.latencies)?;

        let settings = EndpointSettings {
            emission: self.config.emission,
            sensor_latency: self.config.latencies.sensor_to_camera,
            actuator_latency: self.config.latencies.actuator_to_router,
            sensor_tuple_type: CAMERA_SENSOR.to_string(),
            actuator_type: PTZ_CONTROL_ACTUATOR.to_string(),
        };

        let camera_ids: Vec<EntityId> = topology.devices_with_role(DeviceRole::Camera).map(|camera| camera.id).collect();
        let mut sensors = Vec::with_capacity(camera_ids.len());
        let mut actuators = Vec::with_capacity(camera_ids.len());

        for camera_id in camera_ids {
            let (sensor, actuator) = attach_endpoints(&mut self.ids, &topology, camera_id, &app_id, &settings)?;
            sensors.push(sensor);
            actuators.push(actuator);
        }

        log::info!(
            "Scenario '{}' built: {} devices, {} sensors, {} actuators.",
            app_id,
            topology.len(),
            sensors.len(),
            actuators.len()
        );

        Ok(BuiltScenario { broker_id, topology, sensors, actuators, application })
    }
}
