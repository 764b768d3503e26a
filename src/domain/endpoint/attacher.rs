use crate::domain::device::device::DeviceRole;
use crate::domain::endpoint::actuator::Actuator;
use crate::domain::endpoint::distribution::Distribution;
use crate::domain::endpoint::sensor::Sensor;
use crate::domain::topology::topology::Topology;
use crate::domain::utils::id::{ActuatorName, AppId, EntityId, EntityIdGenerator, SensorName};
use crate::error::{Error, Result};

/// How endpoints are attached to each camera.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSettings {
    pub emission: Distribution,
    pub sensor_latency: f64,
    pub actuator_latency: f64,
    pub sensor_tuple_type: String,
    pub actuator_type: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            emission: Distribution::deterministic(5.0),
            sensor_latency: 40.0,
            actuator_latency: 1.0,
            sensor_tuple_type: "camera".to_string(),
            actuator_type: "PTZ_CONTROL".to_string(),
        }
    }
}

/// Creates the sensor/actuator pair of one camera.
///
/// The sensor's gateway is the camera itself. The actuator's gateway is the
/// camera's parent router. Endpoint names reuse the camera's positional
/// suffix, so `camera-0-of-router-1` gets `sensor-0-of-router-1` and
/// `ptz-0-of-router-1`.
pub fn attach_endpoints(
    ids: &mut EntityIdGenerator,
    topology: &Topology,
    camera_id: EntityId,
    app_id: &AppId,
    settings: &EndpointSettings,
) -> Result<(Sensor, Actuator)> {
    let camera = topology.require(camera_id)?;
    if camera.role != DeviceRole::Camera {
        return Err(Error::TopologyError(format!("endpoints can only be attached to cameras, '{}' is a {}", camera.name, camera.role)));
    }

    let router_id = camera
        .parent_id
        .ok_or_else(|| Error::TopologyError(format!("camera '{}' has no parent router", camera.name)))?;
    let router = topology.require(router_id)?;

    let suffix = camera.name.as_str().strip_prefix("camera-").unwrap_or(camera.name.as_str());

    let sensor = Sensor {
        id: ids.generate(),
        name: SensorName::new(format!("sensor-{}", suffix)),
        app_id: app_id.clone(),
        tuple_type: settings.sensor_tuple_type.clone(),
        distribution: settings.emission,
        gateway_device_id: camera.id,
        latency: settings.sensor_latency,
    };

    let actuator = Actuator {
        id: ids.generate(),
        name: ActuatorName::new(format!("ptz-{}", suffix)),
        app_id: app_id.clone(),
        actuator_type: settings.actuator_type.clone(),
        gateway_device_id: router.id,
        latency: settings.actuator_latency,
        paired_sensor_id: sensor.id,
    };

    log::debug!("Attached '{}' and '{}' to '{}' via '{}'.", sensor.name, actuator.name, camera.name, router.name);
    Ok((sensor, actuator))
}
