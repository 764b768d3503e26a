use serde::Serialize;

use crate::domain::utils::id::{ActuatorName, AppId, EntityId};

/// Command sink paired with a sensor.
#[derive(Debug, Clone, Serialize)]
pub struct Actuator {
    pub id: EntityId,
    pub name: ActuatorName,
    pub app_id: AppId,

    /// Graph node this actuator consumes from.
    pub actuator_type: String,

    /// Device the actuator hangs off. For cameras this is the parent router.
    pub gateway_device_id: EntityId,

    pub latency: f64,

    /// The sensor whose tuples end up at this actuator.
    pub paired_sensor_id: EntityId,
}
