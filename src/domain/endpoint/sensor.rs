use serde::Serialize;

use crate::domain::endpoint::distribution::Distribution;
use crate::domain::utils::id::{AppId, EntityId, SensorName};

/// Periodic data source attached to a leaf device.
#[derive(Debug, Clone, Serialize)]
pub struct Sensor {
    pub id: EntityId,
    pub name: SensorName,
    pub app_id: AppId,

    /// Graph node this sensor feeds; tuples it emits carry this type.
    pub tuple_type: String,

    pub distribution: Distribution,

    /// The leaf device receiving the emitted tuples.
    pub gateway_device_id: EntityId,

    /// Delay between emission and arrival at the gateway device.
    pub latency: f64,
}
