use serde::{Deserialize, Serialize};

use crate::domain::endpoint::distribution::Distribution;
use crate::domain::topology::hierarchy::{DeviceProfiles, LinkLatencies};

/// Scenario file as read from JSON. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    pub app_id: Option<String>,
    pub number_of_areas: Option<usize>,
    pub number_of_cameras_per_area: Option<usize>,
    pub camera_transmission_time: Option<f64>,
    pub emission: Option<Distribution>,
    pub is_cloud: Option<bool>,
    pub end_time: Option<f64>,
    pub seed: Option<u64>,
    pub devices: Option<DeviceProfiles>,
    pub latencies: Option<LinkLatencies>,
}
