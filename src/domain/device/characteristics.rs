use serde::{Deserialize, Serialize};

/// Static hosting characteristics attached to every device descriptor.
///
/// These values only describe the host; nothing in the scenario charges
/// against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCharacteristics {
    pub arch: String,
    pub os: String,
    pub vmm: String,
    pub time_zone: f64,

    /// Cost of using processing on this device.
    pub cost: f64,
    pub cost_per_memory: f64,
    pub cost_per_storage: f64,
    pub cost_per_bandwidth: f64,

    /// Host storage in MB.
    pub storage: u64,

    /// Host bandwidth, independent of the up/down link bandwidth of the device.
    pub host_bandwidth: u64,

    pub scheduling_interval: f64,
}

impl Default for DeviceCharacteristics {
    fn default() -> Self {
        Self {
            arch: "x86".to_string(),
            os: "Linux".to_string(),
            vmm: "Xen".to_string(),
            time_zone: 10.0,
            cost: 3.0,
            cost_per_memory: 0.05,
            cost_per_storage: 0.001,
            cost_per_bandwidth: 0.0,
            storage: 1_000_000,
            host_bandwidth: 10_000,
            scheduling_interval: 10.0,
        }
    }
}

/// Linear power model parameters in watts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerProfile {
    pub busy_power: f64,
    pub idle_power: f64,
}

impl PowerProfile {
    pub fn new(busy_power: f64, idle_power: f64) -> Self {
        Self { busy_power, idle_power }
    }

    /// Power draw at the given utilization, clamped to `[0, 1]`.
    pub fn power_at(&self, utilization: f64) -> f64 {
        let utilization = utilization.clamp(0.0, 1.0);
        self.idle_power + (self.busy_power - self.idle_power) * utilization
    }
}
