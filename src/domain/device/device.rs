use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::device::characteristics::{DeviceCharacteristics, PowerProfile};
use crate::domain::utils::id::{DeviceName, EntityId, EntityIdGenerator};
use crate::error::{Error, Result};

/// Position of a device in the cloud → proxy → router → camera hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceRole {
    Cloud,
    Proxy,
    Router,
    Camera,
}

impl DeviceRole {
    /// Hierarchy level; 0 is the cloud.
    pub fn level(&self) -> u32 {
        match self {
            DeviceRole::Cloud => 0,
            DeviceRole::Proxy => 1,
            DeviceRole::Router => 2,
            DeviceRole::Camera => 3,
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceRole::Cloud => "cloud",
            DeviceRole::Proxy => "proxy",
            DeviceRole::Router => "router",
            DeviceRole::Camera => "camera",
        };
        write!(f, "{}", name)
    }
}

/// The compact provisioning parameters a device descriptor is made from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub mips: u64,
    pub ram_mb: u64,
    pub uplink_bandwidth: u64,
    pub downlink_bandwidth: u64,
    pub level: u32,
    pub rate_per_mips: f64,
    pub busy_power: f64,
    pub idle_power: f64,
}

impl DeviceProfile {
    /// Reference provisioning for each role of the parking scenario.
    pub fn reference(role: DeviceRole) -> Self {
        match role {
            DeviceRole::Cloud => Self {
                mips: 44_800,
                ram_mb: 40_000,
                uplink_bandwidth: 100,
                downlink_bandwidth: 10_000,
                level: 0,
                rate_per_mips: 0.01,
                busy_power: 16.0 * 103.0,
                idle_power: 16.0 * 83.25,
            },
            DeviceRole::Proxy => Self {
                mips: 2_800,
                ram_mb: 4_000,
                uplink_bandwidth: 10_000,
                downlink_bandwidth: 10_000,
                level: 1,
                rate_per_mips: 0.0,
                busy_power: 107.339,
                idle_power: 83.433,
            },
            DeviceRole::Router => Self {
                mips: 2_800,
                ram_mb: 4_000,
                uplink_bandwidth: 1_000,
                downlink_bandwidth: 10_000,
                level: 2,
                rate_per_mips: 0.0,
                busy_power: 107.339,
                idle_power: 83.4333,
            },
            DeviceRole::Camera => Self {
                mips: 500,
                ram_mb: 1_000,
                uplink_bandwidth: 10_000,
                downlink_bandwidth: 10_000,
                level: 3,
                rate_per_mips: 0.0,
                busy_power: 87.53,
                idle_power: 82.44,
            },
        }
    }

    /// Rejects values the engine cannot provision, and a level that does not
    /// match the role's place in the hierarchy. Nothing is clamped.
    pub fn validate(&self, role: DeviceRole, name: &str) -> Result<()> {
        if self.level != role.level() {
            return Err(Error::ConfigurationError(format!(
                "device '{}': a {} sits at level {}, profile says {}",
                name,
                role,
                role.level(),
                self.level
            )));
        }

        let positive = [
            ("mips", self.mips),
            ("ram", self.ram_mb),
            ("uplink bandwidth", self.uplink_bandwidth),
            ("downlink bandwidth", self.downlink_bandwidth),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(Error::ConfigurationError(format!("device '{}': {} must be positive", name, field)));
            }
        }

        let non_negative = [("rate per mips", self.rate_per_mips), ("busy power", self.busy_power), ("idle power", self.idle_power)];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::ConfigurationError(format!("device '{}': {} must be a non-negative number, got {}", name, field, value)));
            }
        }

        Ok(())
    }
}

/// A fully formed device descriptor as handed to the simulation engine.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub id: EntityId,
    pub name: DeviceName,
    pub role: DeviceRole,
    pub level: u32,

    /// `None` only for the cloud root.
    pub parent_id: Option<EntityId>,

    pub mips: u64,
    pub ram_mb: u64,
    pub uplink_bandwidth: u64,
    pub downlink_bandwidth: u64,

    /// Latency of the link towards the parent device.
    pub uplink_latency: f64,

    pub rate_per_mips: f64,
    pub power: PowerProfile,
    pub characteristics: DeviceCharacteristics,
}

impl Device {
    /// Builds a device descriptor from its provisioning profile and allocates
    /// a fresh id for it. The device starts detached (no parent, zero latency).
    pub fn create(ids: &mut EntityIdGenerator, name: impl Into<String>, role: DeviceRole, profile: &DeviceProfile) -> Result<Device> {
        let name = name.into();
        profile.validate(role, &name)?;

        let device = Device {
            id: ids.generate(),
            name: DeviceName::new(name),
            role,
            level: profile.level,
            parent_id: None,
            mips: profile.mips,
            ram_mb: profile.ram_mb,
            uplink_bandwidth: profile.uplink_bandwidth,
            downlink_bandwidth: profile.downlink_bandwidth,
            uplink_latency: 0.0,
            rate_per_mips: profile.rate_per_mips,
            power: PowerProfile::new(profile.busy_power, profile.idle_power),
            characteristics: DeviceCharacteristics::default(),
        };

        log::debug!("Created device '{}' ({}) at level {} with {} MIPS.", device.name, device.id, device.level, device.mips);
        Ok(device)
    }

    /// Attaches this device below `parent` with the given uplink latency.
    pub fn attach_to(&mut self, parent: &Device, uplink_latency: f64) {
        self.parent_id = Some(parent.id);
        self.uplink_latency = uplink_latency;
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
