use crate::api::scenario_dto::ScenarioDto;
use crate::domain::device::device::DeviceRole;
use crate::domain::endpoint::distribution::Distribution;
use crate::domain::topology::hierarchy::{DeviceProfiles, LinkLatencies};
use crate::error::{Error, Result};

pub const DEFAULT_APP_ID: &str = "DCNS";
pub const DEFAULT_NUMBER_OF_AREAS: usize = 1;
pub const DEFAULT_CAMERAS_PER_AREA: usize = 2;
pub const DEFAULT_TRANSMISSION_TIME: f64 = 5.0;
pub const DEFAULT_END_TIME: f64 = 1000.0;
pub const DEFAULT_SEED: u64 = 42;

/// All parameters of one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub app_id: String,
    pub num_areas: usize,
    pub cameras_per_area: usize,

    /// How often each camera's sensor emits a tuple.
    pub emission: Distribution,

    /// `true` sends everything straight to the cloud, `false` uses edge-ward placement.
    pub direct_cloud: bool,

    pub end_time: f64,
    pub seed: u64,
    pub profiles: DeviceProfiles,
    pub latencies: LinkLatencies,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            num_areas: DEFAULT_NUMBER_OF_AREAS,
            cameras_per_area: DEFAULT_CAMERAS_PER_AREA,
            emission: Distribution::deterministic(DEFAULT_TRANSMISSION_TIME),
            direct_cloud: false,
            end_time: DEFAULT_END_TIME,
            seed: DEFAULT_SEED,
            profiles: DeviceProfiles::default(),
            latencies: LinkLatencies::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::ConfigurationError("application id must not be empty".to_string()));
        }
        if !self.end_time.is_finite() || self.end_time <= 0.0 {
            return Err(Error::ConfigurationError(format!("end time must be positive, got {}", self.end_time)));
        }
        self.emission.validate()?;

        for role in [DeviceRole::Cloud, DeviceRole::Proxy, DeviceRole::Router, DeviceRole::Camera] {
            self.profiles.for_role(role).validate(role, &format!("{} profile", role))?;
        }

        let latencies = [
            ("proxy to cloud", self.latencies.proxy_to_cloud),
            ("router to proxy", self.latencies.router_to_proxy),
            ("camera to router", self.latencies.camera_to_router),
            ("sensor to camera", self.latencies.sensor_to_camera),
            ("actuator to router", self.latencies.actuator_to_router),
        ];
        for (link, latency) in latencies {
            if !latency.is_finite() || latency < 0.0 {
                return Err(Error::ConfigurationError(format!("{} latency must be non-negative, got {}", link, latency)));
            }
        }
        Ok(())
    }
}

impl TryFrom<ScenarioDto> for ScenarioConfig {
    type Error = Error;

    /// Missing values fall back to the reference scenario. An explicit
    /// `emission` distribution wins over `cameraTransmissionTime`.
    fn try_from(dto: ScenarioDto) -> Result<Self> {
        let defaults = ScenarioConfig::default();

        let emission = match (dto.emission, dto.camera_transmission_time) {
            (Some(distribution), _) => distribution,
            (None, Some(period)) => Distribution::deterministic(period),
            (None, None) => defaults.emission,
        };

        let config = ScenarioConfig {
            app_id: dto.app_id.unwrap_or(defaults.app_id),
            num_areas: dto.number_of_areas.unwrap_or(defaults.num_areas),
            cameras_per_area: dto.number_of_cameras_per_area.unwrap_or(defaults.cameras_per_area),
            emission,
            direct_cloud: dto.is_cloud.unwrap_or(defaults.direct_cloud),
            end_time: dto.end_time.unwrap_or(defaults.end_time),
            seed: dto.seed.unwrap_or(defaults.seed),
            profiles: dto.devices.unwrap_or(defaults.profiles),
            latencies: dto.latencies.unwrap_or(defaults.latencies),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dto_gives_reference_scenario() {
        let config = ScenarioConfig::try_from(ScenarioDto::default()).unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.num_areas, 1);
        assert_eq!(config.cameras_per_area, 2);
        assert!(!config.direct_cloud);
    }

    #[test]
    fn test_transmission_time_sets_deterministic_period() {
        let dto = ScenarioDto { camera_transmission_time: Some(2.5), ..Default::default() };
        let config = ScenarioConfig::try_from(dto).unwrap();
        assert_eq!(config.emission, Distribution::deterministic(2.5));
    }

    #[test]
    fn test_non_positive_period_is_rejected() {
        let dto = ScenarioDto { camera_transmission_time: Some(0.0), ..Default::default() };
        assert!(matches!(ScenarioConfig::try_from(dto), Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_negative_latency_is_rejected() {
        let mut config = ScenarioConfig::default();
        config.latencies.router_to_proxy = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_camera_profile_with_foreign_level_is_rejected() {
        let mut profiles = DeviceProfiles::default();
        profiles.camera.level = 9;

        let dto = ScenarioDto { devices: Some(profiles), ..Default::default() };
        assert!(matches!(ScenarioConfig::try_from(dto), Err(Error::ConfigurationError(_))));
    }
}
