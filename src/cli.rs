use std::path::PathBuf;

use clap::Parser;

use crate::api::scenario_dto::ScenarioDto;
use crate::domain::scenario::config::ScenarioConfig;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

/// Builds and simulates the smart car parking fog scenario.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fog_parking", version, about)]
pub struct Cli {
    /// JSON scenario file. Flags given on the command line override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of parking areas, one router each.
    #[arg(short, long)]
    pub areas: Option<usize>,

    /// Number of cameras per area.
    #[arg(long)]
    pub cameras_per_area: Option<usize>,

    /// Deterministic camera emission period.
    #[arg(short, long)]
    pub transmission_time: Option<f64>,

    /// Place every module in the cloud instead of towards the edge.
    /// `--cloud false` switches it off again for a scenario file that enables it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub cloud: Option<bool>,

    #[arg(short, long)]
    pub end_time: Option<f64>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write the run statistics as CSV to this file.
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Reads the scenario file, if any, and lays the flags over it.
    pub fn to_dto(&self) -> Result<ScenarioDto> {
        let dto = match &self.config {
            Some(path) => {
                log::info!("Loading scenario from '{}'...", path.display());
                parse_json_file::<ScenarioDto>(path)?
            }
            None => ScenarioDto::default(),
        };

        Ok(self.overlay(dto))
    }

    /// A transmission time given as flag replaces any emission distribution of the file.
    pub fn overlay(&self, mut dto: ScenarioDto) -> ScenarioDto {
        if self.areas.is_some() {
            dto.number_of_areas = self.areas;
        }
        if self.cameras_per_area.is_some() {
            dto.number_of_cameras_per_area = self.cameras_per_area;
        }
        if self.transmission_time.is_some() {
            dto.camera_transmission_time = self.transmission_time;
            dto.emission = None;
        }
        if self.cloud.is_some() {
            dto.is_cloud = self.cloud;
        }
        if self.end_time.is_some() {
            dto.end_time = self.end_time;
        }
        if self.seed.is_some() {
            dto.seed = self.seed;
        }
        dto
    }

    pub fn to_config(&self) -> Result<ScenarioConfig> {
        ScenarioConfig::try_from(self.to_dto()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::distribution::Distribution;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["fog_parking", "--areas", "3", "--cameras-per-area", "4", "--cloud", "-t", "2.5"]);

        let config = cli.to_config().unwrap();
        assert_eq!(config.num_areas, 3);
        assert_eq!(config.cameras_per_area, 4);
        assert!(config.direct_cloud);
        assert_eq!(config.emission, Distribution::deterministic(2.5));
    }

    #[test]
    fn test_cloud_flag_can_switch_file_setting_off() {
        let cli = Cli::parse_from(["fog_parking", "--cloud", "false"]);
        let dto = ScenarioDto { is_cloud: Some(true), ..Default::default() };

        let config = ScenarioConfig::try_from(cli.overlay(dto)).unwrap();
        assert!(!config.direct_cloud);
    }

    #[test]
    fn test_absent_cloud_flag_keeps_file_setting() {
        let cli = Cli::parse_from(["fog_parking"]);
        let dto = ScenarioDto { is_cloud: Some(true), ..Default::default() };

        assert!(ScenarioConfig::try_from(cli.overlay(dto)).unwrap().direct_cloud);
    }

    #[test]
    fn test_no_flags_gives_reference_scenario() {
        let cli = Cli::parse_from(["fog_parking"]);
        assert_eq!(cli.to_config().unwrap(), ScenarioConfig::default());
    }

    #[test]
    fn test_transmission_flag_overrides_file_distribution() {
        let cli = Cli { transmission_time: Some(7.0), ..Default::default() };
        let dto = ScenarioDto { emission: Some(Distribution::Uniform { min: 1.0, max: 2.0 }), end_time: Some(50.0), ..Default::default() };

        let config = ScenarioConfig::try_from(cli.overlay(dto)).unwrap();
        assert_eq!(config.end_time, 50.0);
        assert_eq!(config.emission, Distribution::deterministic(7.0));
    }
}
