use serde::{Deserialize, Serialize};

use crate::domain::device::device::{Device, DeviceProfile, DeviceRole};
use crate::domain::topology::topology::Topology;
use crate::domain::utils::id::EntityIdGenerator;
use crate::error::Result;

pub const CLOUD_NAME: &str = "cloud";
pub const PROXY_NAME: &str = "proxy-server";

/// Name of the router serving area `area`.
pub fn router_name(area: usize) -> String {
    format!("router-{}", area)
}

/// Positional suffix shared by a camera and its endpoints, e.g. `0-of-router-1`.
pub fn camera_suffix(camera: usize, area: usize) -> String {
    format!("{}-of-{}", camera, router_name(area))
}

pub fn camera_name(camera: usize, area: usize) -> String {
    format!("camera-{}", camera_suffix(camera, area))
}

/// Provisioning profile per hierarchy role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfiles {
    pub cloud: DeviceProfile,
    pub proxy: DeviceProfile,
    pub router: DeviceProfile,
    pub camera: DeviceProfile,
}

impl DeviceProfiles {
    pub fn for_role(&self, role: DeviceRole) -> &DeviceProfile {
        match role {
            DeviceRole::Cloud => &self.cloud,
            DeviceRole::Proxy => &self.proxy,
            DeviceRole::Router => &self.router,
            DeviceRole::Camera => &self.camera,
        }
    }
}

impl Default for DeviceProfiles {
    fn default() -> Self {
        Self {
            cloud: DeviceProfile::reference(DeviceRole::Cloud),
            proxy: DeviceProfile::reference(DeviceRole::Proxy),
            router: DeviceProfile::reference(DeviceRole::Router),
            camera: DeviceProfile::reference(DeviceRole::Camera),
        }
    }
}

/// Per-link latencies of the scenario, in simulation time units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkLatencies {
    pub proxy_to_cloud: f64,
    pub router_to_proxy: f64,
    pub camera_to_router: f64,
    pub sensor_to_camera: f64,
    pub actuator_to_router: f64,
}

impl Default for LinkLatencies {
    fn default() -> Self {
        Self { proxy_to_cloud: 100.0, router_to_proxy: 2.0, camera_to_router: 2.0, sensor_to_camera: 40.0, actuator_to_router: 1.0 }
    }
}

/// Builds the fixed-depth tree: one cloud, one proxy below it, `num_areas`
/// routers below the proxy and `cameras_per_area` cameras below each router.
///
/// Devices are added parent-first, so the returned topology lists the cloud
/// first and every camera after its router. With `num_areas == 0` only the
/// cloud and the proxy exist.
pub fn build_hierarchy(
    ids: &mut EntityIdGenerator,
    num_areas: usize,
    cameras_per_area: usize,
    profiles: &DeviceProfiles,
    latencies: &LinkLatencies,
) -> Result<Topology> {
    let mut topology = Topology::new();

    let cloud = Device::create(ids, CLOUD_NAME, DeviceRole::Cloud, profiles.for_role(DeviceRole::Cloud))?;

    let mut proxy = Device::create(ids, PROXY_NAME, DeviceRole::Proxy, profiles.for_role(DeviceRole::Proxy))?;
    proxy.attach_to(&cloud, latencies.proxy_to_cloud);

    let proxy_snapshot = proxy.clone();
    topology.add_device(cloud)?;
    topology.add_device(proxy)?;

    for area in 0..num_areas {
        add_area(ids, &mut topology, &proxy_snapshot, area, cameras_per_area, profiles, latencies)?;
    }

    log::info!(
        "Built device hierarchy with {} devices ({} areas, {} cameras per area).",
        topology.len(),
        num_areas,
        cameras_per_area
    );
    Ok(topology)
}

fn add_area(
    ids: &mut EntityIdGenerator,
    topology: &mut Topology,
    proxy: &Device,
    area: usize,
    cameras_per_area: usize,
    profiles: &DeviceProfiles,
    latencies: &LinkLatencies,
) -> Result<()> {
    let mut router = Device::create(ids, router_name(area), DeviceRole::Router, profiles.for_role(DeviceRole::Router))?;
    router.attach_to(proxy, latencies.router_to_proxy);

    let router_snapshot = router.clone();
    topology.add_device(router)?;

    for camera_index in 0..cameras_per_area {
        let mut camera = Device::create(ids, camera_name(camera_index, area), DeviceRole::Camera, profiles.for_role(DeviceRole::Camera))?;
        camera.attach_to(&router_snapshot, latencies.camera_to_router);
        topology.add_device(camera)?;
    }

    log::debug!("Added area {} with {} cameras below '{}'.", area, cameras_per_area, router_snapshot.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn build(num_areas: usize, cameras_per_area: usize) -> Topology {
        let mut ids = EntityIdGenerator::new();
        build_hierarchy(&mut ids, num_areas, cameras_per_area, &DeviceProfiles::default(), &LinkLatencies::default()).unwrap()
    }

    #[test]
    fn test_device_count_formula() {
        for num_areas in 0..4 {
            for cameras_per_area in 0..4 {
                let topology = build(num_areas, cameras_per_area);
                assert_eq!(topology.len(), 2 + num_areas + num_areas * cameras_per_area);
                assert!(topology.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_positional_names() {
        let topology = build(2, 2);

        assert!(topology.get_by_name("cloud").is_some());
        assert!(topology.get_by_name("proxy-server").is_some());
        assert!(topology.get_by_name("router-1").is_some());

        let camera = topology.get_by_name("camera-1-of-router-1").unwrap();
        let router = topology.get_by_name("router-1").unwrap();
        assert_eq!(camera.parent_id, Some(router.id));
        assert_eq!(camera.role, DeviceRole::Camera);
    }

    #[test]
    fn test_latencies_per_level() {
        let topology = build(1, 1);

        assert_eq!(topology.get_by_name("cloud").unwrap().uplink_latency, 0.0);
        assert_eq!(topology.get_by_name("proxy-server").unwrap().uplink_latency, 100.0);
        assert_eq!(topology.get_by_name("router-0").unwrap().uplink_latency, 2.0);
        assert_eq!(topology.get_by_name("camera-0-of-router-0").unwrap().uplink_latency, 2.0);
    }

    #[test]
    fn test_zero_areas_yields_cloud_and_proxy() {
        let topology = build(0, 5);

        assert_eq!(topology.len(), 2);
        assert_eq!(topology.root().unwrap().name.as_str(), CLOUD_NAME);
    }

    #[test]
    fn test_invalid_profile_aborts_build() {
        let mut ids = EntityIdGenerator::new();
        let mut profiles = DeviceProfiles::default();
        profiles.router.uplink_bandwidth = 0;

        let result = build_hierarchy(&mut ids, 1, 1, &profiles, &LinkLatencies::default());
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }
}
