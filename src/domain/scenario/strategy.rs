use crate::domain::device::device::DeviceRole;
use crate::domain::placement::module_mapping::ModuleMapping;
use crate::domain::placement::placement_strategy::PlacementStrategy;
use crate::domain::scenario::parking_app::{CAPTURE_MODULE, DETECTOR_MODULE};
use crate::domain::topology::topology::Topology;

/// Picks the placement policy from the direct-cloud switch.
///
/// Direct-cloud pins both modules to the cloud. Otherwise capture may run
/// on any camera or the cloud and detection on any router, and the engine
/// decides among those candidates edge-ward.
pub fn select_placement_strategy(direct_cloud: bool, topology: &Topology) -> PlacementStrategy {
    let mut mapping = ModuleMapping::new();

    if direct_cloud {
        for cloud in topology.devices_with_role(DeviceRole::Cloud) {
            mapping.add_module_to_device(CAPTURE_MODULE, cloud.name.clone());
            mapping.add_module_to_device(DETECTOR_MODULE, cloud.name.clone());
        }
        return PlacementStrategy::StaticMapping(mapping);
    }

    for device in topology.devices() {
        match device.role {
            DeviceRole::Camera | DeviceRole::Cloud => mapping.add_module_to_device(CAPTURE_MODULE, device.name.clone()),
            DeviceRole::Router => mapping.add_module_to_device(DETECTOR_MODULE, device.name.clone()),
            DeviceRole::Proxy => {}
        }
    }
    PlacementStrategy::EdgeWard(mapping)
}
