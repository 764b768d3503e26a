use fog_parking::domain::device::device::{DeviceProfile, DeviceRole};
use fog_parking::domain::topology::hierarchy::{DeviceProfiles, LinkLatencies, build_hierarchy, camera_name, router_name};
use fog_parking::domain::topology::topology::Topology;
use fog_parking::domain::utils::id::EntityIdGenerator;
use fog_parking::error::Error;

fn build(num_areas: usize, cameras_per_area: usize) -> Topology {
    let mut ids = EntityIdGenerator::new();
    build_hierarchy(&mut ids, num_areas, cameras_per_area, &DeviceProfiles::default(), &LinkLatencies::default()).unwrap()
}

#[test]
fn test_device_count_for_larger_grid() {
    let topology = build(3, 4);

    assert_eq!(topology.len(), 2 + 3 + 3 * 4);
    assert_eq!(topology.devices_with_role(DeviceRole::Cloud).count(), 1);
    assert_eq!(topology.devices_with_role(DeviceRole::Proxy).count(), 1);
    assert_eq!(topology.devices_with_role(DeviceRole::Router).count(), 3);
    assert_eq!(topology.devices_with_role(DeviceRole::Camera).count(), 12);
    topology.validate().unwrap();
}

#[test]
fn test_every_parent_is_listed_before_its_children() {
    let topology = build(2, 3);

    for (position, device) in topology.devices().iter().enumerate() {
        if let Some(parent_id) = device.parent_id {
            let parent_position = topology.devices().iter().position(|d| d.id == parent_id).unwrap();
            assert!(parent_position < position, "{} listed before its parent", device.name);

            let parent = topology.get(parent_id).unwrap();
            assert_eq!(parent.level + 1, device.level);
        } else {
            assert_eq!(device.role, DeviceRole::Cloud);
        }
    }
}

#[test]
fn test_cameras_hang_below_their_area_router() {
    let topology = build(2, 2);

    for area in 0..2 {
        let router = topology.get_by_name(&router_name(area)).unwrap();
        let cameras: Vec<String> = topology.children_of(router.id).map(|camera| camera.name.to_string()).collect();
        assert_eq!(cameras, vec![camera_name(0, area), camera_name(1, area)]);
    }
}

#[test]
fn test_latencies_add_up_along_the_tree() {
    let topology = build(2, 1);

    let camera_a = topology.get_by_name(&camera_name(0, 0)).unwrap().id;
    let camera_b = topology.get_by_name(&camera_name(0, 1)).unwrap().id;
    let cloud = topology.root().unwrap().id;

    assert_eq!(topology.latency_between(camera_a, cloud), Some(104.0));
    assert_eq!(topology.latency_between(camera_a, camera_b), Some(8.0));
    assert_eq!(topology.latency_between(camera_a, camera_a), Some(0.0));
    assert_eq!(topology.path_to_root(camera_a).len(), 4);
}

#[test]
fn test_custom_profile_is_applied_per_role() {
    let mut profiles = DeviceProfiles::default();
    profiles.router = DeviceProfile { mips: 5_000, ..DeviceProfile::reference(DeviceRole::Router) };

    let mut ids = EntityIdGenerator::new();
    let topology = build_hierarchy(&mut ids, 1, 1, &profiles, &LinkLatencies::default()).unwrap();

    let router = topology.get_by_name(&router_name(0)).unwrap();
    assert_eq!(router.mips, 5_000);
    assert_eq!(topology.get_by_name(&camera_name(0, 0)).unwrap().mips, 500);
}

#[test]
fn test_zero_mips_profile_is_rejected() {
    let mut profiles = DeviceProfiles::default();
    profiles.camera.mips = 0;

    let mut ids = EntityIdGenerator::new();
    let result = build_hierarchy(&mut ids, 1, 2, &profiles, &LinkLatencies::default());
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}
