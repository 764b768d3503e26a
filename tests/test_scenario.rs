use fog_parking::domain::device::device::DeviceRole;
use fog_parking::domain::endpoint::distribution::Distribution;
use fog_parking::domain::scenario::builder::ScenarioBuilder;
use fog_parking::domain::scenario::config::ScenarioConfig;
use fog_parking::domain::scenario::orchestrator::{Orchestrator, ScenarioState};
use fog_parking::domain::scenario::parking_app::{CAPTURE_MODULE, DETECTOR_MODULE, parking_loop};
use fog_parking::domain::simulator::simulator_mock::MockEngine;
use fog_parking::domain::utils::statistics::write_report;
use fog_parking::error::Error;
use fog_parking::run_scenario;

fn edge_config() -> ScenarioConfig {
    ScenarioConfig::default()
}

fn cloud_config() -> ScenarioConfig {
    ScenarioConfig { direct_cloud: true, ..ScenarioConfig::default() }
}

#[test]
fn test_reference_scenario_structure() {
    let built = ScenarioBuilder::new(edge_config()).build().unwrap();

    assert_eq!(built.topology.len(), 5);
    assert_eq!(built.sensors.len(), 2);
    assert_eq!(built.actuators.len(), 2);
    assert_eq!(built.application.modules.len(), 2);
    assert_eq!(built.application.edges.len(), 3);
    assert_eq!(built.application.loops.len(), 1);
    assert_eq!(built.application.user_id, built.broker_id);
}

#[test]
fn test_endpoints_attach_to_camera_and_router() {
    let built = ScenarioBuilder::new(ScenarioConfig { num_areas: 2, cameras_per_area: 3, ..edge_config() }).build().unwrap();

    assert_eq!(built.sensors.len(), 6);
    for (sensor, actuator) in built.sensors.iter().zip(&built.actuators) {
        let camera = built.topology.get(sensor.gateway_device_id).unwrap();
        assert_eq!(camera.role, DeviceRole::Camera);
        assert_eq!(sensor.latency, 40.0);
        assert_eq!(sensor.tuple_type, "camera");

        assert_eq!(Some(actuator.gateway_device_id), camera.parent_id);
        assert_eq!(built.topology.get(actuator.gateway_device_id).unwrap().role, DeviceRole::Router);
        assert_eq!(actuator.latency, 1.0);
        assert_eq!(actuator.paired_sensor_id, sensor.id);
        assert_eq!(actuator.actuator_type, "PTZ_CONTROL");
    }
}

#[test]
fn test_cloud_flag_only_changes_strategy() {
    let edge_engine = MockEngine::new();
    let cloud_engine = MockEngine::new();

    Orchestrator::run(edge_config(), Box::new(edge_engine.clone())).unwrap();
    Orchestrator::run(cloud_config(), Box::new(cloud_engine.clone())).unwrap();

    let edge = edge_engine.recorded();
    let cloud = cloud_engine.recorded();
    assert_eq!(edge.len(), 1);
    assert_eq!(cloud.len(), 1);

    assert_eq!(edge[0].strategy, "edge-ward");
    assert_eq!(cloud[0].strategy, "static-mapping");

    let mut cloud_summary = cloud[0].clone();
    cloud_summary.strategy = edge[0].strategy.clone();
    assert_eq!(cloud_summary, edge[0]);
}

#[test]
fn test_orchestrator_reaches_completed() {
    let mut orchestrator = Orchestrator::new(edge_config(), Box::new(MockEngine::new()));
    orchestrator.configure().unwrap();
    orchestrator.submit().unwrap();
    orchestrator.complete().unwrap();

    assert!(matches!(orchestrator.state(), ScenarioState::Completed(_)));
    assert_eq!(orchestrator.into_report().unwrap().strategy, "edge-ward");
}

#[test]
fn test_every_emitted_tuple_reaches_an_actuator() {
    let report = run_scenario(edge_config()).unwrap();

    assert_eq!(report.emitted.len(), 2);
    assert!(report.emitted.values().all(|count| *count == 200));
    assert_eq!(report.total_emitted(), report.total_delivered());
    assert_eq!(report.dropped, 0);
    assert!(report.finish_time > report.end_time);

    let latency = report.loop_latency(&parking_loop().label()).unwrap();
    assert_eq!(latency.samples, 400);
}

#[test]
fn test_edge_ward_keeps_modules_near_the_cameras() {
    let report = run_scenario(edge_config()).unwrap();

    assert_eq!(report.placement[CAPTURE_MODULE], vec!["camera-0-of-router-0".to_string(), "camera-1-of-router-0".to_string()]);
    assert_eq!(report.placement[DETECTOR_MODULE], vec!["router-0".to_string()]);
}

#[test]
fn test_direct_cloud_places_everything_in_the_cloud() {
    let report = run_scenario(cloud_config()).unwrap();

    assert_eq!(report.strategy, "static-mapping");
    assert_eq!(report.placement[CAPTURE_MODULE], vec!["cloud".to_string()]);
    assert_eq!(report.placement[DETECTOR_MODULE], vec!["cloud".to_string()]);
    assert_eq!(report.total_emitted(), report.total_delivered());
}

#[test]
fn test_cloud_loop_is_slower_than_edge_loop() {
    let label = parking_loop().label();

    let edge = run_scenario(edge_config()).unwrap();
    let cloud = run_scenario(cloud_config()).unwrap();

    let edge_latency = edge.loop_latency(&label).and_then(|l| l.average()).unwrap();
    let cloud_latency = cloud.loop_latency(&label).and_then(|l| l.average()).unwrap();

    // sensor 40 + camera 1.0 + uplink 2 + router 500/2800 + actuator 1 + 100/2800
    assert!((edge_latency - 44.2142857).abs() < 1e-4, "edge latency was {}", edge_latency);
    assert!(cloud_latency > edge_latency + 200.0, "cloud latency was {}", cloud_latency);
}

#[test]
fn test_uniform_emission_is_reproducible_per_seed() {
    let config = ScenarioConfig { emission: Distribution::Uniform { min: 2.0, max: 8.0 }, end_time: 200.0, ..edge_config() };

    let first = run_scenario(config.clone()).unwrap();
    let second = run_scenario(config).unwrap();

    assert_eq!(first, second);
    assert!(first.emission_mean.values().all(|mean| *mean == 5.0));
    assert_eq!(first.total_emitted(), first.total_delivered());
}

#[test]
fn test_zero_areas_runs_without_endpoints() {
    let report = run_scenario(ScenarioConfig { num_areas: 0, ..edge_config() }).unwrap();

    assert_eq!(report.total_emitted(), 0);
    assert_eq!(report.total_delivered(), 0);
    assert_eq!(report.loop_latency(&parking_loop().label()).unwrap().average(), None);
}

#[test]
fn test_report_written_as_csv() {
    let report = run_scenario(ScenarioConfig { end_time: 20.0, ..edge_config() }).unwrap();

    let mut buffer = Vec::new();
    write_report(&mut buffer, "it", &report).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.starts_with("RunId;Metric;Subject;Value"));
    assert!(text.contains("it;Emitted;sensor-0-of-router-0;4"));
    assert!(text.contains("it;Delivered;ptz-1-of-router-0;4"));
    assert!(text.contains("it;EmissionMean;sensor-1-of-router-0;5.0"));
}

#[test]
fn test_builder_rejects_profile_level_of_another_role() {
    let mut config = edge_config();
    config.profiles.camera.level = 9;

    let result = ScenarioBuilder::new(config).build();
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}

#[test]
fn test_invalid_profile_leaves_orchestrator_failed() {
    let mut config = edge_config();
    config.profiles.router.mips = 0;

    let mut orchestrator = Orchestrator::new(config, Box::new(MockEngine::new()));
    assert!(orchestrator.configure().is_err());
    assert!(matches!(orchestrator.state(), ScenarioState::Failed(_)));
}
