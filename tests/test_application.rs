use fog_parking::domain::application::application::Application;
use fog_parking::domain::scenario::parking_app::{
    CAMERA_SENSOR, CAPTURE_MODULE, DETECTOR_MODULE, PTZ_CONTROL_ACTUATOR, build_application, declare_application, parking_loop,
};
use fog_parking::domain::utils::id::{AppId, EntityId};
use fog_parking::error::Error;

fn declared() -> Application {
    declare_application(AppId::new("DCNS"), EntityId(1)).unwrap()
}

#[test]
fn test_reference_graph_is_valid() {
    let application = build_application(AppId::new("DCNS"), EntityId(7)).unwrap();

    assert_eq!(application.user_id, EntityId(7));
    assert!(application.sensor_tags.contains(CAMERA_SENSOR));
    assert!(application.actuator_tags.contains(PTZ_CONTROL_ACTUATOR));
    assert_eq!(application.module_order().unwrap(), vec![CAPTURE_MODULE.to_string(), DETECTOR_MODULE.to_string()]);
    assert_eq!(parking_loop().label(), "camera -> picture-capture -> slot-detector -> PTZ_CONTROL");
}

#[test]
fn test_removing_any_edge_breaks_the_graph() {
    for removed in 0..declared().edges.len() {
        let mut application = declared();
        let edge = application.edges.remove(removed);

        let result = application.validate();
        assert!(matches!(result, Err(Error::GraphError(_))), "graph without {} -> {} still validates", edge.source, edge.destination);
    }
}

#[test]
fn test_duplicate_module_is_rejected() {
    let mut application = declared();
    let result = application.add_app_module(CAPTURE_MODULE, 10);
    assert!(matches!(result, Err(Error::GraphError(_))));
}

#[test]
fn test_edge_lookup_by_endpoints() {
    let application = declared();

    assert!(application.get_edge(CAMERA_SENSOR, CAPTURE_MODULE).is_some());
    assert!(application.get_edge(CAPTURE_MODULE, DETECTOR_MODULE).is_some());
    assert!(application.get_edge(DETECTOR_MODULE, PTZ_CONTROL_ACTUATOR).is_some());
    assert!(application.get_edge(CAMERA_SENSOR, DETECTOR_MODULE).is_none());
    assert_eq!(application.outgoing_edges(CAPTURE_MODULE).count(), 1);
}
