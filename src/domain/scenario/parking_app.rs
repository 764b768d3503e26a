use crate::domain::application::app_edge::{AppEdge, EdgeRole, TupleDirection};
use crate::domain::application::app_loop::AppLoop;
use crate::domain::application::application::Application;
use crate::domain::application::selectivity::FractionalSelectivity;
use crate::domain::utils::id::{AppId, EntityId};
use crate::error::Result;

pub const CAPTURE_MODULE: &str = "picture-capture";
pub const DETECTOR_MODULE: &str = "slot-detector";

/// Sensor tag, also the type of tuples cameras emit.
pub const CAMERA_SENSOR: &str = "camera";
pub const PTZ_CONTROL_ACTUATOR: &str = "PTZ_CONTROL";

pub const SLOTS_TUPLE: &str = "slots";
pub const PTZ_PARAMS_TUPLE: &str = "PTZ_PARAMS";

pub const MODULE_RAM: u64 = 10;

/// Declares the parking graph without validating it:
/// camera → picture-capture → slot-detector → PTZ_CONTROL.
pub fn declare_application(app_id: AppId, user_id: EntityId) -> Result<Application> {
    let mut application = Application::new(app_id, user_id);

    application.add_app_module(CAPTURE_MODULE, MODULE_RAM)?;
    application.add_app_module(DETECTOR_MODULE, MODULE_RAM)?;
    application.add_sensor_tag(CAMERA_SENSOR);
    application.add_actuator_tag(PTZ_CONTROL_ACTUATOR);

    application.add_app_edge(AppEdge::new(CAMERA_SENSOR, CAPTURE_MODULE, 1000.0, 500.0, CAMERA_SENSOR, TupleDirection::Up, EdgeRole::Sensor));
    application.add_app_edge(AppEdge::new(CAPTURE_MODULE, DETECTOR_MODULE, 1000.0, 500.0, SLOTS_TUPLE, TupleDirection::Up, EdgeRole::Module));
    application.add_app_edge(
        AppEdge::new(DETECTOR_MODULE, PTZ_CONTROL_ACTUATOR, 100.0, 28.0, PTZ_PARAMS_TUPLE, TupleDirection::Up, EdgeRole::Actuator)
            .with_actuation_cost(100.0),
    );

    application.add_tuple_mapping(CAPTURE_MODULE, CAMERA_SENSOR, SLOTS_TUPLE, FractionalSelectivity::new(1.0)?);
    application.add_tuple_mapping(DETECTOR_MODULE, SLOTS_TUPLE, PTZ_PARAMS_TUPLE, FractionalSelectivity::new(1.0)?);

    application.set_loops(vec![parking_loop()]);

    Ok(application)
}

/// The declared graph, validated as a whole.
pub fn build_application(app_id: AppId, user_id: EntityId) -> Result<Application> {
    let application = declare_application(app_id, user_id)?;
    application.validate()?;

    log::info!("Application '{}' built for user {}.", application.app_id, application.user_id);
    Ok(application)
}

/// The loop whose latency is the scenario's primary metric.
pub fn parking_loop() -> AppLoop {
    AppLoop::new([CAMERA_SENSOR, CAPTURE_MODULE, DETECTOR_MODULE, PTZ_CONTROL_ACTUATOR])
}
