pub mod actuator;
pub mod attacher;
pub mod distribution;
pub mod sensor;
