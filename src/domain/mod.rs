pub mod application;
pub mod device;
pub mod endpoint;
pub mod placement;
pub mod scenario;
pub mod simulator;
pub mod topology;
pub mod utils;
