pub mod clock;
pub mod controller;
pub mod engine;
pub mod event_simulator;
pub mod report;
pub mod simulator_mock;
