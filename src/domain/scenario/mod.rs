pub mod builder;
pub mod config;
pub mod orchestrator;
pub mod parking_app;
pub mod strategy;
