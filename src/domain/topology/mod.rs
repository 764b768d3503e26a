pub mod hierarchy;
pub mod topology;
