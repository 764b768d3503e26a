pub mod module_mapping;
pub mod placement;
pub mod placement_strategy;
