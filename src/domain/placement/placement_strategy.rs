use std::fmt;

use serde::Serialize;

use crate::domain::placement::module_mapping::ModuleMapping;

/// How modules end up on devices. Picked once per scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlacementStrategy {
    /// Every listed (module, device) pair is used as is.
    StaticMapping(ModuleMapping),

    /// The mapping lists candidates; the engine picks, per sensor path, the
    /// candidate closest to the data source that has room for the module.
    EdgeWard(ModuleMapping),
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementStrategy::StaticMapping(_) => write!(f, "static-mapping"),
            PlacementStrategy::EdgeWard(_) => write!(f, "edge-ward"),
        }
    }
}
