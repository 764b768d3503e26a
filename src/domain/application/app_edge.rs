use serde::Serialize;

/// Which kind of graph node an edge connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeRole {
    /// Sensor tag → module.
    Sensor,
    /// Module → module.
    Module,
    /// Module → actuator tag.
    Actuator,
}

/// Direction of travel in the device tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TupleDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppEdge {
    pub source: String,
    pub destination: String,

    /// Bytes per tuple.
    pub data_volume: f64,

    /// Processing cost of a tuple at the destination.
    pub processing_length: f64,

    pub tuple_type: String,
    pub direction: TupleDirection,
    pub role: EdgeRole,

    /// Extra processing on the actuator's device, only for actuator edges.
    pub actuation_cost: Option<f64>,
}

impl AppEdge {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        data_volume: f64,
        processing_length: f64,
        tuple_type: impl Into<String>,
        direction: TupleDirection,
        role: EdgeRole,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            data_volume,
            processing_length,
            tuple_type: tuple_type.into(),
            direction,
            role,
            actuation_cost: None,
        }
    }

    pub fn with_actuation_cost(mut self, cost: f64) -> Self {
        self.actuation_cost = Some(cost);
        self
    }
}
