use serde::Serialize;

/// A processing stage of the application graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppModule {
    pub name: String,

    /// RAM footprint, checked against a device's free RAM during placement.
    pub ram: u64,

    pub mips: u64,
    pub size: u64,
    pub bandwidth: u64,
}

impl AppModule {
    pub fn new(name: impl Into<String>, ram: u64) -> Self {
        Self { name: name.into(), ram, mips: 1_000, size: 10_000, bandwidth: 1_000 }
    }
}
