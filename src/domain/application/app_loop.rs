use serde::Serialize;

/// An ordered path of graph nodes whose end-to-end latency is reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AppLoop {
    pub nodes: Vec<String>,
}

impl AppLoop {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { nodes: nodes.into_iter().map(Into::into).collect() }
    }

    /// Human readable form, e.g. `camera -> picture-capture -> PTZ_CONTROL`.
    pub fn label(&self) -> String {
        self.nodes.join(" -> ")
    }
}
