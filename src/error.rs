use thiserror::Error;

/// Every failure class the scenario driver can hit. None of them are
/// recoverable: the orchestrator logs the error and the run ends.
#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write statistics report: {0}")]
    ReportError(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Topology integrity violated: {0}")]
    TopologyError(String),

    #[error("Application graph integrity violated: {0}")]
    GraphError(String),

    #[error("Simulation engine rejected the scenario: {0}")]
    SubmissionError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
