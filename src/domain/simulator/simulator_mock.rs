use std::sync::{Arc, RwLock};

use crate::domain::simulator::engine::{SimulationEngine, Submission, SubmissionSummary};
use crate::domain::simulator::report::SimulationReport;
use crate::error::{Error, Result};

/// Engine stand-in that only records what it was given.
///
/// The record is shared, so a test can keep a handle after the mock has been
/// boxed into a `Controller`.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    pub submissions: Arc<RwLock<Vec<SubmissionSummary>>>,
    pub fail_on_submit: bool,
    pending: Option<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail_on_submit: true, ..Self::default() }
    }

    pub fn recorded(&self) -> Vec<SubmissionSummary> {
        self.submissions.read().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl SimulationEngine for MockEngine {
    fn submit(&mut self, submission: Submission) -> Result<()> {
        if self.fail_on_submit {
            return Err(Error::SubmissionError("mock engine refuses every submission".to_string()));
        }

        let summary = submission.summary();
        self.pending = Some(summary.strategy.clone());
        if let Ok(mut guard) = self.submissions.write() {
            guard.push(summary);
        }
        Ok(())
    }

    fn run(&mut self, end_time: f64) -> Result<SimulationReport> {
        let strategy = self.pending.take().ok_or_else(|| Error::SubmissionError("no application was submitted".to_string()))?;
        Ok(SimulationReport { strategy, end_time, finish_time: end_time, ..Default::default() })
    }
}
