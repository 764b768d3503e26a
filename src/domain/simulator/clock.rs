use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Uninitialized,
    Initialized,
    Running,
    Stopped,
}

/// Simulated time source with the init / start / stop life cycle.
#[derive(Debug, Clone)]
pub struct SimClock {
    state: ClockState,
    now: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self { state: ClockState::Uninitialized, now: 0.0 }
    }

    pub fn init(&mut self) {
        self.now = 0.0;
        self.state = ClockState::Initialized;
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state != ClockState::Initialized {
            return Err(Error::SubmissionError(format!("clock cannot start from state {:?}", self.state)));
        }
        self.state = ClockState::Running;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Moves time forward. Time never goes backwards.
    pub fn advance_to(&mut self, time: f64) {
        if time > self.now {
            self.now = time;
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
