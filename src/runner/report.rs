//! Run report and exit status.

use crate::error::BootstrapError;
use crate::requirements::{DependencyResult, RunOutcome};

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per dependency reached, in resolution order.
    pub results: Vec<DependencyResult>,
    /// The error that halted the run, if any.
    pub failure: Option<BootstrapError>,
}

impl RunReport {
    /// True when every dependency reached a non-failed state.
    pub fn success(&self) -> bool {
        self.failure.is_none() && self.results.iter().all(|r| r.outcome.is_success())
    }

    /// Process exit code: 0 when the toolchain is ready, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// Outcome recorded for a dependency, by display name.
    pub fn outcome_for(&self, dependency: &str) -> Option<RunOutcome> {
        self.results
            .iter()
            .find(|r| r.dependency == dependency)
            .map(|r| r.outcome)
    }

    /// Dependency the run halted at, if it halted on one.
    pub fn failed_dependency(&self) -> Option<&str> {
        self.failure.as_ref().and_then(BootstrapError::dependency)
    }
}
