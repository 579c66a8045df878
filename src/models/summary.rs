//! Group summary model
//!
//! Tallies the outcomes produced during one invocation of a test group.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FixturePhase, Outcome};

/// Outcome counts for one group invocation
///
/// The five counts always add up to the number of tests in the group: tests
/// that were never reached because a fixture failed are counted as not run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: String,
    pub not_run: usize,
    pub skipped: usize,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
    /// Fixture phase that aborted the invocation, if any
    pub aborted_in: Option<FixturePhase>,
}

impl GroupSummary {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    /// Classify one outcome into the running tally
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::NotRun => self.not_run += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::Crash => self.crashed += 1,
        }
    }

    /// Mark the invocation as aborted; tests not yet tallied become not run
    pub fn abort(&mut self, phase: FixturePhase, group_size: usize) {
        self.not_run += group_size.saturating_sub(self.total());
        self.aborted_in = Some(phase);
    }

    pub fn total(&self) -> usize {
        self.not_run + self.skipped + self.passed + self.failed + self.crashed
    }

    /// Tests that did not run, failed or crashed
    pub fn failures(&self) -> usize {
        self.not_run + self.failed + self.crashed
    }

    /// Process exit status for callers: failed plus crashed, 0 when clean
    pub fn exit_code(&self) -> i32 {
        i32::try_from(self.failed + self.crashed).unwrap_or(i32::MAX)
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0 && self.aborted_in.is_none()
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Total: {} | Pass: {} | Fail: {} | Crash: {} | Skip: {} | Not run: {}",
            self.group,
            self.total(),
            self.passed,
            self.failed,
            self.crashed,
            self.skipped,
            self.not_run
        )?;
        if let Some(phase) = self.aborted_in {
            write!(f, " | Aborted in: {phase}")?;
        }
        Ok(())
    }
}
