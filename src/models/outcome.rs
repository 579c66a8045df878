//! Outcome models for isolated test invocations
//!
//! Defines the outcome vocabulary and the record produced by every
//! invocation of a test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Alert control character preceding non-passing report tokens
pub const ALERT: char = '\x07';

/// Classification of a single test invocation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    NotRun,
    Skipped,
    Pass,
    Fail,
    Crash,
}

impl Outcome {
    /// Report token, as consumed by scripts reading the report stream
    pub fn token(&self) -> &'static str {
        match self {
            Outcome::NotRun => "DIDNT_RUN",
            Outcome::Skipped => "SKIPPED",
            Outcome::Pass => "PASS",
            Outcome::Fail => "FAIL",
            Outcome::Crash => "CRASH",
        }
    }

    /// Counts against the group's failure tally
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::NotRun | Outcome::Fail | Outcome::Crash)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_failure() {
            write!(f, "{ALERT}")?;
        }
        f.write_str(self.token())
    }
}

/// Result of a single test invocation
///
/// Records are built by the engine and handed out by value; there are no
/// setters, only consuming builders used while the record is assembled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    outcome: Outcome,
    message: String,
    #[serde(with = "runtime_secs")]
    runtime: Duration,
}

impl OutcomeRecord {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            ..Self::default()
        }
    }

    pub fn skipped() -> Self {
        Self::new(Outcome::Skipped)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_runtime(mut self, runtime: Duration) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn runtime(&self) -> Duration {
        self.runtime
    }
}

impl fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if !self.message.is_empty() {
            write!(f, " ({})", self.message)?;
        }
        Ok(())
    }
}

/// Runtime serialized as fractional seconds
mod runtime_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(runtime: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(runtime.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_did_not_run() {
        let record = OutcomeRecord::default();
        assert_eq!(record.outcome(), Outcome::NotRun);
        assert!(record.message().is_empty());
        assert_eq!(record.runtime(), Duration::ZERO);
    }

    #[test]
    fn test_alert_markers() {
        assert_eq!(Outcome::Pass.to_string(), "PASS");
        assert_eq!(Outcome::Skipped.to_string(), "SKIPPED");
        assert_eq!(Outcome::Fail.to_string(), "\x07FAIL");
        assert_eq!(Outcome::Crash.to_string(), "\x07CRASH");
        assert_eq!(Outcome::NotRun.to_string(), "\x07DIDNT_RUN");
    }

    #[test]
    fn test_record_display() {
        let record = OutcomeRecord::new(Outcome::Fail).with_message("FAILED at a.rs:3");
        assert_eq!(record.to_string(), "\x07FAIL (FAILED at a.rs:3)");
        assert_eq!(OutcomeRecord::new(Outcome::Pass).to_string(), "PASS");
    }

    #[test]
    fn test_record_json_runtime_in_seconds() {
        let record = OutcomeRecord::new(Outcome::Pass).with_runtime(Duration::from_millis(1500));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"], "pass");
        assert_eq!(json["runtime"], 1.5);

        let back: OutcomeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_failure_classification() {
        let failures: Vec<_> = [
            Outcome::NotRun,
            Outcome::Skipped,
            Outcome::Pass,
            Outcome::Fail,
            Outcome::Crash,
        ]
        .into_iter()
        .filter(Outcome::is_failure)
        .collect();
        assert_eq!(failures, vec![Outcome::NotRun, Outcome::Fail, Outcome::Crash]);
    }
}
