//! Data models for isolated test execution
//!
//! This module contains the outcome vocabulary, the per-invocation record,
//! the group summary and the verdict a test routine concludes with.

mod fixture;
mod outcome;
mod summary;
mod verdict;

pub use fixture::{Fixture, FixturePhase};
pub use outcome::{Outcome, OutcomeRecord};
pub use summary::GroupSummary;
pub use verdict::{TestFlow, Verdict};
