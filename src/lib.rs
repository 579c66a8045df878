//! stfu - isolated unit-test engine
//!
//! A minimal unit-test engine that runs every test routine in its own child
//! process, so that a crash is recorded as an outcome rather than ending the
//! run, and no routine can pass without saying so.
//!
//! ## Features
//!
//! - Process-per-test isolation with signal-based crash detection
//! - Explicit verdicts: a routine that never calls [`pass!`] fails
//! - Groups with before/after fixtures, run strictly in order
//! - Line-oriented report stream meant for scripts and build tools
//!
//! ## Usage
//!
//! ```no_run
//! use stfu::{check, pass, IsolatedTest, TestGroup};
//!
//! let mut group = TestGroup::new("math", "Arithmetic checks");
//! group
//!     .add_test(IsolatedTest::new("addition", || {
//!         check!(1 + 1 == 2);
//!         pass!()
//!     }))
//!     .add_before_each(|| true);
//!
//! let summary = group.invoke(&mut std::io::stdout());
//! std::process::exit(summary.exit_code());
//! ```

pub mod config;
pub mod executor;
pub mod models;
pub mod output;
pub mod protocol;
pub mod utils;

pub use executor::{GroupError, IsolatedTest, TestGroup};
pub use models::{
    Fixture, FixturePhase, GroupSummary, Outcome, OutcomeRecord, TestFlow, Verdict,
};
pub use output::{ReportLayout, SummaryFormat, WidthFormatter};
