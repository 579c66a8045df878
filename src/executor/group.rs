//! Test group orchestration
//!
//! Sequences fixtures and isolated tests, tallies their outcomes and streams
//! the report.

use std::io::Write;
use thiserror::Error;
use tracing::info;

use super::isolated::IsolatedTest;
use crate::models::{Fixture, FixturePhase, GroupSummary};
use crate::output::{ReportLayout, ReportWriter};

/// Errors that cut a group invocation short
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    #[error("failure in fixture: {0}")]
    Fixture(FixturePhase),
}

/// Ordered collection of tests sharing fixtures and a report
///
/// Fixtures run in the calling process, not in the isolated child, so a
/// fixture that crashes takes the whole run down with it. Keep them to setup
/// and teardown.
pub struct TestGroup {
    name: String,
    description: String,
    verbose: bool,
    layout: ReportLayout,
    tests: Vec<IsolatedTest>,
    before_all: Vec<Fixture>,
    before_each: Vec<Fixture>,
    after_all: Vec<Fixture>,
    after_each: Vec<Fixture>,
}

impl TestGroup {
    /// Create an empty, verbose group
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            verbose: true,
            layout: ReportLayout::default(),
            tests: Vec::new(),
            before_all: Vec::new(),
            before_each: Vec::new(),
            after_all: Vec::new(),
            after_each: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn tests(&self) -> &[IsolatedTest] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    pub fn set_layout(&mut self, layout: ReportLayout) -> &mut Self {
        self.layout = layout;
        self
    }

    pub fn add_test(&mut self, test: IsolatedTest) -> &mut Self {
        self.tests.push(test);
        self
    }

    pub fn add_before_all(&mut self, fixture: impl Fn() -> bool + 'static) -> &mut Self {
        self.before_all.push(Box::new(fixture));
        self
    }

    pub fn add_before_each(&mut self, fixture: impl Fn() -> bool + 'static) -> &mut Self {
        self.before_each.push(Box::new(fixture));
        self
    }

    pub fn add_after_all(&mut self, fixture: impl Fn() -> bool + 'static) -> &mut Self {
        self.after_all.push(Box::new(fixture));
        self
    }

    pub fn add_after_each(&mut self, fixture: impl Fn() -> bool + 'static) -> &mut Self {
        self.after_each.push(Box::new(fixture));
        self
    }

    /// Run every test in order and write the report to `out`
    ///
    /// Never fails. A fixture returning `false` aborts the rest of the group
    /// and is reported on its own line; tests not reported count as not run.
    /// The verbose footer counts only the tests that were reported.
    pub fn invoke(&self, out: &mut dyn Write) -> GroupSummary {
        info!(group = %self.name, tests = self.tests.len(), "Running test group");

        let mut report = ReportWriter::new(out, self.layout);
        let mut summary = GroupSummary::new(&self.name);

        if self.verbose {
            report.header(&self.name, self.tests.len(), &self.description);
        }

        let outcome = self.run(&mut report, &mut summary);
        let reported_failures = summary.failures();

        if let Err(GroupError::Fixture(phase)) = outcome {
            info!(group = %self.name, %phase, "Fixture failed, aborting group");
            summary.abort(phase, self.tests.len());
            report.fixture_error(phase);
        }

        if self.verbose {
            report.footer(&self.name, reported_failures);
        }

        info!(
            group = %self.name,
            passed = summary.passed,
            failures = summary.failures(),
            "Test group completed"
        );

        summary
    }

    fn run(&self, report: &mut ReportWriter<'_>, summary: &mut GroupSummary) -> Result<(), GroupError> {
        run_fixtures(&self.before_all, FixturePhase::BeforeAll)?;

        for test in &self.tests {
            run_fixtures(&self.before_each, FixturePhase::BeforeEach)?;

            let record = test.invoke();
            run_fixtures(&self.after_each, FixturePhase::AfterEach)?;

            summary.record(record.outcome());

            if self.verbose {
                report.description(test.name(), test.description());
            }

            report.result(test.name(), &record);

            if self.verbose {
                report.blank();
            }
        }

        run_fixtures(&self.after_all, FixturePhase::AfterAll)
    }
}

/// Run fixtures in order, stopping at the first failure
fn run_fixtures(fixtures: &[Fixture], phase: FixturePhase) -> Result<(), GroupError> {
    if fixtures.iter().all(|fixture| fixture()) {
        Ok(())
    } else {
        Err(GroupError::Fixture(phase))
    }
}
