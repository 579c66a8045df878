//! Report formatting
//!
//! Renders the line-oriented report stream of a group invocation and the
//! summary printed after a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::warn;

use super::width::WidthFormatter;
use crate::models::{FixturePhase, GroupSummary, OutcomeRecord};

/// Column layout of the report stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Width the test name is left-justified to
    pub name_width: usize,

    /// Wrap column for verbose descriptions
    pub wrap_width: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            name_width: 20,
            wrap_width: 75,
        }
    }
}

/// Render one report line, without the trailing newline
pub fn format_result_line(name: &str, record: &OutcomeRecord, name_width: usize) -> String {
    format!(
        "{name:<name_width$}{record} - in {:.6}s",
        record.runtime().as_secs_f64()
    )
}

/// Render the line reporting an aborting fixture
pub fn format_fixture_error(phase: FixturePhase) -> String {
    format!("# ERROR - failure in fixture: {phase}")
}

/// Writes the report stream of one group invocation
///
/// A failing sink is logged once; the rest of the report is dropped while
/// the invocation itself carries on.
pub struct ReportWriter<'a> {
    out: &'a mut dyn Write,
    layout: ReportLayout,
    broken: bool,
}

impl<'a> ReportWriter<'a> {
    pub fn new(out: &'a mut dyn Write, layout: ReportLayout) -> Self {
        Self {
            out,
            layout,
            broken: false,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn header(&mut self, group: &str, tests: usize, description: &str) {
        self.emit(format_args!(
            "#\n# Running {tests} test(s) in group: {group}\n#\n# {description}\n#\n"
        ));
    }

    pub fn description(&mut self, name: &str, description: &str) {
        self.emit(format_args!("# {name}: \n"));
        if self.broken {
            return;
        }

        let written = {
            let mut wrapped = WidthFormatter::new(&mut *self.out, self.layout.wrap_width);
            write!(wrapped, "{description}\n\n")
        };
        if let Err(e) = written {
            self.fail(e);
        }
    }

    pub fn result(&mut self, name: &str, record: &OutcomeRecord) {
        let line = format_result_line(name, record, self.layout.name_width);
        self.emit(format_args!("{line}\n"));
    }

    pub fn blank(&mut self) {
        self.emit(format_args!("\n"));
    }

    pub fn fixture_error(&mut self, phase: FixturePhase) {
        let line = format_fixture_error(phase);
        self.emit(format_args!("{line}\n"));
    }

    pub fn footer(&mut self, group: &str, failures: usize) {
        let noun = if failures == 1 { "failure" } else { "failures" };
        self.emit(format_args!(
            "# Summary: {group} completed with {failures} {noun}\n"
        ));
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            self.fail(e);
        }
    }

    fn fail(&mut self, error: std::io::Error) {
        warn!("Report sink failed, dropping remaining output: {error}");
        self.broken = true;
    }
}

/// Output format of the post-run summary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    Text,
    Json,
    #[serde(rename = "json-pretty", alias = "jsonpretty")]
    JsonPretty,
}

impl SummaryFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(SummaryFormat::Text),
            "json" => Some(SummaryFormat::Json),
            "json-pretty" | "jsonpretty" => Some(SummaryFormat::JsonPretty),
            _ => None,
        }
    }

    /// Format a group summary
    pub fn format(&self, summary: &GroupSummary) -> String {
        match self {
            SummaryFormat::Text => format!("# {summary}"),
            SummaryFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            SummaryFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
        }
    }
}
