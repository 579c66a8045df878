//! Output formatting module
//!
//! Report stream rendering, summary formats and the word-wrapping writer
//! used for verbose descriptions.

mod formatter;
mod width;

pub use formatter::{
    format_fixture_error, format_result_line, ReportLayout, ReportWriter, SummaryFormat,
};
pub use width::{WidthFormatter, LINE_PREFIX, TAB_WIDTH};
