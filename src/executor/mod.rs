//! Test execution engine
//!
//! Runs test routines in isolated child processes and orchestrates groups
//! of them with fixtures.

mod group;
mod isolated;
mod signal;

pub use group::{GroupError, TestGroup};
pub use isolated::{IsolatedTest, Routine};
pub use signal::describe as describe_signal;
