//! Shared utilities
//!
//! Logging setup and runtime measurement.

pub mod logger;
pub mod timer;

pub use logger::{init_logger, LogLevel};
pub use timer::Timer;
