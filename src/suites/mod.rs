//! Test groups shipped with the binary
//!
//! ### Self-tests
//! Exercise the public API of the engine through the engine itself; all are
//! expected to pass.
//!
//! ### Examples
//! Demonstrate how each kind of outcome shows up in the report.

mod examples;
mod unit;

pub use examples::examples;
pub use unit::unit_tests;
