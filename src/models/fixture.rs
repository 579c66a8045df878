//! Fixture hooks and the phases they run in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Setup/teardown hook run in the parent process; `false` aborts the group
pub type Fixture = Box<dyn Fn() -> bool>;

/// Phase of a group invocation a fixture belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixturePhase {
    BeforeAll,
    BeforeEach,
    AfterAll,
    AfterEach,
}

impl FixturePhase {
    pub fn name(&self) -> &'static str {
        match self {
            FixturePhase::BeforeAll => "before_all",
            FixturePhase::BeforeEach => "before_each",
            FixturePhase::AfterAll => "after_all",
            FixturePhase::AfterEach => "after_each",
        }
    }
}

impl fmt::Display for FixturePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(FixturePhase::BeforeAll.to_string(), "before_all");
        assert_eq!(FixturePhase::BeforeEach.to_string(), "before_each");
        assert_eq!(FixturePhase::AfterAll.to_string(), "after_all");
        assert_eq!(FixturePhase::AfterEach.to_string(), "after_each");
    }
}
