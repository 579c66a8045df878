//! Verdicts concluding a test routine
//!
//! A routine never passes by returning normally. It concludes by
//! short-circuiting with a [`Verdict`], usually through the [`pass!`],
//! [`fail!`], [`check!`] and [`pass_iff!`] macros; `Ok(())` means the routine
//! fell through without concluding, which the engine records as a failure.
//!
//! ```
//! use stfu::{check, pass, TestFlow};
//!
//! fn routine() -> TestFlow {
//!     let v = vec![1, 2, 3];
//!     check!(v.len() == 3);
//!     pass!()
//! }
//!
//! assert_eq!(routine(), Err(stfu::Verdict::Pass));
//! ```

/// How a test routine concludes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

/// Return type of a test routine; `Ok(())` is an implicit failure
pub type TestFlow = Result<(), Verdict>;

impl Verdict {
    /// Failure attributed to a source location
    pub fn failed_at(file: &str, line: u32) -> Self {
        Verdict::Fail(format!("FAILED at {file}:{line}"))
    }

    /// Failure of an asserted expression at a source location
    pub fn failed_assert(file: &str, line: u32, expr: &str) -> Self {
        Verdict::Fail(format!("FAILED at {file}:{line}: \"{expr}\""))
    }
}

/// Conclude the test routine with a passing result.
#[macro_export]
macro_rules! pass {
    () => {
        return ::core::result::Result::Err($crate::Verdict::Pass)
    };
}

/// Conclude the test routine with a failing result.
///
/// Without arguments the message names the file and line; with arguments
/// they are formatted like `format!`.
#[macro_export]
macro_rules! fail {
    () => {
        return ::core::result::Result::Err($crate::Verdict::failed_at(
            ::core::file!(),
            ::core::line!(),
        ))
    };
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::Verdict::Fail(::std::format!($($arg)+)))
    };
}

/// Fail the test routine unless the condition holds; otherwise continue.
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !($cond) {
            return ::core::result::Result::Err($crate::Verdict::failed_assert(
                ::core::file!(),
                ::core::line!(),
                ::core::stringify!($cond),
            ));
        }
    };
}

/// Pass the test routine if and only if the condition holds, fail otherwise.
#[macro_export]
macro_rules! pass_iff {
    ($cond:expr) => {
        if $cond {
            $crate::pass!()
        } else {
            $crate::fail!()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fall_through() -> TestFlow {
        Ok(())
    }

    fn asserting(value: i32) -> TestFlow {
        check!(value == 1);
        pass!()
    }

    fn conditional(value: bool) -> TestFlow {
        pass_iff!(value)
    }

    fn formatted() -> TestFlow {
        fail!("expected {} got {}", 1, 2)
    }

    #[test]
    fn test_fall_through_is_not_a_verdict() {
        assert_eq!(fall_through(), Ok(()));
    }

    #[test]
    fn test_check_carries_expression() {
        assert_eq!(asserting(1), Err(Verdict::Pass));
        match asserting(2) {
            Err(Verdict::Fail(message)) => {
                assert!(message.starts_with("FAILED at "));
                assert!(message.contains("verdict.rs:"));
                assert!(message.ends_with(": \"value == 1\""));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_pass_iff() {
        assert_eq!(conditional(true), Err(Verdict::Pass));
        assert!(matches!(conditional(false), Err(Verdict::Fail(m)) if m.contains("verdict.rs:")));
    }

    #[test]
    fn test_formatted_failure() {
        assert_eq!(formatted(), Err(Verdict::Fail("expected 1 got 2".into())));
    }
}
