//! Isolated test execution
//!
//! Every invocation of an [`IsolatedTest`] forks a child that runs the
//! routine and reports its verdict back over a pipe. Running the routine in
//! its own address space contains crashes: a segfault in one test is
//! recorded as that test's outcome instead of taking the suite down.
//!
//! The parent blocks until the child is reaped. There is no timeout, so a
//! routine that never returns blocks the caller forever. The parent only
//! reads the pipe after reaping, so a failure message larger than the pipe
//! capacity blocks the child as well; the protocol truncates messages long
//! before that (see [`crate::protocol`]).

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, pipe, ForkResult, Pid};
use std::fs::File;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

use super::signal;
use crate::models::{Outcome, OutcomeRecord, TestFlow, Verdict};
use crate::protocol;
use crate::utils::Timer;

/// Exit status of a child whose routine fell through without a verdict
const IMPLICIT_FAILURE_STATUS: i32 = 1;

/// Test routine run inside the child process
pub type Routine = Box<dyn Fn() -> TestFlow>;

/// A named test routine executed in a child process
pub struct IsolatedTest {
    name: String,
    description: String,
    enabled: bool,
    routine: Routine,
}

impl IsolatedTest {
    /// Create an enabled test with an empty description
    pub fn new(name: impl Into<String>, routine: impl Fn() -> TestFlow + 'static) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            routine: Box::new(routine),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder form of [`IsolatedTest::set_enable`]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enable(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Run the routine in a child process and record its outcome
    ///
    /// Always returns a record. Disabled tests are skipped without forking;
    /// engine failures (pipe, fork or wait) degrade to a not-run or fail
    /// record and are logged.
    pub fn invoke(&self) -> OutcomeRecord {
        if !self.enabled {
            debug!(test = %self.name, "Skipping disabled test");
            return OutcomeRecord::skipped();
        }

        let (read_end, write_end) = match pipe() {
            Ok(ends) => ends,
            Err(e) => {
                error!(test = %self.name, "Failed to create result channel: {e}");
                return OutcomeRecord::default();
            }
        };

        let timer = Timer::start(&self.name);

        // SAFETY: the child only runs the routine, writes to the pipe and
        // leaves through `_exit` without returning into the caller.
        let record = match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                drop(read_end);
                self.run_child(File::from(write_end))
            }
            Ok(ForkResult::Parent { child }) => {
                drop(write_end);
                self.reap(child, File::from(read_end))
            }
            Err(e) => {
                error!(test = %self.name, "Failed to fork test process: {e}");
                OutcomeRecord::default()
            }
        };

        let record = record.with_runtime(timer.stop());
        debug!(test = %self.name, outcome = record.outcome().token(), "Test finished");
        record
    }

    fn run_child(&self, channel: File) -> ! {
        let status = match panic::catch_unwind(AssertUnwindSafe(|| (self.routine)())) {
            Ok(Err(Verdict::Pass)) => conclude(channel, Outcome::Pass, ""),
            Ok(Err(Verdict::Fail(message))) => conclude(channel, Outcome::Fail, &message),
            Ok(Ok(())) => {
                drop(channel);
                IMPLICIT_FAILURE_STATUS
            }
            Err(_) => std::process::abort(),
        };

        // SAFETY: `_exit` skips atexit handlers and destructors inherited
        // from the parent, which must only run once, in the parent.
        unsafe { nix::libc::_exit(status) }
    }

    fn reap(&self, child: Pid, channel: File) -> OutcomeRecord {
        let status = loop {
            match waitpid(child, None) {
                Err(Errno::EINTR) => continue,
                other => break other,
            }
        };

        match status {
            Ok(WaitStatus::Exited(_, 0)) => protocol::read_result(channel),
            Ok(WaitStatus::Exited(_, code)) => {
                debug!(test = %self.name, code, "Routine returned without a verdict");
                OutcomeRecord::new(Outcome::Fail)
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => OutcomeRecord::new(Outcome::Crash)
                .with_message(format!("crashed with: {}", signal::describe(sig))),
            Ok(other) => {
                error!(test = %self.name, "Unexpected child status: {other:?}");
                OutcomeRecord::new(Outcome::Fail)
            }
            Err(e) => {
                error!(test = %self.name, "Unable to reap test process {child}: {e}");
                OutcomeRecord::new(Outcome::Fail)
            }
        }
    }
}

impl std::fmt::Debug for IsolatedTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsolatedTest")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Write the verdict and close the channel; the status is 0 even when the
/// write fails so the parent reports a protocol failure
fn conclude(channel: File, outcome: Outcome, message: &str) -> i32 {
    let _ = protocol::write_result(channel, outcome, message);
    0
}
