//! End-to-end checks of the report stream through the public API

use stfu::{check, fail, pass, FixturePhase, IsolatedTest, Outcome, TestGroup};

fn run(group: &TestGroup) -> (stfu::GroupSummary, String) {
    let mut out = Vec::new();
    let summary = group.invoke(&mut out);
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn explicit_fail_reports_location() {
    let mut group = TestGroup::new("scenario", "");
    group
        .add_test(IsolatedTest::new("explicit failure", || fail!()))
        .set_verbose(false);

    let (summary, output) = run(&group);
    let expected_location = format!(" at {}:", file!());

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
    assert!(output.starts_with("explicit failure    \x07FAIL (FAILED at "));
    assert!(output.contains(&expected_location));
    assert!(output.trim_end().ends_with('s'));
}

#[test]
fn mixed_group_tallies_every_outcome() {
    let mut group = TestGroup::new("mixed", "All outcomes");
    group
        .add_test(IsolatedTest::new("passes", || pass!()))
        .add_test(IsolatedTest::new("asserts", || {
            check!(2 + 2 == 5);
            pass!()
        }))
        .add_test(IsolatedTest::new("implicit", || Ok(())))
        .add_test(IsolatedTest::new("aborts", || std::process::abort()))
        .add_test(IsolatedTest::new("disabled", || pass!()).with_enabled(false))
        .set_verbose(false);

    let (summary, output) = run(&group);

    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.crashed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.not_run, 0);
    assert_eq!(summary.total(), 5);
    assert_eq!(summary.exit_code(), 3);

    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("passes              PASS - in "));
    assert!(lines[1].contains("\x07FAIL (FAILED at "));
    assert!(lines[1].contains(": \"2 + 2 == 5\")"));
    assert!(lines[2].starts_with("implicit            \x07FAIL - in "));
    assert!(lines[3].starts_with("aborts              \x07CRASH (crashed with: Aborted) - in "));
    assert!(lines[4].starts_with("disabled            SKIPPED - in 0.000000s"));
}

#[test]
fn verbose_report_wraps_descriptions() {
    let description = "word ".repeat(30);
    let mut group = TestGroup::new("verbose", "Wrapping");
    group.add_test(IsolatedTest::new("wordy", || pass!()).with_description(description.trim_end()));

    let (summary, output) = run(&group);
    assert_eq!(summary.failures(), 0);

    let wrapped: Vec<_> = output
        .lines()
        .filter(|line| line.starts_with("#   word"))
        .collect();
    assert!(wrapped.len() >= 2);
    for line in &wrapped {
        assert!(line.len() <= "#   ".len() + 75);
    }
    assert!(output.ends_with("# Summary: verbose completed with 0 failures\n"));
}

#[test]
fn before_all_failure_runs_nothing() {
    let mut group = TestGroup::new("broken setup", "");
    group
        .add_test(IsolatedTest::new("one", || pass!()))
        .add_test(IsolatedTest::new("two", || pass!()))
        .add_test(IsolatedTest::new("three", || pass!()))
        .add_before_all(|| false);

    let (summary, output) = run(&group);

    assert_eq!(summary.not_run, 3);
    assert_eq!(summary.aborted_in, Some(FixturePhase::BeforeAll));
    assert_eq!(
        output.matches("# ERROR - failure in fixture: before_all").count(),
        1
    );
    assert!(!output.contains("PASS"));
    assert!(output.ends_with("# Summary: broken setup completed with 0 failures\n"));
}

#[test]
fn crash_in_one_test_does_not_stop_the_group() {
    let mut group = TestGroup::new("contained", "");
    group
        .add_test(IsolatedTest::new("crashes", || {
            let address = 0x10usize as *const u32;
            // Deliberately faults inside the child.
            let _ = unsafe { std::ptr::read_volatile(address) };
            pass!()
        }))
        .add_test(IsolatedTest::new("survives", || pass!()))
        .set_verbose(false);

    let (summary, _) = run(&group);
    assert_eq!(summary.crashed, 1);
    assert_eq!(summary.passed, 1);

    let record = group.tests()[0].invoke();
    assert_eq!(record.outcome(), Outcome::Crash);
    assert!(!record.message().is_empty());
}
