//! Self-tests of the engine's public API

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use stfu::protocol;
use stfu::TestFlow;
use stfu::{
    check, fail, pass, pass_iff, IsolatedTest, Outcome, OutcomeRecord, TestGroup, WidthFormatter,
};

/// Build the self-test group
pub fn unit_tests() -> TestGroup {
    let mut group = TestGroup::new("unit tests", "Self-tests of the stfu public API.");
    group
        .add_test(default_result())
        .add_test(default_values())
        .add_test(enable_disable())
        .add_test(basic_skipped())
        .add_test(basic_pass())
        .add_test(basic_fail())
        .add_test(basic_crash())
        .add_test(name_test())
        .add_test(description_test())
        .add_test(
            IsolatedTest::new("anonymous test", || pass!())
                .with_description("Anonymously defined test"),
        )
        .add_test(failure_location())
        .add_test(fixtures())
        .add_test(fixtures_errors())
        .add_test(protocol_round_trip())
        .add_test(word_wrap())
        .set_verbose(false);
    group
}

fn default_result() -> IsolatedTest {
    IsolatedTest::new("default result", || {
        pass_iff!(OutcomeRecord::default().outcome() == Outcome::NotRun)
    })
    .with_description("Verify that the default outcome of a record is DIDNT_RUN.")
}

fn default_values() -> IsolatedTest {
    IsolatedTest::new("default values", || {
        pass_iff!(IsolatedTest::new("", || Ok(())).is_enabled())
    })
    .with_description("Verify that tests are enabled by default.")
}

fn enable_disable() -> IsolatedTest {
    IsolatedTest::new("enable/disable", || {
        let mut t = IsolatedTest::new("", || Ok(()));

        check!(t.is_enabled());
        check!(!t.set_enable(false).is_enabled());
        check!(t.set_enable(true).is_enabled());

        pass!()
    })
    .with_description("Verify the ability to enable and disable tests.")
}

fn basic_skipped() -> IsolatedTest {
    IsolatedTest::new("basic skipped", || {
        let t = IsolatedTest::new("", || Ok(())).with_enabled(false);

        pass_iff!(t.invoke().outcome() == Outcome::Skipped)
    })
    .with_description("Verify that disabling a test causes it to be skipped.")
}

fn basic_pass() -> IsolatedTest {
    IsolatedTest::new("basic pass", || {
        let t = IsolatedTest::new("", || pass!());

        pass_iff!(t.invoke().outcome() == Outcome::Pass)
    })
    .with_description("Verify a simple passing test result.")
}

fn basic_fail() -> IsolatedTest {
    IsolatedTest::new("basic fail", || {
        let r = IsolatedTest::new("", || Ok(())).invoke();

        pass_iff!(r.outcome() == Outcome::Fail && r.message().is_empty())
    })
    .with_description("Verify a simple failing test result.")
}

fn basic_crash() -> IsolatedTest {
    IsolatedTest::new("basic crash", || {
        let t = IsolatedTest::new("", || {
            let address = 0x10usize as *const u32;
            // SAFETY: not safe; the read is meant to fault.
            let _ = unsafe { std::ptr::read_volatile(address) };
            Ok(())
        });
        let r = t.invoke();

        check!(!r.message().is_empty());
        pass_iff!(r.outcome() == Outcome::Crash)
    })
    .with_description(
        "Verify a simple crashing test result. For this test we will force a \
         segmentation violation with an invalid memory access.",
    )
}

fn name_test() -> IsolatedTest {
    IsolatedTest::new("test name", || {
        let t = IsolatedTest::new("SomeValue", || Ok(()));

        pass_iff!(t.name() == "SomeValue" && t.name() != "WrongValue")
    })
    .with_description("Verify that test name can be set.")
}

fn description_test() -> IsolatedTest {
    IsolatedTest::new("test description", || {
        let t = IsolatedTest::new("", || Ok(())).with_description("My Value");

        pass_iff!(t.description() == "My Value" && t.description() != "WrongValue")
    })
    .with_description("Verify that test description can be set.")
}

fn failure_location() -> IsolatedTest {
    IsolatedTest::new("failure location", || {
        let r = IsolatedTest::new("", || fail!()).invoke();

        check!(r.outcome() == Outcome::Fail);
        pass_iff!(r.message().contains(file!()))
    })
    .with_description("Verify that an explicit failure names the file and line it came from.")
}

fn fixtures() -> IsolatedTest {
    IsolatedTest::new("fixtures count", || {
        let fixture_in = Rc::new(Cell::new(0usize));
        let fixture_out = Rc::new(Cell::new(0usize));

        let mut nested = TestGroup::new("nested", "nested tests");
        nested
            .add_test(IsolatedTest::new("(fixtures 1...)", expect_counts(&fixture_in, &fixture_out, 2, 0)))
            .add_test(IsolatedTest::new("(fixtures 2...)", expect_counts(&fixture_in, &fixture_out, 3, 1)))
            .add_test(IsolatedTest::new("(fixtures 3...)", expect_counts(&fixture_in, &fixture_out, 4, 2)))
            .add_before_all(bump(&fixture_in))
            .add_before_each(bump(&fixture_in))
            .add_after_all(bump(&fixture_out))
            .add_after_each(bump(&fixture_out))
            .set_verbose(false);

        let mut output = Vec::new();
        let summary = nested.invoke(&mut output);
        let output = String::from_utf8_lossy(&output);

        check!(summary.not_run == 0);
        check!(summary.skipped == 0);
        check!(summary.passed == 3);
        check!(summary.failed == 0);
        check!(summary.crashed == 0);
        check!(fixture_in.get() == 4 && fixture_out.get() == 4);
        pass_iff!(output.matches("PASS").count() == 3)
    })
    .with_description("Verify that fixtures fire when they should.")
}

/// Routine passing iff the fixture counters hold the expected values
fn expect_counts(
    fixture_in: &Rc<Cell<usize>>,
    fixture_out: &Rc<Cell<usize>>,
    ins: usize,
    outs: usize,
) -> impl Fn() -> TestFlow {
    let (fixture_in, fixture_out) = (Rc::clone(fixture_in), Rc::clone(fixture_out));
    move || pass_iff!(fixture_in.get() == ins && fixture_out.get() == outs)
}

/// Fixture bumping a counter
fn bump(counter: &Rc<Cell<usize>>) -> impl Fn() -> bool {
    let counter = Rc::clone(counter);
    move || {
        counter.set(counter.get() + 1);
        true
    }
}

fn fixtures_errors() -> IsolatedTest {
    IsolatedTest::new("fixtures errors", || {
        let mut nested = TestGroup::new("nested", "nested tests");
        nested
            .add_test(IsolatedTest::new("(fixtures)", || fail!()))
            .add_before_all(|| false)
            .set_verbose(false);

        let mut output = Vec::new();
        let summary = nested.invoke(&mut output);

        check!(summary.not_run == 1);
        check!(summary.skipped == 0);
        check!(summary.passed == 0);
        check!(summary.failed == 0);
        check!(summary.crashed == 0);
        pass_iff!(output == b"# ERROR - failure in fixture: before_all\n")
    })
    .with_description("Verify behavior of exceptional fixtures.")
}

fn protocol_round_trip() -> IsolatedTest {
    IsolatedTest::new("protocol", || {
        let passed = protocol::decode(&protocol::encode(Outcome::Pass, ""));
        check!(passed.outcome() == Outcome::Pass && passed.message().is_empty());

        let failed = protocol::decode(&protocol::encode(Outcome::Fail, "boom"));
        pass_iff!(failed.outcome() == Outcome::Fail && failed.message() == "boom")
    })
    .with_description("Verify that results survive the trip through the result channel.")
}

fn word_wrap() -> IsolatedTest {
    IsolatedTest::new("word wrap", || {
        let mut wrapped = WidthFormatter::new(Vec::new(), 10);
        check!(wrapped.write_all(b"hello world abcdefghijklmno\n").is_ok());

        let output = wrapped.into_inner();
        pass_iff!(output == b"#   hello\n#   world\n#   abcdefghij\n#   klmno\n")
    })
    .with_description(
        "Verify that descriptions wrap at the last space before the width, \
         and that words longer than the width are broken at the width.",
    )
}
