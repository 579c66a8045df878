//! Demonstration group covering every kind of outcome

use std::time::Duration;

use stfu::{check, fail, pass, pass_iff, IsolatedTest, TestGroup};

/// Build the demonstration group
pub fn examples() -> TestGroup {
    let mut group = TestGroup::new(
        "examples",
        "Examples of various uses and failure conditions.",
    );
    group
        .add_test(
            IsolatedTest::new("explicit failure", || fail!()).with_description(
                "Demonstration of an explicit failure by calling fail!(). The output will \
                 include the filename and line number where the failure occurred.",
            ),
        )
        .add_test(
            IsolatedTest::new("implicit failure", || Ok(())).with_description(
                "Demonstration of an implicit failure, where no code actually runs. This is \
                 considered a failure, as implicitly successful test runs are prohibited - a \
                 test can only pass if it explicitly calls pass!() or pass_iff!().\n\n\
                 Note that no location information is provided in this case.",
            ),
        )
        .add_test(
            IsolatedTest::new("skipped test", || Ok(()))
                .with_description(
                    "Demonstration of a test that is skipped because it's disabled. This is \
                     useful for temporarily turning off tests without removing them from the \
                     test run output.",
                )
                .with_enabled(false),
        )
        .add_test(
            IsolatedTest::new("slow test", || {
                std::thread::sleep(Duration::from_secs(1));
                pass!()
            })
            .with_description(
                "Demonstration of a test that takes slightly longer to run. Use this to \
                 compare the runtime reported for a test vs. those that complete without delay.",
            ),
        )
        .add_test(
            IsolatedTest::new("pass iff", || pass_iff!(1 == 0)).with_description(
                "Demonstration of the pass_iff!() macro, which will immediately pass the test \
                 if and only if the expression is true. Otherwise, it fails immediately.",
            ),
        )
        .add_test(
            IsolatedTest::new("assertion", || {
                check!(0 == 1);
                pass!()
            })
            .with_description(
                "Demonstration of the case of a failed assertion via check!(0 == 1). In \
                 addition to the filename and line number, it will also include the \
                 expression which failed to evaluate to true.",
            ),
        )
        .add_test(
            IsolatedTest::new("segfault condition", || {
                let address = 0x10usize as *const u32;
                // SAFETY: not safe; the read is meant to fault.
                let value = unsafe { std::ptr::read_volatile(address) };
                check!(0xdead == value);
                pass!()
            })
            .with_description(
                "Demonstration of how an invalid memory access which leads to a segmentation \
                 fault will appear as a test crash.",
            ),
        )
        .add_test(
            IsolatedTest::new("panic", || panic!("routine panicked")).with_description(
                "Demonstration of a panicking routine. The panic cannot unwind out of the \
                 test process, so it aborts and is reported as a crash.",
            ),
        )
        .set_verbose(true);
    group
}
