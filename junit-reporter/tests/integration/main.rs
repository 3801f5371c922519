// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives whole runs through the listener interface and checks the written reports.

mod fixtures;

use camino_tempfile::tempdir;
use fixtures::*;
use indoc::indoc;
use junit_reporter::{
    config::{EnvSnapshot, ReporterOptions},
    reporter::{
        RunListener,
        events::{RunEvent, RunStats, SuiteRef},
    },
};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn standard_report() {
    let dir = tempdir().expect("tempdir created");
    let output_path = dir.path().join("test-results.xml");
    let mut reporter = reporter(&output_path, ReporterOptions::default(), &EnvSnapshot::new());

    let root = SuiteRef::root();
    let foo_bar = SuiteRef::new("Foo Bar");
    let another = SuiteRef::new("Another suite!");

    reporter.on_run_start().expect("run started");
    // The root suite has no direct tests, so it's left out.
    reporter.on_suite_start(&root_suite(0)).expect("suite started");
    reporter
        .on_suite_start(&suite("Foo Bar", &[root.clone()], 2))
        .expect("suite started");
    reporter
        .on_test_pass(&test(
            "can weez the juice",
            &[root.clone(), foo_bar.clone()],
            Some(101.0),
        ))
        .expect("test passed");
    reporter
        .on_test_fail(
            &test(
                "can narfle the garthog",
                &[root.clone(), foo_bar.clone()],
                Some(2002.0),
            ),
            &error(
                "expected garthog to be dead",
                "Error",
                "this is where the stack would be",
            ),
        )
        .expect("test failed");
    reporter
        .on_suite_start(&suite("Another suite!", &[root.clone()], 1))
        .expect("suite started");
    reporter
        .on_test_pass(&test("works", &[root, another], Some(400_004.0)))
        .expect("test passed");

    let finished = reporter
        .on_run_end(&RunStats {
            failures: 1,
            ..RunStats::default()
        })
        .expect("run ended");

    let expected = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <testsuites name="Mocha Tests" time="402.1070" tests="3" failures="1">
          <testsuite name="Foo Bar" timestamp="2024-01-02T03:04:05" tests="2" failures="1" time="2.1030">
            <testcase name="Foo Bar can weez the juice" time="0.1010" classname="can weez the juice"/>
            <testcase name="Foo Bar can narfle the garthog" time="2.0020" classname="can narfle the garthog">
              <failure message="expected garthog to be dead" type="Error"><![CDATA[this is where the stack would be]]></failure>
            </testcase>
          </testsuite>
          <testsuite name="Another suite!" timestamp="2024-01-02T03:04:05" tests="1" failures="0" time="400.0040">
            <testcase name="Another suite! works" time="400.0040" classname="works"/>
          </testsuite>
        </testsuites>
    "#};
    assert_eq!(finished.document, expected);
    assert_eq!(finished.path.as_deref(), Some(output_path.as_path()));
    assert_eq!(
        std::fs::read_to_string(&output_path).expect("report read"),
        expected
    );
}

#[test]
fn jenkins_report() {
    let dir = tempdir().expect("tempdir created");
    let output_path = dir.path().join("jenkins.xml");
    let options = ReporterOptions {
        jenkins_mode: Some(true),
        ..Default::default()
    };
    let mut reporter = reporter(&output_path, options, &EnvSnapshot::new());

    let inner = SuiteRef::new("Inner Suite");
    let another = SuiteRef::new("Another Suite");

    reporter.on_run_start().expect("run started");
    reporter
        .on_suite_start(&suite("Inner Suite", &[], 0))
        .expect("suite started");
    reporter
        .on_suite_start(&suite("Another Suite", &[inner.clone()], 1))
        .expect("suite started");
    reporter
        .on_test_pass(&test("works", &[inner, another], Some(5.0)))
        .expect("test passed");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");

    assert_eq!(
        finished.document,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites name="Mocha Tests" time="0.0050" tests="1" failures="0">
              <testsuite name="Inner Suite.Another Suite" timestamp="2024-01-02T03:04:05" tests="1" failures="0" time="0.0050">
                <testcase classname="Inner Suite.Another Suite" time="0.0050" name="works"/>
              </testsuite>
            </testsuites>
        "#}
    );
}

#[test]
fn ant_report_with_pending_tests() {
    let dir = tempdir().expect("tempdir created");
    let output_path = dir.path().join("ant.xml");
    let options = ReporterOptions {
        ant_mode: Some(true),
        include_pending: Some(true),
        ..Default::default()
    };
    let env: EnvSnapshot = [("PROPERTIES", "build:42"), ("HOSTNAME", "ci-host")]
        .into_iter()
        .collect();
    let mut reporter = reporter(&output_path, options, &env);

    let root = SuiteRef::root();
    let pending = SuiteRef::new("Pending suite!");

    reporter.on_run_start().expect("run started");
    reporter.on_suite_start(&root_suite(1)).expect("suite started");
    reporter
        .on_test_pass(&test("root test", &[root.clone()], Some(10.0)))
        .expect("test passed");
    reporter
        .on_suite_start(&suite("Pending suite!", &[root.clone()], 1))
        .expect("suite started");
    reporter
        .on_test_pending(&test("pending", &[root, pending], None))
        .expect("test pending");
    let finished = reporter
        .on_run_end(&RunStats {
            pending: 1,
            ..RunStats::default()
        })
        .expect("run ended");

    assert_eq!(
        finished.document,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites>
              <testsuite name="Root Suite" timestamp="2024-01-02T03:04:05" tests="1" package="Root Suite" hostname="ci-host" id="0" errors="0" failures="0" time="0.0100">
                <properties>
                  <property name="build" value="42"/>
                </properties>
                <testcase name="root test" time="0.0100" classname="root test"/>
                <system-out/>
                <system-err/>
              </testsuite>
              <testsuite name="Pending suite!" timestamp="2024-01-02T03:04:05" tests="1" package="Pending suite!" hostname="ci-host" id="1" errors="0" failures="0" skipped="1" time="0.0000">
                <properties>
                  <property name="build" value="42"/>
                </properties>
                <testcase name="Pending suite! pending" time="0.0000" classname="pending">
                  <skipped/>
                </testcase>
                <system-out/>
                <system-err/>
              </testsuite>
            </testsuites>
        "#}
    );
}

#[test_case(0, false ; "no pending")]
#[test_case(2, true ; "pending")]
fn summary_skipped_follows_run_stats(pending: usize, expect_skipped: bool) {
    let dir = tempdir().expect("tempdir created");
    let mut reporter = reporter(
        &dir.path().join("report.xml"),
        ReporterOptions::default(),
        &EnvSnapshot::new(),
    );

    reporter.on_run_start().expect("run started");
    reporter.on_suite_start(&root_suite(1)).expect("suite started");
    reporter
        .on_test_pass(&test("top-level", &[SuiteRef::root()], Some(1.0)))
        .expect("test passed");
    let finished = reporter
        .on_run_end(&RunStats {
            pending,
            ..RunStats::default()
        })
        .expect("run ended");

    let summary = finished
        .document
        .lines()
        .nth(1)
        .expect("document has a summary line");
    assert_eq!(
        summary.contains(&format!("skipped=\"{pending}\"")),
        expect_skipped,
        "summary line: {summary}"
    );
    // The root suite is present even without a title, and pending tests that weren't recorded
    // never mark a suite as skipped.
    let root_line = finished
        .document
        .lines()
        .find(|line| line.contains(r#"<testsuite name="Root Suite""#))
        .expect("root suite is present");
    assert!(!root_line.contains("skipped"), "root suite: {root_line}");
}

#[test]
fn untitled_suite_is_excluded() {
    let dir = tempdir().expect("tempdir created");
    let mut reporter = reporter(
        &dir.path().join("report.xml"),
        ReporterOptions::default(),
        &EnvSnapshot::new(),
    );

    reporter.on_run_start().expect("run started");
    reporter
        .on_suite_start(&suite("", &[SuiteRef::root()], 3))
        .expect("suite started");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");

    assert_eq!(
        finished.document,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites name="Mocha Tests" time="0.0000" tests="0" failures="0"/>
        "#}
    );
}

#[test]
fn hash_placeholder_names_file_after_content() {
    let dir = tempdir().expect("tempdir created");
    let template = dir.path().join("results.[hash].xml");
    let mut reporter = reporter(&template, ReporterOptions::default(), &EnvSnapshot::new());

    reporter.on_run_start().expect("run started");
    reporter
        .on_suite_start(&suite("Suite", &[SuiteRef::root()], 1))
        .expect("suite started");
    reporter
        .on_test_pass(&test(
            "works",
            &[SuiteRef::root(), SuiteRef::new("Suite")],
            Some(1.0),
        ))
        .expect("test passed");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");

    let hash = format!("{:x}", md5::compute(finished.document.as_bytes()));
    let expected_path = dir.path().join(format!("results.{hash}.xml"));
    assert_eq!(finished.path.as_deref(), Some(expected_path.as_path()));

    let contents = std::fs::read_to_string(&expected_path).expect("report read");
    assert_eq!(contents, finished.document);
    assert!(!contents.contains("[hash]"));
}

#[test]
fn suite_placeholders_use_first_non_root_suite() {
    let dir = tempdir().expect("tempdir created");
    let template = dir.path().join("[suiteName]/[suiteFilename].xml");
    let mut reporter = reporter(&template, ReporterOptions::default(), &EnvSnapshot::new());

    reporter.on_run_start().expect("run started");
    reporter.on_suite_start(&root_suite(1)).expect("suite started");
    reporter
        .on_test_pass(&test("top-level", &[SuiteRef::root()], Some(1.0)))
        .expect("test passed");
    let mut login = suite("Login", &[SuiteRef::root()], 1);
    login.file = Some("/project/test/login.spec.js".to_owned());
    reporter.on_suite_start(&login).expect("suite started");
    reporter
        .on_test_pass(&test(
            "works",
            &[SuiteRef::root(), SuiteRef::new("Login")],
            Some(1.0),
        ))
        .expect("test passed");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");

    let expected_path = dir.path().join("Login/login.spec.js.xml");
    assert_eq!(finished.path.as_deref(), Some(expected_path.as_path()));
    assert!(expected_path.exists(), "report written");
    assert!(
        finished
            .document
            .contains(r#"tests="1" file="/project/test/login.spec.js" failures="0""#)
    );
}

#[test]
fn run_start_removes_stale_report() {
    let dir = tempdir().expect("tempdir created");
    let output_path = dir.path().join("report.xml");
    std::fs::write(&output_path, "stale").expect("stale report written");

    let mut reporter = reporter(&output_path, ReporterOptions::default(), &EnvSnapshot::new());
    reporter.on_run_start().expect("run started");
    assert!(!output_path.exists(), "stale report removed");

    reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");
    assert!(output_path.exists(), "report written even without suites");
}

#[test]
fn unwritable_path_does_not_fail_run() {
    let dir = tempdir().expect("tempdir created");
    // A file where a parent directory is expected.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").expect("blocker written");

    let mut reporter = reporter(
        &blocker.join("report.xml"),
        ReporterOptions::default(),
        &EnvSnapshot::new(),
    );
    reporter.on_run_start().expect("run started");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("write failures are not fatal");
    assert_eq!(finished.path, None);
    assert!(finished.document.starts_with("<?xml"));
}

#[test_case(false ; "not swapped")]
#[test_case(true ; "swapped")]
fn swap_exchanges_values(swap: bool) {
    let dir = tempdir().expect("tempdir created");
    let options = ReporterOptions {
        swap_name_and_classname: Some(swap),
        ..Default::default()
    };
    let mut reporter = reporter(&dir.path().join("report.xml"), options, &EnvSnapshot::new());

    reporter
        .on_suite_start(&suite("Suite", &[SuiteRef::root()], 1))
        .expect("suite started");
    reporter
        .on_test_pass(&test(
            "works",
            &[SuiteRef::root(), SuiteRef::new("Suite")],
            Some(1.0),
        ))
        .expect("test passed");
    let finished = reporter
        .on_run_end(&RunStats::default())
        .expect("run ended");

    let expected = if swap {
        r#"<testcase classname="Suite works" time="0.0010" name="works"/>"#
    } else {
        r#"<testcase name="Suite works" time="0.0010" classname="works"/>"#
    };
    assert!(
        finished.document.contains(expected),
        "document:\n{}",
        finished.document
    );
}

#[test]
fn replayed_events_match_direct_calls() {
    let dir = tempdir().expect("tempdir created");
    let events = indoc! {r#"
        {"event": "run-start"}
        {"event": "suite-start", "suite": {"root": true}}
        {"event": "suite-start", "suite": {"title": "Suite", "parents": [{"root": true}], "test-count": 2}}
        {"event": "test-pass", "test": {"title": "works", "full-title": "Suite works", "duration-ms": 3, "parents": [{"root": true}, {"title": "Suite"}]}}
        {"event": "test-fail", "test": {"title": "fails", "full-title": "Suite fails", "parents": [{"root": true}, {"title": "Suite"}]}, "error": {"message": "a < b"}}
        {"event": "run-end", "stats": {"failures": 1}}
    "#};

    let mut reporter = reporter(
        &dir.path().join("report.xml"),
        ReporterOptions::default(),
        &EnvSnapshot::new(),
    );
    let mut finished = None;
    for line in events.lines() {
        let event: RunEvent = serde_json::from_str(line).expect("event parsed");
        if let Some(output) = reporter.handle_event(&event).expect("event handled") {
            finished = Some(output);
        }
    }
    let finished = finished.expect("run-end produced a report");

    assert_eq!(
        finished.document,
        indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <testsuites name="Mocha Tests" time="0.0030" tests="2" failures="1">
              <testsuite name="Suite" timestamp="2024-01-02T03:04:05" tests="2" failures="1" time="0.0030">
                <testcase name="Suite works" time="0.0030" classname="works"/>
                <testcase name="Suite fails" time="0.0000" classname="fails">
                  <failure message="a &lt; b" type=""><![CDATA[a < b]]></failure>
                </testcase>
              </testsuite>
            </testsuites>
        "#}
    );
}
