// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to generate JUnit XML reports from run events.

use crate::{
    config::JunitConfig,
    errors::{DisplayErrorChain, ReporterError},
    reporter::{
        events::{RunListener, RunStats, SuiteInfo, TestError, TestInfo},
        finalize::{duration_from_millis, finalize},
        title::TitleResolver,
        writer::{
            PlaceholderValues, ReportEcho, has_placeholders, remove_stale_report,
            resolve_output_path, write_report,
        },
    },
};
use camino::Utf8PathBuf;
use chrono::{NaiveDateTime, Utc};
use debug_ignore::DebugIgnore;
use itertools::Itertools;
use junit_document::{
    AntAttributes, Report, TestCase, TestCaseStatus, TestSuite, sanitize::sanitize,
};
use std::mem;
use tracing::{debug, warn};

/// The result of a finished run.
#[derive(Clone, Debug)]
pub struct FinishedReport {
    /// The serialized document.
    pub document: String,

    /// The path the document was written to, if it was written.
    pub path: Option<Utf8PathBuf>,
}

/// A suite that passed the inclusion check.
#[derive(Debug)]
struct RecordedSuite {
    root: bool,
    testsuite: TestSuite,
}

/// Builds a JUnit report from run events.
///
/// Suites are kept in a flat list in the order they started. Test events are always attached to
/// the most recently started suite: the host emits a suite's start strictly before its tests,
/// and never interleaves the tests of sibling suites.
#[derive(Debug)]
pub struct JunitReporter<'a> {
    config: JunitConfig,
    titles: TitleResolver,
    clock: DebugIgnore<Box<dyn FnMut() -> NaiveDateTime + 'a>>,
    echo: DebugIgnore<ReportEcho<'a>>,
    suites: Vec<RecordedSuite>,
    next_ant_id: usize,
}

impl<'a> JunitReporter<'a> {
    /// Creates a new reporter. One reporter should be used per run.
    pub fn new(config: JunitConfig) -> Self {
        let titles = TitleResolver::from_config(&config);
        Self {
            config,
            titles,
            clock: DebugIgnore(Box::new(|| Utc::now().naive_utc())),
            echo: DebugIgnore(ReportEcho::Stdout),
            suites: Vec::new(),
            next_ant_id: 0,
        }
    }

    /// Sets the clock used to timestamp suites. Defaults to the current UTC time.
    pub fn set_clock(&mut self, clock: impl FnMut() -> NaiveDateTime + 'a) -> &mut Self {
        self.clock = DebugIgnore(Box::new(clock));
        self
    }

    /// Sets where the document is echoed to, if echoing is enabled. Defaults to standard output.
    pub fn set_echo(&mut self, echo: ReportEcho<'a>) -> &mut Self {
        self.echo = DebugIgnore(echo);
        self
    }

    /// Returns the configuration this reporter was created with.
    pub fn config(&self) -> &JunitConfig {
        &self.config
    }

    fn is_included(suite: &SuiteInfo) -> bool {
        (suite.root || !suite.title.is_empty()) && suite.test_count > 0
    }

    fn current_suite(&mut self, test: &TestInfo) -> Result<&mut TestSuite, ReporterError> {
        self.suites
            .last_mut()
            .map(|suite| &mut suite.testsuite)
            .ok_or_else(|| ReporterError::NoOpenSuite {
                test: test.full_title.clone(),
            })
    }

    fn testcase(&self, test: &TestInfo, status: TestCaseStatus) -> TestCase {
        let full_name = if self.config.jenkins_mode() {
            self.titles.jenkins_classname(test)
        } else {
            sanitize(&test.full_title)
        };
        let short_name = sanitize(&test.title);
        let (name, classname) = if self.config.swap_name_and_classname() {
            (short_name, full_name)
        } else {
            (full_name, short_name)
        };

        let mut testcase = TestCase::new(name, classname, status);
        testcase.set_time(duration_from_millis(test.duration_ms));

        // JUnit only allows one system-out per test case, so console output and attachment
        // markers share it.
        let mut system_out_lines: Vec<&str> = Vec::new();
        if self.config.console_outputs() {
            system_out_lines.extend(test.console_outputs.iter().map(String::as_str));
        }
        let attachments: Vec<String> = if self.config.attachments() {
            test.attachments
                .iter()
                .map(|path| format!("[[ATTACHMENT|{path}]]"))
                .collect()
        } else {
            Vec::new()
        };
        system_out_lines.extend(attachments.iter().map(String::as_str));
        if !system_out_lines.is_empty() {
            testcase.set_system_out(sanitize(&system_out_lines.join("\n")));
        }

        if self.config.console_outputs() && !test.console_errors.is_empty() {
            testcase.set_system_err(sanitize(&test.console_errors.join("\n")));
        }

        testcase
    }

    fn add_testcase(
        &mut self,
        test: &TestInfo,
        status: TestCaseStatus,
    ) -> Result<(), ReporterError> {
        let testcase = self.testcase(test, status);
        self.current_suite(test)?.add_test_case(testcase);
        Ok(())
    }
}

/// Returns the suite whose name and file fill in the output path placeholders: the first non-root
/// suite, or failing that, the first suite.
fn triggering_suite(suites: &[RecordedSuite]) -> Option<&TestSuite> {
    suites
        .iter()
        .find(|suite| !suite.root)
        .or_else(|| suites.first())
        .map(|suite| &suite.testsuite)
}

impl RunListener for JunitReporter<'_> {
    type Output = FinishedReport;
    type Error = ReporterError;

    fn on_run_start(&mut self) -> Result<(), ReporterError> {
        // Paths with placeholders can't be known until the report is built.
        if let Some(path) = self.config.output_path().filter(|path| !has_placeholders(path)) {
            if let Err(error) = remove_stale_report(path) {
                warn!(
                    "failed to remove existing report: {}",
                    DisplayErrorChain::new(error)
                );
            }
        }
        Ok(())
    }

    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<(), ReporterError> {
        if !Self::is_included(suite) {
            debug!(
                "skipping suite `{}`: {} direct tests, root: {}",
                suite.title, suite.test_count, suite.root,
            );
            return Ok(());
        }

        let name = self.titles.suite_name(suite);
        let mut testsuite = TestSuite::new(name.clone());
        testsuite
            .set_timestamp((self.clock.0)())
            .set_declared_tests(suite.test_count);
        if let Some(file) = &suite.file {
            testsuite.set_file(file.clone());
        }

        let properties = self.config.properties();
        if !properties.is_empty() || self.config.ant_mode() {
            testsuite.set_properties(properties.to_vec());
        }

        if self.config.ant_mode() {
            testsuite.set_ant(AntAttributes {
                package: name,
                hostname: self.config.ant_hostname().to_owned(),
                id: self.next_ant_id,
            });
            self.next_ant_id += 1;
        }

        self.suites.push(RecordedSuite {
            root: suite.root,
            testsuite,
        });
        Ok(())
    }

    fn on_test_pass(&mut self, test: &TestInfo) -> Result<(), ReporterError> {
        self.add_testcase(test, TestCaseStatus::Success)
    }

    fn on_test_fail(&mut self, test: &TestInfo, error: &TestError) -> Result<(), ReporterError> {
        let message = error.message.as_deref().unwrap_or_default();
        // Prefer the stack trace, which usually repeats the message.
        let description = error
            .stack
            .as_deref()
            .filter(|stack| !stack.is_empty())
            .unwrap_or(message);
        let status = TestCaseStatus::Failure {
            message: sanitize(message),
            ty: sanitize(error.name.as_deref().unwrap_or_default()),
            description: sanitize(description),
        };
        self.add_testcase(test, status)
    }

    fn on_test_pending(&mut self, test: &TestInfo) -> Result<(), ReporterError> {
        if !self.config.include_pending() {
            return Ok(());
        }
        self.add_testcase(test, TestCaseStatus::Skipped)
    }

    fn on_run_end(&mut self, stats: &RunStats) -> Result<FinishedReport, ReporterError> {
        // Drain accumulated state so that nothing leaks into a later run.
        let suites = mem::take(&mut self.suites);
        self.next_ant_id = 0;

        let (suite_name, suite_file) = match triggering_suite(&suites) {
            Some(suite) => (Some(suite.name.clone()), suite.file.clone()),
            None => (None, None),
        };
        let mut testsuites = suites
            .into_iter()
            .map(|suite| suite.testsuite)
            .collect_vec();
        let totals = finalize(&mut testsuites, stats, self.config.layout());

        let mut report = Report::new(self.config.run_title());
        report
            .set_layout(self.config.layout())
            .set_testcase_attribute_order(self.config.testcase_attribute_order())
            .set_totals(totals)
            .add_test_suites(testsuites);
        let document = report.to_string()?;

        let path = self.config.output_path().and_then(|template| {
            let values = PlaceholderValues {
                run_title: self.config.run_title(),
                root_suite_title: self.config.root_suite_title(),
                suite_file: suite_file.as_deref(),
                suite_name: suite_name.as_deref(),
            };
            let path = resolve_output_path(template, &document, &values);
            match write_report(&path, &document) {
                Ok(()) => Some(path),
                Err(error) => {
                    warn!("failed to write report: {}", DisplayErrorChain::new(error));
                    None
                }
            }
        });

        if self.config.to_console() {
            if let Err(error) = self.echo.echo(&document) {
                warn!("{}", DisplayErrorChain::new(error));
            }
        }

        Ok(FinishedReport { document, path })
    }
}
