// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{SerializeError, serialize::serialize_report};
use chrono::NaiveDateTime;
use std::{io, time::Duration};

/// The structural layout of a serialized report.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReportLayout {
    /// The generic JUnit layout.
    ///
    /// The root `testsuites` element carries run-level summary attributes.
    #[default]
    Standard,

    /// The layout required by the Ant/Jenkins JUnit XSD.
    ///
    /// The root `testsuites` element carries no attributes. Instead, every `testsuite` carries
    /// `package`, `hostname`, `id` and `errors`, and always has `properties`, `system-out` and
    /// `system-err` children.
    Ant,
}

/// The order of the name-related attributes on each `testcase` element.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TestCaseAttributeOrder {
    /// `name`, `time`, `classname`.
    #[default]
    NameFirst,

    /// `classname`, `time`, `name`.
    ClassnameFirst,
}

/// The root of a finished JUnit report.
#[derive(Clone, Debug)]
pub struct Report {
    /// The name of this report, rendered on the root element in the standard layout.
    pub name: String,

    /// The structural layout to serialize with.
    pub layout: ReportLayout,

    /// The order of name-related attributes on test cases.
    pub testcase_attribute_order: TestCaseAttributeOrder,

    /// Run-level totals, rendered on the root element in the standard layout.
    pub totals: RunTotals,

    /// The test suites contained in this report, in the order they were started.
    pub testsuites: Vec<TestSuite>,
}

impl Report {
    /// Creates a new, empty `Report` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: ReportLayout::Standard,
            testcase_attribute_order: TestCaseAttributeOrder::NameFirst,
            totals: RunTotals::default(),
            testsuites: vec![],
        }
    }

    /// Sets the structural layout.
    pub fn set_layout(&mut self, layout: ReportLayout) -> &mut Self {
        self.layout = layout;
        self
    }

    /// Sets the order of name-related attributes on test cases.
    pub fn set_testcase_attribute_order(&mut self, order: TestCaseAttributeOrder) -> &mut Self {
        self.testcase_attribute_order = order;
        self
    }

    /// Sets the run-level totals.
    pub fn set_totals(&mut self, totals: RunTotals) -> &mut Self {
        self.totals = totals;
        self
    }

    /// Adds several test suites.
    ///
    /// Unlike the counters on a [`TestSuite`], run totals are not updated here: the failure and
    /// pending counts come from the framework's own run statistics.
    pub fn add_test_suites(
        &mut self,
        testsuites: impl IntoIterator<Item = TestSuite>,
    ) -> &mut Self {
        self.testsuites.extend(testsuites);
        self
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), SerializeError> {
        serialize_report(self, writer)
    }

    /// Serialize this report to a string.
    pub fn to_string(&self) -> Result<String, SerializeError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Aggregate values for a whole run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunTotals {
    /// The sum of all suite times.
    pub time: Duration,

    /// The sum of all suite test counts.
    pub tests: usize,

    /// The number of failures, as reported by the test framework.
    pub failures: usize,

    /// The number of pending tests, as reported by the test framework. Rendered only if non-zero.
    pub skipped: usize,
}

/// Attributes that only exist in the [`ReportLayout::Ant`] layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AntAttributes {
    /// The package name. This is the same as the suite's display name.
    pub package: String,

    /// The host the tests ran on.
    pub hostname: String,

    /// A unique, monotonically increasing identifier for the suite, starting at 0.
    pub id: usize,
}

/// Represents a single test suite.
///
/// A `TestSuite` groups together several `TestCase` instances.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct TestSuite {
    /// The display name of this suite.
    pub name: String,

    /// The time at which the suite started, rendered to whole seconds without an offset.
    pub timestamp: Option<NaiveDateTime>,

    /// The source file this suite was declared in.
    pub file: Option<String>,

    /// The number of tests the framework reported for this suite when it started.
    ///
    /// This is never serialized: the `tests` attribute is always the number of recorded test
    /// cases.
    pub declared_tests: usize,

    /// The number of failed test cases in this suite.
    pub failures: usize,

    /// The number of skipped test cases in this suite. Rendered only if non-zero.
    pub skipped: usize,

    /// The sum of the times of every test case in this suite.
    pub time: Duration,

    /// Run-wide properties. `Some` means a `properties` element is rendered, even if empty.
    pub properties: Option<Vec<Property>>,

    /// Attributes for the Ant/Jenkins layout.
    pub ant: Option<AntAttributes>,

    /// The test cases in this suite, in the order they finished.
    pub testcases: Vec<TestCase>,

    /// Suite-level standard output. `Some("")` renders an empty element.
    pub system_out: Option<String>,

    /// Suite-level standard error. `Some("")` renders an empty element.
    pub system_err: Option<String>,
}

impl TestSuite {
    /// Creates a new `TestSuite`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: None,
            file: None,
            declared_tests: 0,
            failures: 0,
            skipped: 0,
            time: Duration::ZERO,
            properties: None,
            ant: None,
            testcases: vec![],
            system_out: None,
            system_err: None,
        }
    }

    /// Sets the start timestamp.
    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) -> &mut Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the source file.
    pub fn set_file(&mut self, file: impl Into<String>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the number of tests the framework declared for this suite.
    pub fn set_declared_tests(&mut self, declared_tests: usize) -> &mut Self {
        self.declared_tests = declared_tests;
        self
    }

    /// Sets the run-wide properties. An empty list still renders a `properties` element.
    pub fn set_properties(&mut self, properties: Vec<Property>) -> &mut Self {
        self.properties = Some(properties);
        self
    }

    /// Sets the Ant/Jenkins attributes.
    pub fn set_ant(&mut self, ant: AntAttributes) -> &mut Self {
        self.ant = Some(ant);
        self
    }

    /// Appends a test case.
    ///
    /// Counts are not updated here; they are computed once the run has finished.
    pub fn add_test_case(&mut self, testcase: TestCase) -> &mut Self {
        self.testcases.push(testcase);
        self
    }

    /// The number of test cases in this suite. This is the value of the `tests` attribute.
    pub fn tests(&self) -> usize {
        self.testcases.len()
    }
}

/// Represents a single test case.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct TestCase {
    /// The value of the `name` attribute.
    pub name: String,

    /// The value of the `classname` attribute.
    pub classname: String,

    /// The time it took to execute this test case.
    pub time: Duration,

    /// The outcome of this test case.
    pub status: TestCaseStatus,

    /// Data written to standard output, plus attachment markers.
    pub system_out: Option<String>,

    /// Data written to standard error.
    pub system_err: Option<String>,
}

impl TestCase {
    /// Creates a new test case.
    pub fn new(
        name: impl Into<String>,
        classname: impl Into<String>,
        status: TestCaseStatus,
    ) -> Self {
        Self {
            name: name.into(),
            classname: classname.into(),
            time: Duration::ZERO,
            status,
            system_out: None,
            system_err: None,
        }
    }

    /// Sets the time taken.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = time;
        self
    }

    /// Sets standard output. Empty output is not rendered.
    pub fn set_system_out(&mut self, system_out: impl Into<String>) -> &mut Self {
        self.system_out = Some(system_out.into());
        self
    }

    /// Sets standard error. Empty output is not rendered.
    pub fn set_system_err(&mut self, system_err: impl Into<String>) -> &mut Self {
        self.system_err = Some(system_err.into());
        self
    }
}

/// The outcome of a test case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestCaseStatus {
    /// The test passed.
    Success,

    /// The test failed.
    Failure {
        /// The failure message, rendered as the `message` attribute.
        message: String,

        /// The kind of error, rendered as the `type` attribute.
        ty: String,

        /// The stack trace, or the message if there was no stack trace. Rendered as CDATA.
        description: String,
    },

    /// The test was pending and not run.
    Skipped,
}

impl TestCaseStatus {
    /// Returns true if this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestCaseStatus::Failure { .. })
    }

    /// Returns true if this test was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, TestCaseStatus::Skipped)
    }
}

/// A run-wide property, e.g. a build number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// The name of the property.
    pub name: String,

    /// The value of the property.
    pub value: String,
}

impl Property {
    /// Creates a new `Property` instance.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<T> From<(T, T)> for Property
where
    T: Into<String>,
{
    fn from((k, v): (T, T)) -> Self {
        Property::new(k, v)
    }
}
