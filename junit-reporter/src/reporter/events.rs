// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events reported by a host test framework.
//!
//! The host drives a [`RunListener`] directly, one method per lifecycle event. Recorded runs are
//! represented as a sequence of [`RunEvent`]s instead, and replayed through
//! [`RunListener::handle_event`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to an ancestor suite.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteRef {
    /// The suite's own title.
    #[serde(default)]
    pub title: String,

    /// True for the implicit root suite of the run.
    #[serde(default)]
    pub root: bool,
}

impl SuiteRef {
    /// Creates a reference to a non-root suite.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: false,
        }
    }

    /// Creates a reference to the implicit root suite.
    pub fn root() -> Self {
        Self {
            title: String::new(),
            root: true,
        }
    }
}

/// A suite, as reported when it starts.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteInfo {
    /// The suite's own title.
    #[serde(default)]
    pub title: String,

    /// True for the implicit root suite of the run.
    #[serde(default)]
    pub root: bool,

    /// The source file the suite was declared in.
    #[serde(default)]
    pub file: Option<String>,

    /// The ancestor chain, outermost first. Does not include this suite.
    #[serde(default)]
    pub parents: Vec<SuiteRef>,

    /// The number of tests declared directly in this suite.
    #[serde(default)]
    pub test_count: usize,

    /// The number of suites nested directly in this suite.
    #[serde(default)]
    pub suite_count: usize,
}

/// A test, as reported when it finishes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TestInfo {
    /// The test's own title.
    #[serde(default)]
    pub title: String,

    /// The fully-qualified title: ancestor titles followed by the test's own title.
    #[serde(default)]
    pub full_title: String,

    /// The duration in milliseconds, if the framework measured one.
    #[serde(default)]
    pub duration_ms: Option<f64>,

    /// The suites containing this test, outermost first, ending with the suite the test was
    /// declared in.
    #[serde(default)]
    pub parents: Vec<SuiteRef>,

    /// Lines written to the console by the test.
    #[serde(default)]
    pub console_outputs: Vec<String>,

    /// Lines written to the console's error stream by the test.
    #[serde(default)]
    pub console_errors: Vec<String>,

    /// Paths to files attached to the test, such as screenshots.
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// The error a test failed with.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TestError {
    /// The error message.
    #[serde(default)]
    pub message: Option<String>,

    /// The stack trace.
    #[serde(default)]
    pub stack: Option<String>,

    /// The kind of error, e.g. `AssertionError`.
    #[serde(default)]
    pub name: Option<String>,
}

/// Statistics about a run, reported when it ends.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RunStats {
    /// The time the run started.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    /// The duration of the run in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<f64>,

    /// The number of failed tests.
    #[serde(default)]
    pub failures: usize,

    /// The number of pending tests.
    #[serde(default)]
    pub pending: usize,
}

/// A single lifecycle event, as stored in a recorded run.
///
/// Serialized as an object tagged by `event`:
///
/// ```json
/// {"event": "test-pass", "test": {"title": "works", "full-title": "suite works"}}
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum RunEvent {
    /// The run started.
    RunStart,

    /// A suite started.
    SuiteStart {
        /// The suite.
        suite: SuiteInfo,
    },

    /// A test passed.
    TestPass {
        /// The test.
        test: TestInfo,
    },

    /// A test failed.
    TestFail {
        /// The test.
        test: TestInfo,

        /// The error the test failed with.
        #[serde(default)]
        error: TestError,
    },

    /// A test was pending and not run.
    TestPending {
        /// The test.
        test: TestInfo,
    },

    /// The run ended.
    RunEnd {
        /// Statistics about the run.
        #[serde(default)]
        stats: RunStats,
    },
}

/// Receives lifecycle events from a test run, in emission order.
pub trait RunListener {
    /// The value produced when the run ends.
    type Output;

    /// The error produced by event handlers.
    type Error;

    /// Called once, before anything else.
    fn on_run_start(&mut self) -> Result<(), Self::Error>;

    /// Called when a suite starts. Suite-end events are not reported.
    fn on_suite_start(&mut self, suite: &SuiteInfo) -> Result<(), Self::Error>;

    /// Called when a test passes.
    fn on_test_pass(&mut self, test: &TestInfo) -> Result<(), Self::Error>;

    /// Called when a test fails.
    fn on_test_fail(&mut self, test: &TestInfo, error: &TestError) -> Result<(), Self::Error>;

    /// Called when a test is pending.
    fn on_test_pending(&mut self, test: &TestInfo) -> Result<(), Self::Error>;

    /// Called once, after everything else.
    fn on_run_end(&mut self, stats: &RunStats) -> Result<Self::Output, Self::Error>;

    /// Dispatches a recorded event to the matching handler.
    ///
    /// Returns the output of [`Self::on_run_end`] for a run-end event, and `None` otherwise.
    fn handle_event(&mut self, event: &RunEvent) -> Result<Option<Self::Output>, Self::Error> {
        match event {
            RunEvent::RunStart => self.on_run_start()?,
            RunEvent::SuiteStart { suite } => self.on_suite_start(suite)?,
            RunEvent::TestPass { test } => self.on_test_pass(test)?,
            RunEvent::TestFail { test, error } => self.on_test_fail(test, error)?,
            RunEvent::TestPending { test } => self.on_test_pending(test)?,
            RunEvent::RunEnd { stats } => return self.on_run_end(stats).map(Some),
        }
        Ok(None)
    }
}
