// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use chrono::{NaiveDate, NaiveDateTime};
use junit_reporter::{
    config::{EnvSnapshot, JunitConfig, ReporterOptions},
    reporter::{
        JunitReporter,
        events::{SuiteInfo, SuiteRef, TestError, TestInfo},
    },
};

pub(crate) fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|date| date.and_hms_opt(3, 4, 5))
        .expect("valid timestamp")
}

/// Creates a reporter writing to `output_path`, with a fixed clock.
pub(crate) fn reporter(
    output_path: &Utf8Path,
    options: ReporterOptions,
    env: &EnvSnapshot,
) -> JunitReporter<'static> {
    let options = ReporterOptions {
        output_path: Some(output_path.to_owned()),
        ..options
    };
    let config = JunitConfig::resolve(&options, env).expect("config resolved");
    let mut reporter = JunitReporter::new(config);
    reporter.set_clock(timestamp);
    reporter
}

pub(crate) fn root_suite(test_count: usize) -> SuiteInfo {
    SuiteInfo {
        root: true,
        test_count,
        ..Default::default()
    }
}

/// A suite nested under the given ancestors, outermost first.
pub(crate) fn suite(title: &str, parents: &[SuiteRef], test_count: usize) -> SuiteInfo {
    SuiteInfo {
        title: title.to_owned(),
        parents: parents.to_vec(),
        test_count,
        ..Default::default()
    }
}

/// A test inside the given suites, outermost first. The full title is the non-empty titles
/// joined by spaces, as mocha does.
pub(crate) fn test(title: &str, parents: &[SuiteRef], duration_ms: Option<f64>) -> TestInfo {
    let full_title = parents
        .iter()
        .map(|parent| parent.title.as_str())
        .filter(|title| !title.is_empty())
        .chain(std::iter::once(title))
        .collect::<Vec<_>>()
        .join(" ");
    TestInfo {
        title: title.to_owned(),
        full_title,
        duration_ms,
        parents: parents.to_vec(),
        ..Default::default()
    }
}

pub(crate) fn error(message: &str, name: &str, stack: &str) -> TestError {
    TestError {
        message: Some(message.to_owned()),
        stack: Some(stack.to_owned()),
        name: Some(name.to_owned()),
    }
}
