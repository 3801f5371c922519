// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate computation, performed once at the end of a run.

use crate::reporter::events::RunStats;
use junit_document::{ReportLayout, RunTotals, TestCaseStatus, TestSuite};
use std::time::Duration;
use tracing::debug;

/// Computes per-suite counts and times, and the totals for the run.
///
/// Failure and pending totals come from the framework's run statistics rather than the recorded
/// suites, since pending tests may not have been recorded at all.
pub(super) fn finalize(
    testsuites: &mut [TestSuite],
    stats: &RunStats,
    layout: ReportLayout,
) -> RunTotals {
    let mut totals = RunTotals {
        failures: stats.failures,
        skipped: stats.pending,
        ..RunTotals::default()
    };

    for testsuite in testsuites {
        let mut failures = 0;
        let mut skipped = 0;
        let mut time = Duration::ZERO;
        for testcase in &testsuite.testcases {
            time += testcase.time;
            match testcase.status {
                TestCaseStatus::Success => {}
                TestCaseStatus::Failure { .. } => failures += 1,
                TestCaseStatus::Skipped => skipped += 1,
            }
        }
        testsuite.failures = failures;
        testsuite.skipped = skipped;
        testsuite.time = time;

        if testsuite.declared_tests != testsuite.tests() {
            debug!(
                "suite `{}` declared {} tests, but {} were recorded",
                testsuite.name,
                testsuite.declared_tests,
                testsuite.tests(),
            );
        }

        if layout == ReportLayout::Ant {
            // The Ant XSD requires both elements, even if empty.
            testsuite.system_out.get_or_insert_with(String::new);
            testsuite.system_err.get_or_insert_with(String::new);
        }

        totals.time += time;
        totals.tests += testsuite.tests();
    }

    totals
}

/// Converts a framework-reported duration into a `Duration`. Missing, negative and non-finite
/// values are zero.
pub(super) fn duration_from_millis(millis: Option<f64>) -> Duration {
    millis
        .filter(|millis| millis.is_finite() && *millis >= 0.0)
        .and_then(|millis| Duration::try_from_secs_f64(millis / 1000.0).ok())
        .unwrap_or(Duration::ZERO)
}
