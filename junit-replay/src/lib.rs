// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replays a recorded test-run event log into a JUnit XML report.
//!
//! The event log is a sequence of JSON objects, one per line, each carrying an `event` tag:
//!
//! ```text
//! {"event": "run-start"}
//! {"event": "suite-start", "suite": {"root": true, "test-count": 1}}
//! {"event": "test-pass", "test": {"title": "works", "full-title": "works", "duration-ms": 3}}
//! {"event": "run-end", "stats": {"failures": 0, "pending": 0}}
//! ```
//!
//! This binary is mostly useful for producing reports from runs that were recorded elsewhere, and
//! for exercising reporter options without a live test run.

mod dispatch;
mod errors;
mod exit_codes;
mod output;

pub use dispatch::ReplayApp;
pub use errors::ExpectedError;
pub use exit_codes::ReplayExitCode;
