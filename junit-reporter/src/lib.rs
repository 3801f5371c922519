// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Assembles JUnit XML reports from the lifecycle events of a test run.
//!
//! A host test framework drives a [`JunitReporter`](reporter::JunitReporter) through the
//! [`RunListener`](reporter::RunListener) interface: run start, suite start, test
//! pass/fail/pending and run end. At run end the collected suites are finalized, serialized with
//! [`junit_document`] and written to the configured output path.
//!
//! Configuration is resolved up front by [`JunitConfig::resolve`](config::JunitConfig::resolve),
//! from [`ReporterOptions`](config::ReporterOptions) and an explicit
//! [`EnvSnapshot`](config::EnvSnapshot). Nothing in this crate reads process state.

pub mod config;
pub mod errors;
pub mod reporter;
