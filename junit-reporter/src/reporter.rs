// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns run events into a JUnit report.
//!
//! The main structure in this module is [`JunitReporter`].

pub mod events;
mod finalize;
mod junit;
mod title;
mod writer;

pub use events::RunListener;
pub use junit::*;
pub use title::*;
pub use writer::{ReportEcho, has_placeholders};
