// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Data model and serializer for JUnit XML reports.
//!
//! A [`Report`] is a finished document: suites have already been assembled and their aggregate
//! counts computed. Serializing it produces either the generic JUnit layout or the stricter
//! Ant/Jenkins layout, depending on [`ReportLayout`].
//!
//! The [`sanitize`] module contains the text cleanup applied to every string that ends up in a
//! document.

mod errors;
mod report;
pub mod sanitize;
mod serialize;

pub use errors::*;
pub use report::*;
