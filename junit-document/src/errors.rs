// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{io, string::FromUtf8Error};
use thiserror::Error;

/// An error that occurs while serializing a [`Report`](crate::Report).
///
/// Returned by [`Report::serialize`](crate::Report::serialize) and
/// [`Report::to_string`](crate::Report::to_string).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializeError {
    /// The XML writer failed.
    #[error("error serializing JUnit report")]
    Xml(#[from] quick_xml::Error),

    /// Writing the trailing newline failed.
    #[error("error writing JUnit report")]
    Io(#[from] io::Error),

    /// The serialized document was not valid UTF-8.
    #[error("serialized JUnit report is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
}
