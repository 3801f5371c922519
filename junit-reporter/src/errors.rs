// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the JUnit reporter.

use camino::Utf8PathBuf;
use junit_document::SerializeError;
use std::{error, fmt, io};
use thiserror::Error;

/// An error that occurred while resolving reporter configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read reporter options at `{path}`")]
    ReadOptions {
        /// The path to the options file.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: io::Error,
    },

    /// The options file could not be parsed.
    #[error("failed to parse reporter options at `{path}`")]
    ParseOptions {
        /// The path to the options file.
        path: Utf8PathBuf,

        /// The error that occurred trying to deserialize the options.
        #[source]
        error: toml::de::Error,
    },

    /// A boolean environment variable had a value other than `true`, `false`, `1` or `0`.
    #[error("environment variable `{var}` must be one of true, false, 1 or 0, found `{value}`")]
    InvalidBool {
        /// The name of the environment variable.
        var: &'static str,

        /// The value that was found.
        value: String,
    },

    /// An entry in the `PROPERTIES` environment variable was not of the form `name:value`.
    #[error("environment variable `{var}` has an entry without a `:` separator: `{entry}`")]
    InvalidProperty {
        /// The name of the environment variable.
        var: &'static str,

        /// The malformed entry.
        entry: String,
    },
}

/// An error that occurred while writing a finished report.
///
/// These errors are logged rather than propagated out of run-end processing: losing the report
/// file must not fail the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// An error occurred while operating on the file system.
    #[error("error operating on path {file}")]
    Fs {
        /// The file being operated on.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: io::Error,
    },

    /// An error occurred while echoing the report.
    #[error("error echoing report to standard output")]
    Echo(#[source] io::Error),
}

/// An error that occurred while handling a run event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReporterError {
    /// A test event arrived before any suite was recorded.
    ///
    /// The host framework always starts an (implicit) root suite before emitting test events, so
    /// this indicates a broken event source.
    #[error("test `{test}` was reported before any suite was started")]
    NoOpenSuite {
        /// The full title of the test.
        test: String,
    },

    /// The report could not be serialized.
    #[error("error serializing JUnit report")]
    Serialize(#[from] SerializeError),
}

/// Displays an error along with its chain of sources.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: error::Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        if source.is_some() {
            write!(f, "\n  caused by:")?;
        }
        while let Some(error) = source {
            write!(f, "\n  - {error}")?;
            source = error.source();
        }

        Ok(())
    }
}
