// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{exit_codes::ReplayExitCode, output::NO_HEADING_TARGET};
use camino::Utf8PathBuf;
use junit_reporter::errors::{ConfigError, ReporterError};
use std::{error::Error, io};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// An error that `junit-replay` expects to produce, with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("reporter configuration error")]
    Config {
        #[from]
        err: ConfigError,
    },
    #[error("error reading event log `{path}`")]
    EventLogRead {
        path: Utf8PathBuf,
        #[source]
        err: io::Error,
    },
    #[error("malformed event at `{path}` line {line}")]
    EventParse {
        path: Utf8PathBuf,
        line: usize,
        #[source]
        err: serde_json::Error,
    },
    #[error("event log `{path}` ended before the run did")]
    IncompleteEventLog { path: Utf8PathBuf },
    #[error("error replaying event at `{path}` line {line}")]
    Reporter {
        path: Utf8PathBuf,
        line: usize,
        #[source]
        err: ReporterError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => ReplayExitCode::SETUP_ERROR,
            Self::EventLogRead { .. }
            | Self::EventParse { .. }
            | Self::IncompleteEventLog { .. } => ReplayExitCode::EVENT_LOG_ERROR,
            Self::Reporter { err, .. } => match err {
                ReporterError::Serialize(_) => ReplayExitCode::SERIALIZE_FAILED,
                _ => ReplayExitCode::CONTRACT_VIOLATION,
            },
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self) {
        let mut next_error = match self {
            Self::Config { err } => {
                error!("failed to resolve reporter configuration");
                Some(err as &dyn Error)
            }
            Self::EventLogRead { path, err } => {
                error!("error reading event log `{path}`");
                Some(err as &dyn Error)
            }
            Self::EventParse { path, line, err } => {
                error!("malformed event at `{path}` line {line}");
                Some(err as &dyn Error)
            }
            Self::IncompleteEventLog { path } => {
                error!(
                    "event log `{path}` ended before a run-end event: \
                     no report was produced"
                );
                None
            }
            Self::Reporter { path, line, err } => {
                error!("error replaying event at `{path}` line {line}");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let path = Utf8PathBuf::from("events.jsonl");

        let err = ExpectedError::IncompleteEventLog { path: path.clone() };
        assert_eq!(err.process_exit_code(), ReplayExitCode::EVENT_LOG_ERROR);

        let err = ExpectedError::Reporter {
            path,
            line: 1,
            err: ReporterError::NoOpenSuite {
                test: "works".to_owned(),
            },
        };
        assert_eq!(err.process_exit_code(), ReplayExitCode::CONTRACT_VIOLATION);

        let err = ExpectedError::from(ConfigError::InvalidBool {
            var: "JENKINS_MODE",
            value: "yes".to_owned(),
        });
        assert_eq!(err.process_exit_code(), ReplayExitCode::SETUP_ERROR);
    }
}
