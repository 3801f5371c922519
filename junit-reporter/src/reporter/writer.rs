// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes finished reports to disk and to standard output.

use crate::errors::WriteReportError;
use camino::{Utf8Path, Utf8PathBuf};
use std::{
    fs,
    io::{self, Write},
};
use tracing::{debug, warn};

static HASH_PLACEHOLDER: &str = "[hash]";
static TESTSUITES_TITLE_PLACEHOLDER: &str = "[testsuitesTitle]";
static ROOT_SUITE_TITLE_PLACEHOLDER: &str = "[rootSuiteTitle]";
static SUITE_FILENAME_PLACEHOLDER: &str = "[suiteFilename]";
static SUITE_NAME_PLACEHOLDER: &str = "[suiteName]";

static ALL_PLACEHOLDERS: &[&str] = &[
    HASH_PLACEHOLDER,
    TESTSUITES_TITLE_PLACEHOLDER,
    ROOT_SUITE_TITLE_PLACEHOLDER,
    SUITE_FILENAME_PLACEHOLDER,
    SUITE_NAME_PLACEHOLDER,
];

/// Returns true if the output path contains placeholders that are only resolved once the report
/// has been built.
pub fn has_placeholders(path: &Utf8Path) -> bool {
    ALL_PLACEHOLDERS
        .iter()
        .any(|placeholder| path.as_str().contains(placeholder))
}

/// Values substituted into the output path.
#[derive(Clone, Debug)]
pub(super) struct PlaceholderValues<'a> {
    pub(super) run_title: &'a str,
    pub(super) root_suite_title: &'a str,
    pub(super) suite_file: Option<&'a str>,
    pub(super) suite_name: Option<&'a str>,
}

/// Replaces every placeholder in `template`.
///
/// A placeholder whose value isn't available is replaced with the empty string.
pub(super) fn resolve_output_path(
    template: &Utf8Path,
    document: &str,
    values: &PlaceholderValues<'_>,
) -> Utf8PathBuf {
    let mut path = template.as_str().to_owned();

    if path.contains(HASH_PLACEHOLDER) {
        let hash = format!("{:x}", md5::compute(document.as_bytes()));
        path = path.replace(HASH_PLACEHOLDER, &hash);
    }

    let suite_filename = values
        .suite_file
        .map(|file| Utf8Path::new(file).file_name().unwrap_or(file));
    let substitutions = [
        (TESTSUITES_TITLE_PLACEHOLDER, Some(values.run_title)),
        (ROOT_SUITE_TITLE_PLACEHOLDER, Some(values.root_suite_title)),
        (SUITE_FILENAME_PLACEHOLDER, suite_filename),
        (SUITE_NAME_PLACEHOLDER, values.suite_name),
    ];
    for (placeholder, value) in substitutions {
        if !path.contains(placeholder) {
            continue;
        }
        let value = value.unwrap_or_else(|| {
            warn!(
                "output path `{template}` uses {placeholder}, but no value is available: \
                 replacing it with an empty string"
            );
            ""
        });
        path = path.replace(placeholder, value);
    }

    Utf8PathBuf::from(path)
}

/// Removes a report left behind by a previous run. A missing file is not an error.
pub(super) fn remove_stale_report(path: &Utf8Path) -> Result<(), WriteReportError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed existing report at {path}");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(WriteReportError::Fs {
            file: path.to_owned(),
            error,
        }),
    }
}

/// Writes the document to `path`, creating parent directories as necessary.
///
/// The write is synchronous: the report is on disk once this returns.
pub(super) fn write_report(path: &Utf8Path, document: &str) -> Result<(), WriteReportError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|error| WriteReportError::Fs {
            file: dir.to_owned(),
            error,
        })?;
    }

    debug!("writing report to {path}");
    fs::write(path, document).map_err(|error| WriteReportError::Fs {
        file: path.to_owned(),
        error,
    })
}

/// Where the finished document is echoed to, if echoing is enabled.
pub enum ReportEcho<'a> {
    /// Echo to the process's standard output.
    Stdout,

    /// Echo to the given buffer.
    Buffer(&'a mut Vec<u8>),
}

impl ReportEcho<'_> {
    pub(super) fn echo(&mut self, document: &str) -> Result<(), WriteReportError> {
        match self {
            ReportEcho::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(document.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(WriteReportError::Echo)
            }
            ReportEcho::Buffer(buf) => {
                buf.extend_from_slice(document.as_bytes());
                Ok(())
            }
        }
    }
}
