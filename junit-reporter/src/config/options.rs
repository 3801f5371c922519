// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ConfigError;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::Deserialize;

/// Options supplied by the host, or read from an options file.
///
/// Every option is optional; unset options fall back to environment variables or defaults when
/// passed through [`JunitConfig::resolve`](super::JunitConfig::resolve). Keys are kebab-case, and
/// the camelCase names used by mocha's `reporterOptions` are accepted as aliases.
///
/// ```toml
/// output-path = "reports/[suiteName].xml"
/// include-pending = true
/// jenkins-mode = true
///
/// [properties]
/// build = "1234"
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReporterOptions {
    /// The output path template. May contain placeholders such as `[hash]`. An empty path
    /// disables writing.
    #[serde(default, alias = "mochaFile")]
    pub output_path: Option<Utf8PathBuf>,

    /// Whether pending tests are recorded as skipped test cases.
    #[serde(default, alias = "includePending")]
    pub include_pending: Option<bool>,

    /// Whether captured console output is recorded in `system-out` and `system-err`.
    #[serde(default, alias = "outputs")]
    pub console_outputs: Option<bool>,

    /// Whether attachment markers are recorded in `system-out`.
    #[serde(default)]
    pub attachments: Option<bool>,

    /// Whether the finished document is echoed to standard output.
    #[serde(default, alias = "toConsole")]
    pub to_console: Option<bool>,

    /// Whether suite names are the full chain of ancestor titles.
    #[serde(default, alias = "useFullSuiteTitle")]
    pub use_full_suite_title: Option<bool>,

    /// The separator between titles in a full suite title.
    #[serde(default, alias = "suiteTitleSeparatedBy")]
    pub suite_title_separator: Option<String>,

    /// The name used for a root suite without a title.
    #[serde(default, alias = "rootSuiteTitle")]
    pub root_suite_title: Option<String>,

    /// The name of the run, rendered on the root element.
    #[serde(default, alias = "testsuitesTitle")]
    pub run_title: Option<String>,

    /// Whether the values of the `name` and `classname` attributes are exchanged.
    #[serde(default, alias = "testCaseSwitchClassnameAndName")]
    pub swap_name_and_classname: Option<bool>,

    /// Whether the Ant/Jenkins XSD layout is used.
    #[serde(default, alias = "antMode")]
    pub ant_mode: Option<bool>,

    /// The hostname rendered in the Ant layout.
    #[serde(default, alias = "antHostname")]
    pub ant_hostname: Option<String>,

    /// Whether Jenkins-style naming is used.
    #[serde(default, alias = "jenkinsMode")]
    pub jenkins_mode: Option<bool>,

    /// Run-wide properties, attached to every suite.
    #[serde(default)]
    pub properties: Option<IndexMap<String, String>>,
}

impl ReporterOptions {
    /// Reads options from a TOML file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|error| ConfigError::ReadOptions {
            path: path.to_owned(),
            error,
        })?;
        Self::from_toml_str(path, &contents)
    }

    /// Parses options from TOML. `path` is only used for error reporting.
    pub fn from_toml_str(path: &Utf8Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|error| ConfigError::ParseOptions {
            path: path.to_owned(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::tempdir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn kebab_case_keys() {
        let options = ReporterOptions::from_toml_str(
            Utf8Path::new("options.toml"),
            indoc! {r#"
                output-path = "reports/[hash].xml"
                include-pending = true
                suite-title-separator = " > "
                ant-mode = false

                [properties]
                build = "1234"
                branch = "main"
            "#},
        )
        .expect("options parsed");

        assert_eq!(
            options.output_path.as_deref(),
            Some(Utf8Path::new("reports/[hash].xml"))
        );
        assert_eq!(options.include_pending, Some(true));
        assert_eq!(options.suite_title_separator.as_deref(), Some(" > "));
        assert_eq!(options.ant_mode, Some(false));
        assert_eq!(options.jenkins_mode, None);

        // Properties keep their declaration order.
        let properties: Vec<_> = options
            .properties
            .expect("properties present")
            .into_iter()
            .collect();
        assert_eq!(
            properties,
            vec![
                ("build".to_owned(), "1234".to_owned()),
                ("branch".to_owned(), "main".to_owned()),
            ]
        );
    }

    #[test]
    fn camel_case_aliases() {
        let options = ReporterOptions::from_toml_str(
            Utf8Path::new("options.toml"),
            indoc! {r#"
                mochaFile = "out.xml"
                outputs = true
                toConsole = true
                suiteTitleSeparatedBy = "."
                testsuitesTitle = "My Run"
                testCaseSwitchClassnameAndName = true
                antHostname = "builder"
            "#},
        )
        .expect("options parsed");

        assert_eq!(options.output_path.as_deref(), Some(Utf8Path::new("out.xml")));
        assert_eq!(options.console_outputs, Some(true));
        assert_eq!(options.to_console, Some(true));
        assert_eq!(options.suite_title_separator.as_deref(), Some("."));
        assert_eq!(options.run_title.as_deref(), Some("My Run"));
        assert_eq!(options.swap_name_and_classname, Some(true));
        assert_eq!(options.ant_hostname.as_deref(), Some("builder"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let error =
            ReporterOptions::from_toml_str(Utf8Path::new("options.toml"), "report-name = \"x\"")
                .expect_err("unknown keys are rejected");
        assert!(
            matches!(error, ConfigError::ParseOptions { ref path, .. } if path == "options.toml"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempdir().expect("tempdir created");
        let path = dir.path().join("options.toml");
        std::fs::write(&path, "jenkins-mode = true\n").expect("options written");

        let options = ReporterOptions::from_path(&path).expect("options read");
        assert_eq!(options.jenkins_mode, Some(true));

        let error = ReporterOptions::from_path(&dir.path().join("missing.toml"))
            .expect_err("missing file is an error");
        assert!(
            matches!(error, ConfigError::ReadOptions { .. }),
            "unexpected error: {error:?}"
        );
    }
}
