// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    ANT_HOSTNAME_ENV, ANT_MODE_ENV, ATTACHMENTS_ENV, EnvSnapshot, HOSTNAME_ENV, JENKINS_MODE_ENV,
    MOCHA_FILE_ENV, PROPERTIES_ENV, ReporterOptions,
};
use crate::errors::ConfigError;
use camino::{Utf8Path, Utf8PathBuf};
use junit_document::{Property, ReportLayout, TestCaseAttributeOrder};

static DEFAULT_OUTPUT_PATH: &str = "test-results.xml";
static DEFAULT_ROOT_SUITE_TITLE: &str = "Root Suite";
static DEFAULT_RUN_TITLE: &str = "Mocha Tests";
static DEFAULT_SUITE_TITLE_SEPARATOR: &str = " ";
static JENKINS_SUITE_TITLE_SEPARATOR: &str = ".";
static DEFAULT_ANT_HOSTNAME: &str = "localhost";

/// Fully resolved JUnit reporter configuration.
///
/// Created by [`JunitConfig::resolve`].
#[derive(Clone, Debug)]
pub struct JunitConfig {
    output_path: Option<Utf8PathBuf>,
    include_pending: bool,
    console_outputs: bool,
    attachments: bool,
    to_console: bool,
    use_full_suite_title: bool,
    suite_title_separator: String,
    root_suite_title: String,
    run_title: String,
    swap_name_and_classname: bool,
    ant_mode: bool,
    ant_hostname: String,
    jenkins_mode: bool,
    properties: Vec<Property>,
}

impl JunitConfig {
    /// Resolves configuration from options and a snapshot of the environment.
    ///
    /// For each setting that can be set through the environment, the environment variable wins
    /// over the option, which wins over the default.
    pub fn resolve(options: &ReporterOptions, env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let output_path = match env.get(MOCHA_FILE_ENV) {
            Some(path) => Utf8PathBuf::from(path),
            None => options
                .output_path
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.into()),
        };
        // An empty path means the report is built but not written.
        let output_path = (!output_path.as_str().is_empty()).then_some(output_path);

        let attachments = env_bool(env, ATTACHMENTS_ENV)?
            .or(options.attachments)
            .unwrap_or(false);
        let ant_mode = env_bool(env, ANT_MODE_ENV)?
            .or(options.ant_mode)
            .unwrap_or(false);
        let jenkins_mode = env_bool(env, JENKINS_MODE_ENV)?
            .or(options.jenkins_mode)
            .unwrap_or(false);

        let properties = match env.get(PROPERTIES_ENV) {
            Some(value) => parse_properties(value)?,
            None => options
                .properties
                .iter()
                .flatten()
                .map(|(name, value)| Property::new(name, value))
                .collect(),
        };

        let ant_hostname = env
            .get(ANT_HOSTNAME_ENV)
            .map(ToOwned::to_owned)
            .or_else(|| options.ant_hostname.clone())
            .or_else(|| env.get(HOSTNAME_ENV).map(ToOwned::to_owned))
            .unwrap_or_else(|| DEFAULT_ANT_HOSTNAME.to_owned());

        // Jenkins mode only changes the defaults: explicitly set options still win.
        let use_full_suite_title = options.use_full_suite_title.unwrap_or(jenkins_mode);
        let swap_name_and_classname = options.swap_name_and_classname.unwrap_or(jenkins_mode);
        let suite_title_separator = options.suite_title_separator.clone().unwrap_or_else(|| {
            if jenkins_mode {
                JENKINS_SUITE_TITLE_SEPARATOR.to_owned()
            } else {
                DEFAULT_SUITE_TITLE_SEPARATOR.to_owned()
            }
        });

        Ok(Self {
            output_path,
            include_pending: options.include_pending.unwrap_or(false),
            console_outputs: options.console_outputs.unwrap_or(false),
            attachments,
            to_console: options.to_console.unwrap_or(false),
            use_full_suite_title,
            suite_title_separator,
            root_suite_title: options
                .root_suite_title
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_SUITE_TITLE.to_owned()),
            run_title: options
                .run_title
                .clone()
                .unwrap_or_else(|| DEFAULT_RUN_TITLE.to_owned()),
            swap_name_and_classname,
            ant_mode,
            ant_hostname,
            jenkins_mode,
            properties,
        })
    }

    /// Returns the output path template, or `None` if the report should not be written.
    pub fn output_path(&self) -> Option<&Utf8Path> {
        self.output_path.as_deref()
    }

    /// Returns true if pending tests are recorded as skipped test cases.
    pub fn include_pending(&self) -> bool {
        self.include_pending
    }

    /// Returns true if captured console output is recorded.
    pub fn console_outputs(&self) -> bool {
        self.console_outputs
    }

    /// Returns true if attachment markers are recorded.
    pub fn attachments(&self) -> bool {
        self.attachments
    }

    /// Returns true if the finished document is echoed to standard output.
    pub fn to_console(&self) -> bool {
        self.to_console
    }

    /// Returns true if suite names are the full chain of ancestor titles.
    pub fn use_full_suite_title(&self) -> bool {
        self.use_full_suite_title
    }

    /// Returns the separator between titles in a full suite title or a Jenkins classname.
    pub fn suite_title_separator(&self) -> &str {
        &self.suite_title_separator
    }

    /// Returns the name used for a root suite without a title.
    pub fn root_suite_title(&self) -> &str {
        &self.root_suite_title
    }

    /// Returns the name of the run.
    pub fn run_title(&self) -> &str {
        &self.run_title
    }

    /// Returns true if the values of `name` and `classname` are exchanged.
    pub fn swap_name_and_classname(&self) -> bool {
        self.swap_name_and_classname
    }

    /// Returns true if the Ant/Jenkins XSD layout is used.
    pub fn ant_mode(&self) -> bool {
        self.ant_mode
    }

    /// Returns the hostname rendered in the Ant layout.
    pub fn ant_hostname(&self) -> &str {
        &self.ant_hostname
    }

    /// Returns true if Jenkins-style naming is used.
    pub fn jenkins_mode(&self) -> bool {
        self.jenkins_mode
    }

    /// Returns the run-wide properties, in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the structural layout of the report.
    pub fn layout(&self) -> ReportLayout {
        if self.ant_mode {
            ReportLayout::Ant
        } else {
            ReportLayout::Standard
        }
    }

    /// Returns the order of name-related attributes on test cases.
    pub fn testcase_attribute_order(&self) -> TestCaseAttributeOrder {
        if self.swap_name_and_classname {
            TestCaseAttributeOrder::ClassnameFirst
        } else {
            TestCaseAttributeOrder::NameFirst
        }
    }
}

fn env_bool(env: &EnvSnapshot, var: &'static str) -> Result<Option<bool>, ConfigError> {
    let Some(value) = env.get(var) else {
        return Ok(None);
    };
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Ok(Some(true))
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Ok(Some(false))
    } else {
        Err(ConfigError::InvalidBool {
            var,
            value: value.to_owned(),
        })
    }
}

/// Parses `name:value,name:value`. Only the first `:` in an entry separates the name from the
/// value, so values may contain colons (e.g. URLs).
fn parse_properties(value: &str) -> Result<Vec<Property>, ConfigError> {
    value
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, value)) => Ok(Property::new(name, value)),
            None => Err(ConfigError::InvalidProperty {
                var: PROPERTIES_ENV,
                entry: entry.to_owned(),
            }),
        })
        .collect()
}
