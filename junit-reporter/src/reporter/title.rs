// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    config::JunitConfig,
    reporter::events::{SuiteInfo, SuiteRef, TestInfo},
};
use itertools::Itertools;
use junit_document::sanitize::sanitize;

/// How suite display names are produced.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SuiteTitleStrategy {
    /// The suite's own title.
    OwnTitle,

    /// The titles of the suite's ancestors followed by its own title, joined by a separator.
    FullPath,
}

/// Produces suite display names and Jenkins-style classnames.
#[derive(Clone, Debug)]
pub struct TitleResolver {
    strategy: SuiteTitleStrategy,
    separator: String,
    root_suite_title: String,
}

impl TitleResolver {
    /// Creates a new resolver.
    pub fn new(
        strategy: SuiteTitleStrategy,
        separator: impl Into<String>,
        root_suite_title: impl Into<String>,
    ) -> Self {
        Self {
            strategy,
            separator: separator.into(),
            root_suite_title: root_suite_title.into(),
        }
    }

    /// Creates a resolver from the reporter configuration.
    pub fn from_config(config: &JunitConfig) -> Self {
        let strategy = if config.use_full_suite_title() {
            SuiteTitleStrategy::FullPath
        } else {
            SuiteTitleStrategy::OwnTitle
        };
        Self::new(
            strategy,
            config.suite_title_separator(),
            config.root_suite_title(),
        )
    }

    /// Returns the strategy used for suite display names.
    pub fn strategy(&self) -> SuiteTitleStrategy {
        self.strategy
    }

    /// Returns the sanitized display name for a suite.
    pub fn suite_name(&self, suite: &SuiteInfo) -> String {
        let own_title = self.title_or_root_label(&suite.title, suite.root);
        match self.strategy {
            SuiteTitleStrategy::OwnTitle => sanitize(own_title),
            SuiteTitleStrategy::FullPath => {
                let full_title = suite
                    .parents
                    .iter()
                    .map(|SuiteRef { title, root }| self.title_or_root_label(title, *root))
                    .chain(std::iter::once(own_title))
                    .join(&self.separator);
                sanitize(&full_title)
            }
        }
    }

    /// Returns the sanitized Jenkins-style classname for a test: the non-empty titles of the
    /// suites containing it, joined by the separator.
    ///
    /// This ignores the suite title strategy, and never substitutes the root suite label.
    pub fn jenkins_classname(&self, test: &TestInfo) -> String {
        let classname = test
            .parents
            .iter()
            .map(|parent| parent.title.as_str())
            .filter(|title| !title.is_empty())
            .join(&self.separator);
        sanitize(&classname)
    }

    fn title_or_root_label<'a>(&'a self, title: &'a str, root: bool) -> &'a str {
        if root && title.is_empty() {
            &self.root_suite_title
        } else {
            title
        }
    }
}
