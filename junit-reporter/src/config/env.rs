// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

/// Overrides the output path.
pub static MOCHA_FILE_ENV: &str = "MOCHA_FILE";

/// Enables attachment markers in `system-out`.
pub static ATTACHMENTS_ENV: &str = "ATTACHMENTS";

/// Enables the Ant/Jenkins XSD layout.
pub static ANT_MODE_ENV: &str = "ANT_MODE";

/// Enables Jenkins-style naming.
pub static JENKINS_MODE_ENV: &str = "JENKINS_MODE";

/// Run-wide properties, as `name:value,name:value`.
pub static PROPERTIES_ENV: &str = "PROPERTIES";

/// Overrides the hostname rendered in the Ant layout.
pub static ANT_HOSTNAME_ENV: &str = "ANT_HOSTNAME";

/// The last-resort source for the hostname rendered in the Ant layout.
pub static HOSTNAME_ENV: &str = "HOSTNAME";

/// A snapshot of environment variables.
///
/// Configuration resolution only ever looks at a snapshot, so that it stays a pure function of its
/// inputs. Callers that want the process environment capture it themselves:
///
/// ```
/// use junit_reporter::config::EnvSnapshot;
///
/// let env: EnvSnapshot = std::env::vars().collect();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable in the snapshot.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Returns the value of a variable, if it is present.
    ///
    /// A variable that is set to the empty string is present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
