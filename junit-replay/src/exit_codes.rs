// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `junit-replay` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ReplayExitCode {}

impl ReplayExitCode {
    /// No errors occurred and the replay finished normally.
    pub const OK: i32 = 0;

    /// Reporter options could not be read, parsed or resolved.
    pub const SETUP_ERROR: i32 = 96;

    /// The event log could not be read, contained a malformed event, or ended before the run
    /// did.
    pub const EVENT_LOG_ERROR: i32 = 97;

    /// The event log violated the ordering the reporter relies on, for example by reporting a
    /// test before any suite started.
    pub const CONTRACT_VIOLATION: i32 = 98;

    /// The finished report could not be serialized.
    pub const SERIALIZE_FAILED: i32 = 99;
}
