// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter configuration.
//!
//! Settings come from three layers, highest precedence first: environment variables (captured
//! in an [`EnvSnapshot`]), [`ReporterOptions`] supplied by the host or an options file, and
//! built-in defaults. [`JunitConfig::resolve`] combines them into the final configuration.

mod env;
mod junit;
mod options;

pub use env::*;
pub use junit::*;
pub use options::*;
