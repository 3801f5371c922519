// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use junit_replay::ReplayApp;
use junit_reporter::config::EnvSnapshot;

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = ReplayApp::parse();
    app.init_output();

    let env: EnvSnapshot = std::env::vars().collect();
    match app.exec(&env) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr();
            std::process::exit(error.process_exit_code())
        }
    }
}
