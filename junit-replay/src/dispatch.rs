// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{ExpectedError, Result},
    exit_codes::ReplayExitCode,
    output::{OutputOpts, clap_styles},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser};
use junit_reporter::{
    config::{EnvSnapshot, JunitConfig, ReporterOptions},
    errors::ReporterError,
    reporter::{FinishedReport, JunitReporter, RunListener, events::RunEvent},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use tracing::{debug, info};

/// Replays a recorded test-run event log into a JUnit XML report.
///
/// Reporter options are taken from environment variables first, then from the command line and
/// the options file, then from defaults.
#[derive(Debug, Parser)]
#[command(version, styles = clap_styles())]
pub struct ReplayApp {
    /// Event log to replay, one JSON event per line, or `-` for standard input
    #[arg(value_name = "EVENTS")]
    events: Utf8PathBuf,

    #[command(flatten)]
    reporter_opts: ReporterOpts,

    #[command(flatten)]
    output: OutputOpts,
}

impl ReplayApp {
    /// Initializes logging and color output.
    pub fn init_output(&self) {
        self.output.init();
    }

    /// Executes the app, resolving reporter options against `env`.
    pub fn exec(&self, env: &EnvSnapshot) -> Result<i32> {
        let options = self.reporter_opts.make_options()?;
        let config = JunitConfig::resolve(&options, env)?;
        let mut reporter = JunitReporter::new(config);

        let reports: Vec<FinishedReport> = if self.events == "-" {
            replay_events(Utf8Path::new("<stdin>"), io::stdin().lock(), &mut reporter)?
        } else {
            let file = File::open(&self.events).map_err(|err| ExpectedError::EventLogRead {
                path: self.events.clone(),
                err,
            })?;
            replay_events(&self.events, BufReader::new(file), &mut reporter)?
        };

        for report in &reports {
            match &report.path {
                Some(path) => info!("wrote JUnit report to {path}"),
                None => info!("no output path configured: report was not written"),
            }
        }

        Ok(ReplayExitCode::OK)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Reporter options")]
struct ReporterOpts {
    /// Reporter options file (TOML)
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Output path, which may contain placeholders such as `[hash]`
    #[arg(long, short = 'o', value_name = "PATH")]
    output_path: Option<Utf8PathBuf>,

    /// Record pending tests as skipped test cases
    #[arg(long)]
    include_pending: bool,

    /// Echo the finished report to standard output
    #[arg(long)]
    to_console: bool,

    /// Use the Ant/Jenkins XSD layout
    #[arg(long)]
    ant_mode: bool,

    /// Use Jenkins-style test naming
    #[arg(long)]
    jenkins_mode: bool,
}

impl ReporterOpts {
    /// Reads the options file, if any, and applies command-line overrides on top of it.
    fn make_options(&self) -> Result<ReporterOptions> {
        let mut options = match &self.config_file {
            Some(path) => {
                debug!("reading reporter options from {path}");
                ReporterOptions::from_path(path)?
            }
            None => ReporterOptions::default(),
        };

        if let Some(output_path) = &self.output_path {
            options.output_path = Some(output_path.clone());
        }
        // Flags can only turn options on: an absent flag leaves the file's value in place.
        let flags = [
            (self.include_pending, &mut options.include_pending),
            (self.to_console, &mut options.to_console),
            (self.ant_mode, &mut options.ant_mode),
            (self.jenkins_mode, &mut options.jenkins_mode),
        ];
        for (flag, option) in flags {
            if flag {
                *option = Some(true);
            }
        }

        Ok(options)
    }
}

/// Feeds every event in `reader` to `listener`, returning the reports of all completed runs.
///
/// Blank lines are ignored. `path` is only used for error reporting.
fn replay_events<L>(
    path: &Utf8Path,
    reader: impl BufRead,
    listener: &mut L,
) -> Result<Vec<L::Output>>
where
    L: RunListener<Error = ReporterError>,
{
    let mut reports = Vec::new();
    // True while a run has started but not yet ended.
    let mut in_run = false;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|err| ExpectedError::EventLogRead {
            path: path.to_owned(),
            err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let event: RunEvent =
            serde_json::from_str(&line).map_err(|err| ExpectedError::EventParse {
                path: path.to_owned(),
                line: line_number,
                err,
            })?;
        in_run = !matches!(event, RunEvent::RunEnd { .. });

        let output = listener
            .handle_event(&event)
            .map_err(|err| ExpectedError::Reporter {
                path: path.to_owned(),
                line: line_number,
                err,
            })?;
        reports.extend(output);
    }

    if in_run || reports.is_empty() {
        return Err(ExpectedError::IncompleteEventLog {
            path: path.to_owned(),
        });
    }

    Ok(reports)
}
