// Copyright 2024 Aleo Network Foundation
// This file is part of the snarkOS library.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{anyhow, Result};
use crossterm::tty::IsTty;
use std::{fs::File, io, path::Path};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

/// Returns the log level for the given verbosity.
pub const fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initializes the logger, writing to stdout and appending to the given logfile.
pub fn initialize_logger<P: AsRef<Path>>(verbosity: u8, logfile: P) -> Result<()> {
    // Filter out undesirable logs. (unfortunately EnvFilter cannot be cloned)
    let filter = || -> Result<EnvFilter> {
        Ok(EnvFilter::try_new(log_level(verbosity))?
            .add_directive("mio=off".parse()?)
            .add_directive("tokio_util=off".parse()?)
            .add_directive("hyper=off".parse()?))
    };
    let [filter, filter2] = [filter()?, filter()?];

    // Create the directories tree for a logfile if it doesn't exist.
    let logfile = logfile.as_ref();
    if let Some(logfile_dir) = logfile.parent().filter(|dir| !dir.as_os_str().is_empty() && !dir.exists()) {
        std::fs::create_dir_all(logfile_dir).map_err(|error| {
            anyhow!("Failed to create the directories '{}', please check permissions: {error}", logfile_dir.display())
        })?;
    }
    // Create a file to write logs to.
    let logfile = File::options()
        .append(true)
        .create(true)
        .open(logfile)
        .map_err(|error| anyhow!("Failed to open '{}' for writing logs: {error}", logfile.display()))?;

    // Initialize tracing.
    let _ = tracing_subscriber::registry()
        .with(
            // Add layer for stdout / terminal
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(io::stdout().is_tty())
                .with_target(verbosity > 2)
                .with_filter(filter),
        )
        .with(
            // Add layer redirecting logs to the file
            tracing_subscriber::fmt::Layer::default()
                .with_ansi(false)
                .with_writer(logfile)
                .with_target(verbosity > 2)
                .with_filter(filter2),
        )
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "info");
        assert_eq!(log_level(1), "debug");
        assert_eq!(log_level(2), "trace");
        assert_eq!(log_level(9), "trace");
    }

    #[test]
    fn test_initialize_logger_creates_the_logfile() {
        let directory = tempfile::tempdir().unwrap();
        let logfile = directory.path().join("logs").join("dagsync.log");
        initialize_logger(0, &logfile).unwrap();
        assert!(logfile.exists());
    }
}
