//! Logging setup for the daemon.

use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Level, warn};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::error::{AppError, AppResult};

pub const DEFAULT_LOG_PATH: &str = "/var/log/piStord.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    /// Appended to; created if missing.
    File(PathBuf),
}

impl Default for LogTarget {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_LOG_PATH))
    }
}

/// `Oct 19 26 14:02:11 <pid>` prefix.
struct LogTime;

impl FormatTime for LogTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(
            w,
            "{} {}",
            Local::now().format("%b %d %y %H:%M:%S"),
            std::process::id()
        )
    }
}

/// Install the global subscriber. A log file that cannot be opened falls
/// back to the console.
pub fn init(target: LogTarget) -> AppResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_timer(LogTime)
        .with_max_level(Level::DEBUG)
        .with_target(false);

    let mut open_error = None;
    let file = match &target {
        LogTarget::Console => None,
        LogTarget::File(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(err) => {
                open_error = Some((path.clone(), err));
                None
            }
        },
    };

    let installed = match file {
        Some(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        None => builder.with_writer(std::io::stdout).try_init(),
    };
    installed.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })?;

    if let Some((path, err)) = open_error {
        warn!(path = %path.display(), error = %err, "Could not open log file, logging to console");
    }
    Ok(())
}
