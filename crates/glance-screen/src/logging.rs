#![forbid(unsafe_code)]

//! Log file setup.
//!
//! The UI owns the terminal, so logs only ever go to a file. Without a
//! log file no subscriber is installed and every event is dropped.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Why logging could not be set up.
#[derive(Debug)]
pub enum LoggingError {
    /// The log file could not be opened for appending.
    Open { path: PathBuf, source: io::Error },
    /// The filter directive did not parse.
    Filter(ParseError),
    /// A global subscriber was already installed.
    Install(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::Filter(err) => write!(f, "invalid log filter: {err}"),
            Self::Install(msg) => write!(f, "cannot install log subscriber: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Filter(err) => Some(err),
            Self::Install(_) => None,
        }
    }
}

/// Parse a filter directive such as `info` or `glance_screen=debug`.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(LoggingError::Filter)
}

fn open_append(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when `path` is `None` and nothing was installed.
/// The filter is validated either way.
pub fn init(path: Option<&Path>, directive: &str) -> Result<bool, LoggingError> {
    let filter = parse_filter(directive)?;
    let Some(path) = path else {
        return Ok(false);
    };
    let file = open_append(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))?;
    Ok(true)
}
