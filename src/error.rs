//! Error types for the shared log sink

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two sinks a write failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    File,
    Console,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::File => "file",
            SinkKind::Console => "console",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the shared sink and the loggers bound to it
#[derive(Debug, Error)]
pub enum LogError {
    /// The log directory or the day's log file could not be created/opened.
    ///
    /// Nothing is cached after this error: the next attempt starts over.
    #[error("couldn't create/open log file \"{}\", check permissions", path.display())]
    SinkInitialization {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record could not be written after the sink was initialized.
    ///
    /// The sink stays usable for later calls.
    #[error("failed to write log record to the {sink} sink")]
    WriteFailure {
        sink: SinkKind,
        #[source]
        source: io::Error,
    },
}

impl LogError {
    /// Path of the log file that could not be opened, if this is an init error
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LogError::SinkInitialization { path, .. } => Some(path),
            LogError::WriteFailure { .. } => None,
        }
    }

    /// Underlying IO error
    pub fn io_error(&self) -> &io::Error {
        match self {
            LogError::SinkInitialization { source, .. } => source,
            LogError::WriteFailure { source, .. } => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
