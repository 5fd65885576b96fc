//! daylog - process-wide shared log sink with daily log files
//!
//! One shared sink per process writes every record to `<folder>/<YYYYMMDD>.log`
//! and to the console; `NamedLogger` handles tag records with a component name.
//!
//! ```no_run
//! use daylog::NamedLogger;
//!
//! # fn main() -> Result<(), daylog::LogError> {
//! let log = NamedLogger::create("worker", "logs")?;
//! log.info("started")?;
//! daylog::log_warning!(log, "queue at {}%", 90)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConsoleTarget, RolloverPolicy, SinkConfig};
pub use error::{LogError, Result, SinkKind};
pub use logging::{CallSite, Level, LogRecord, NamedLogger, SharedSink};
