//! Logging system for daylog
//!
//! Provides the process-wide shared sink (daily file + console), named logger
//! handles, retention of old daily files and a `tracing` bridge.

mod bridge;
mod level;
mod logger;
mod macros;
mod record;
mod retention;
mod sink;

pub use bridge::{install_global, SinkLayer};
pub use level::Level;
pub use logger::NamedLogger;
pub use record::{render_trace, CallSite, LogRecord, TIMESTAMP_FORMAT, UNKNOWN};
pub use retention::{
    cleanup_old_logs, cleanup_old_logs_before, cleanup_old_logs_with_retention,
    parse_log_file_date, DEFAULT_RETENTION_DAYS,
};
pub use sink::{log_file_path, SharedSink};
