//! Named logger handles
//!
//! A `NamedLogger` is a cheap, cloneable handle that tags every record with
//! its component name and forwards it to the shared sink.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use super::level::Level;
use super::record::CallSite;
use super::sink::SharedSink;
use crate::error::Result;

/// Logger bound to a component name and the shared sink
#[derive(Debug, Clone)]
pub struct NamedLogger {
    name: String,
    sink: Arc<SharedSink>,
}

impl NamedLogger {
    /// Create a logger on the global sink, initializing it in `folder` if
    /// this is the first logger of the process.
    ///
    /// Fails only when the global sink has to be initialized and cannot be.
    pub fn create(name: impl Into<String>, folder: impl AsRef<Path>) -> Result<Self> {
        let sink = SharedSink::get_or_create(folder)?;
        Ok(Self::with_sink(name, sink))
    }

    /// Create a logger on an explicitly provided sink
    pub fn with_sink(name: impl Into<String>, sink: Arc<SharedSink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Arc<SharedSink> {
        &self.sink
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) -> Result<()> {
        self.log_at(Level::Debug, msg, CallSite::caller())
    }

    #[track_caller]
    pub fn info(&self, msg: &str) -> Result<()> {
        self.log_at(Level::Info, msg, CallSite::caller())
    }

    #[track_caller]
    pub fn warning(&self, msg: &str) -> Result<()> {
        self.log_at(Level::Warning, msg, CallSite::caller())
    }

    /// Log at `ERROR` level. Use [`error_with`](Self::error_with) to include
    /// the error that caused it.
    #[track_caller]
    pub fn error(&self, msg: &str) -> Result<()> {
        self.log_at(Level::Error, msg, CallSite::caller())
    }

    /// Log at `ERROR` level with `err`, its causes and (if enabled) a
    /// backtrace appended after the message
    #[track_caller]
    pub fn error_with(&self, msg: &str, err: &(dyn Error + 'static)) -> Result<()> {
        self.sink
            .dispatch_error(&self.name, msg, CallSite::caller(), err)
    }

    #[track_caller]
    pub fn log(&self, level: Level, msg: &str) -> Result<()> {
        self.log_at(level, msg, CallSite::caller())
    }

    /// Log with an explicit call site; used by the logging macros
    pub fn log_at(&self, level: Level, msg: &str, call_site: CallSite) -> Result<()> {
        self.sink.dispatch(&self.name, level, msg, call_site)
    }

    /// `error_with` with an explicit call site; used by the logging macros
    pub fn error_with_at(
        &self,
        msg: &str,
        err: &(dyn Error + 'static),
        call_site: CallSite,
    ) -> Result<()> {
        self.sink.dispatch_error(&self.name, msg, call_site, err)
    }
}
