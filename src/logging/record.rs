//! Log records and the fixed line template
//!
//! Every record renders as
//! `<timestamp> - <LEVEL> - <source file> - <function>(): <line> - <message>`.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write as _;
use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};

use super::level::Level;

/// Timestamp layout, e.g. `2024-03-05 14:30:45,123`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Placeholder for call-site fields that could not be determined
pub const UNKNOWN: &str = "<unknown>";

/// Where a log call was made from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSite {
    pub file: Option<&'static str>,
    pub function: Option<&'static str>,
    pub line: Option<u32>,
}

impl CallSite {
    /// A call site with nothing known about it
    pub const fn unknown() -> Self {
        Self {
            file: None,
            function: None,
            line: None,
        }
    }

    /// File and line of the caller (through any `#[track_caller]` frames)
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: Some(location.file()),
            function: None,
            line: Some(location.line()),
        }
    }

    pub fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }

    /// Basename of the source file
    pub fn file_name(&self) -> &'static str {
        match self.file {
            Some(file) => Path::new(file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(file),
            None => UNKNOWN,
        }
    }

    pub fn function_name(&self) -> &'static str {
        self.function.unwrap_or(UNKNOWN)
    }
}

/// A single record on its way to the sinks
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    /// Name of the logger that emitted the record
    pub name: &'a str,
    pub call_site: CallSite,
    pub message: &'a str,
    /// Error chain / backtrace appended after the message
    pub trace: Option<String>,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: Level, name: &'a str, message: &'a str, call_site: CallSite) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            name,
            call_site,
            message,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: String) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Render the record as one newline-terminated line (plus trace lines, if any)
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(96 + self.message.len());
        let _ = write!(
            line,
            "{} - {} - {} - {}(): {} - {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            self.call_site.file_name(),
            self.call_site.function_name(),
            self.call_site.line.unwrap_or(0),
            self.message,
        );
        if let Some(trace) = &self.trace {
            line.push('\n');
            line.push_str(trace);
        }
        line.push('\n');
        line
    }
}

/// Render an error, its source chain and (when enabled through
/// `RUST_BACKTRACE`) a backtrace of the logging call.
pub fn render_trace(err: &(dyn Error + 'static)) -> String {
    let mut out = format!("Error: {err}");

    let mut causes = std::iter::successors(err.source(), |&e| e.source()).peekable();
    if causes.peek().is_some() {
        out.push_str("\n\nCaused by:");
        for (i, cause) in causes.enumerate() {
            let _ = write!(out, "\n    {i}: {cause}");
        }
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "\n\nStack backtrace:\n{backtrace}");
    }

    out
}

/// Name of the function enclosing the macro call site, without its module path.
///
/// Closures resolve to the function they are defined in.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        name.rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(name)
    }};
}
