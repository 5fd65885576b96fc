//! The process-wide shared sink
//!
//! One `SharedSink` owns the day's log file and the console stream. The
//! global instance is built lazily by the first `get_or_create` call and
//! handed out as an `Arc`; standalone sinks can be opened with
//! [`SharedSink::open`] and injected explicitly.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, NaiveDate};

use super::level::Level;
use super::record::{render_trace, CallSite, LogRecord};
use super::retention;
use crate::config::{expand_folder, ConsoleTarget, RolloverPolicy, SinkConfig};
use crate::error::{LogError, Result, SinkKind};

/// Slot holding the global sink once it has been initialized
static SHARED: Mutex<Option<Arc<SharedSink>>> = Mutex::new(None);

/// Path of the log file for `date`: `<folder>/<YYYYMMDD>.log`
pub fn log_file_path(folder: &Path, date: NaiveDate) -> PathBuf {
    folder.join(format!("{}.log", date.format("%Y%m%d")))
}

/// Console half of the sink
enum Console {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

impl Console {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match self {
            Console::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(line)?;
                out.flush()
            }
            Console::Stderr => {
                let mut out = io::stderr().lock();
                out.write_all(line)?;
                out.flush()
            }
            Console::Writer(writer) => {
                writer.write_all(line)?;
                writer.flush()
            }
        }
    }
}

impl From<ConsoleTarget> for Console {
    fn from(target: ConsoleTarget) -> Self {
        match target {
            ConsoleTarget::Stdout => Console::Stdout,
            ConsoleTarget::Stderr => Console::Stderr,
        }
    }
}

/// Mutable state, guarded as a whole so a record is written to both sinks
/// before the next one starts
struct SinkState {
    date: NaiveDate,
    path: PathBuf,
    file: File,
    console: Console,
}

/// Shared file + console sink
pub struct SharedSink {
    config: SinkConfig,
    state: Mutex<SinkState>,
}

impl SharedSink {
    /// Return the global sink, creating it on the first call.
    ///
    /// `folder` only matters for the call that performs initialization; later
    /// calls get the existing sink whatever folder they pass. If
    /// initialization fails nothing is stored and the next call tries again.
    pub fn get_or_create(folder: impl AsRef<Path>) -> Result<Arc<Self>> {
        Self::get_or_create_with(SinkConfig::new(folder))
    }

    /// Like [`get_or_create`](Self::get_or_create) with a full configuration
    pub fn get_or_create_with(config: SinkConfig) -> Result<Arc<Self>> {
        let mut slot = SHARED.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(sink) = slot.as_ref() {
            if sink.config.folder != config.folder {
                tracing::debug!(
                    requested = %config.folder.display(),
                    active = %sink.config.folder.display(),
                    "log sink already initialized, ignoring requested folder"
                );
            }
            return Ok(Arc::clone(sink));
        }

        let sink = Arc::new(Self::open(config)?);
        *slot = Some(Arc::clone(&sink));
        Ok(sink)
    }

    /// The global sink, if it has been initialized
    pub fn global() -> Option<Arc<Self>> {
        SHARED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    /// Open a standalone sink that is not registered as the global one
    pub fn open(config: SinkConfig) -> Result<Self> {
        let console = Console::from(config.console);
        Self::open_at(config, console, Local::now())
    }

    /// Open a standalone sink mirroring records to `writer` instead of stdout/stderr
    pub fn with_console_writer(
        config: SinkConfig,
        writer: impl Write + Send + 'static,
    ) -> Result<Self> {
        Self::open_at(config, Console::Writer(Box::new(writer)), Local::now())
    }

    fn open_at(mut config: SinkConfig, console: Console, now: DateTime<Local>) -> Result<Self> {
        config.folder = expand_folder(&config.folder);
        let date = now.date_naive();
        let (path, file) = open_day_file(&config.folder, date)?;

        if let Some(days) = config.retention_days {
            run_retention(&config.folder, days, date);
        }

        tracing::debug!(path = %path.display(), "log sink opened");

        Ok(Self {
            config,
            state: Mutex::new(SinkState {
                date,
                path,
                file,
                console,
            }),
        })
    }

    /// Base directory of the log files
    pub fn folder(&self) -> &Path {
        &self.config.folder
    }

    pub fn min_level(&self) -> Level {
        self.config.min_level
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Path of the file records are currently appended to
    pub fn current_path(&self) -> PathBuf {
        self.lock_state().path.clone()
    }

    /// Format one record and write it to the file and the console
    pub fn dispatch(
        &self,
        name: &str,
        level: Level,
        message: &str,
        call_site: CallSite,
    ) -> Result<()> {
        self.dispatch_record(&LogRecord::new(level, name, message, call_site))
    }

    /// Dispatch an `ERROR` record with `err`'s cause chain appended
    pub fn dispatch_error(
        &self,
        name: &str,
        message: &str,
        call_site: CallSite,
        err: &(dyn Error + 'static),
    ) -> Result<()> {
        let record =
            LogRecord::new(Level::Error, name, message, call_site).with_trace(render_trace(err));
        self.dispatch_record(&record)
    }

    /// Write an already built record.
    ///
    /// Both sinks are attempted; the file error wins if both fail. A failed
    /// rollover is reported after the record has been written to the
    /// previous day's file and the console. A failed write leaves the sink
    /// usable.
    pub fn dispatch_record(&self, record: &LogRecord<'_>) -> Result<()> {
        if record.level < self.config.min_level {
            return Ok(());
        }

        let line = record.render();
        let mut state = self.lock_state();

        let rollover = if self.config.rollover == RolloverPolicy::Daily {
            self.roll_over_if_needed(&mut state, record.timestamp.date_naive())
        } else {
            Ok(None)
        };

        let SinkState { file, console, .. } = &mut *state;
        let file_result = write_file_line(file, line.as_bytes()).map_err(|source| {
            LogError::WriteFailure {
                sink: SinkKind::File,
                source,
            }
        });
        let console_result =
            console
                .write_line(line.as_bytes())
                .map_err(|source| LogError::WriteFailure {
                    sink: SinkKind::Console,
                    source,
                });
        drop(state);

        // Directory scans stay outside the state lock
        let rolled_to = rollover?;
        if let (Some(date), Some(days)) = (rolled_to, self.config.retention_days) {
            run_retention(&self.config.folder, days, date);
        }

        file_result.and(console_result)
    }

    /// Swap to the file for `date` if it is later than the open one.
    ///
    /// Only rolls forward: a record stamped just before midnight that loses
    /// the lock race to one stamped after it goes to the newer file. On
    /// failure the previous file stays open and the next record retries.
    /// Returns the new date when a rollover happened.
    fn roll_over_if_needed(
        &self,
        state: &mut SinkState,
        date: NaiveDate,
    ) -> Result<Option<NaiveDate>> {
        if date <= state.date {
            return Ok(None);
        }

        let (path, file) = open_day_file(&self.config.folder, date)?;
        tracing::info!(
            from = %state.path.display(),
            to = %path.display(),
            "log sink rolled over"
        );
        state.date = date;
        state.path = path;
        state.file = file;
        Ok(Some(date))
    }

    fn lock_state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink")
            .field("config", &self.config)
            .field("path", &self.current_path())
            .finish()
    }
}

/// Create `folder` if needed and open the log file for `date` for appending
fn open_day_file(folder: &Path, date: NaiveDate) -> Result<(PathBuf, File)> {
    let path = log_file_path(folder, date);
    let init_err = |source: io::Error| LogError::SinkInitialization {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(folder).map_err(init_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(init_err)?;

    Ok((path, file))
}

fn write_file_line(file: &mut File, line: &[u8]) -> io::Result<()> {
    file.write_all(line)?;
    file.flush()
}

fn run_retention(folder: &Path, days: u64, today: NaiveDate) {
    match retention::cleanup_old_logs_before(folder, days, today) {
        Ok(0) => {}
        Ok(count) => tracing::info!("Cleaned up {} old log files", count),
        Err(e) => tracing::warn!(error = %e, "log retention cleanup failed"),
    }
}
