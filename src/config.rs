//! Configuration for the shared log sink
//!
//! The crate never reads configuration files itself; `SinkConfig` derives
//! serde so host applications can embed it in their own config.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::logging::Level;

/// Console stream the sink mirrors every record to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// What happens when the calendar date changes while the process runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolloverPolicy {
    /// Switch to `<folder>/<new date>.log` on the first record of the new day
    #[default]
    Daily,
    /// Keep writing to the file chosen at start-up for the process lifetime
    Frozen,
}

/// Shared sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Base directory for the daily log files; a leading `~` is expanded
    #[serde(deserialize_with = "deserialize_folder")]
    pub folder: PathBuf,

    /// Console stream: "stderr" (default) or "stdout"
    #[serde(default)]
    pub console: ConsoleTarget,

    /// Daily rollover (default) or the frozen start-up file
    #[serde(default)]
    pub rollover: RolloverPolicy,

    /// Records below this level are dropped (default: debug, everything passes)
    #[serde(default)]
    pub min_level: Level,

    /// Delete daily files older than this many days (default: keep everything)
    #[serde(default)]
    pub retention_days: Option<u64>,
}

impl SinkConfig {
    /// Default configuration writing into `folder`
    ///
    /// A leading `~` is expanded to the home directory.
    pub fn new(folder: impl AsRef<Path>) -> Self {
        Self {
            folder: expand_folder(folder.as_ref()),
            console: ConsoleTarget::default(),
            rollover: RolloverPolicy::default(),
            min_level: Level::default(),
            retention_days: None,
        }
    }

    pub fn console(mut self, console: ConsoleTarget) -> Self {
        self.console = console;
        self
    }

    pub fn rollover(mut self, rollover: RolloverPolicy) -> Self {
        self.rollover = rollover;
        self
    }

    pub fn min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn retention_days(mut self, days: u64) -> Self {
        self.retention_days = Some(days);
        self
    }
}

fn deserialize_folder<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let folder = PathBuf::deserialize(deserializer)?;
    Ok(expand_folder(&folder))
}

/// Expand a leading `~` in a folder path; other paths are returned as-is
pub(crate) fn expand_folder(folder: &Path) -> PathBuf {
    match folder.to_str() {
        Some(s) if s.starts_with('~') => match shellexpand::tilde(s) {
            Cow::Borrowed(b) => PathBuf::from(b),
            Cow::Owned(o) => PathBuf::from(o),
        },
        _ => folder.to_path_buf(),
    }
}
