//! Log file retention management
//!
//! Handles cleanup of daily log files based on the date in their name.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{Days, Local, NaiveDate};

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up daily log files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> io::Result<usize> {
    cleanup_old_logs_with_retention(logs_dir, DEFAULT_RETENTION_DAYS)
}

/// Clean up daily log files older than the specified number of days
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs_with_retention(logs_dir: &Path, retention_days: u64) -> io::Result<usize> {
    cleanup_old_logs_before(logs_dir, retention_days, Local::now().date_naive())
}

/// Delete `YYYYMMDD.log` files dated more than `retention_days` before `today`
///
/// Files whose name is not a daily log file name are never touched.
pub fn cleanup_old_logs_before(
    logs_dir: &Path,
    retention_days: u64,
    today: NaiveDate,
) -> io::Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let cutoff = today
        .checked_sub_days(Days::new(retention_days))
        .unwrap_or(NaiveDate::MIN);

    let mut deleted_count = 0;

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(date) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_log_file_date)
        else {
            continue;
        };

        if date < cutoff && path.is_file() && fs::remove_file(&path).is_ok() {
            deleted_count += 1;
        }
    }

    Ok(deleted_count)
}

/// Date encoded in a daily log file name, e.g. `20240305.log`
pub fn parse_log_file_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".log")?;
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y%m%d").ok()
}
