//! Dispatch behavior on standalone sinks

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::Local;
use daylog::logging::log_file_path;
use daylog::{LogError, NamedLogger, SharedSink, SinkConfig, SinkKind};
use tempfile::TempDir;

fn quiet_sink(folder: &std::path::Path) -> Arc<SharedSink> {
    Arc::new(SharedSink::with_console_writer(SinkConfig::new(folder), io::sink()).unwrap())
}

/// Console writer that fails while `failing` is set
struct Switchable {
    failing: Arc<AtomicBool>,
}

impl Write for Switchable {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failing.load(Ordering::SeqCst) {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        } else {
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_daily_file_name_in_folder() {
    let temp_dir = TempDir::new().unwrap();
    let sink = quiet_sink(temp_dir.path());

    let expected = log_file_path(temp_dir.path(), Local::now().date_naive());
    let name = expected.file_name().unwrap().to_str().unwrap().to_string();

    assert_eq!(sink.current_path(), expected);
    assert_eq!(name.len(), "YYYYMMDD.log".len());
    assert!(name[..8].bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn test_concurrent_writers_produce_whole_lines() {
    let temp_dir = TempDir::new().unwrap();
    let sink = quiet_sink(temp_dir.path());
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|t| {
            let logger = NamedLogger::with_sink(format!("writer-{t}"), Arc::clone(&sink));
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1000 {
                    logger.info(&format!("writer {t} message {i}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let text = fs::read_to_string(sink.current_path()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2000);

    let mut seen = HashSet::new();
    let mut next = [0usize; 2];
    for line in &lines {
        assert_eq!(line.matches(" - INFO - ").count(), 1, "mixed line: {line}");
        let message = line.rsplit(" - ").next().unwrap();
        let parts: Vec<_> = message.split(' ').collect();
        assert_eq!(parts.len(), 4, "mangled message: {line}");
        let t: usize = parts[1].parse().unwrap();
        let i: usize = parts[3].parse().unwrap();

        // Per-writer order is preserved
        assert_eq!(i, next[t]);
        next[t] += 1;
        assert!(seen.insert(message.to_string()));
    }
    assert_eq!(next, [1000, 1000]);
}

#[test]
fn test_write_failure_propagates_and_sink_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let failing = Arc::new(AtomicBool::new(true));
    let sink = SharedSink::with_console_writer(
        SinkConfig::new(temp_dir.path()),
        Switchable {
            failing: Arc::clone(&failing),
        },
    )
    .unwrap();
    let logger = NamedLogger::with_sink("app", Arc::new(sink));

    let err = logger.error("something").unwrap_err();
    match err {
        LogError::WriteFailure { sink, source } => {
            assert_eq!(sink, SinkKind::Console);
            assert_eq!(source.to_string(), "no space left on device");
        }
        other => panic!("expected WriteFailure, got {other:?}"),
    }

    failing.store(false, Ordering::SeqCst);
    logger.info("still works").unwrap();

    let text = fs::read_to_string(logger.sink().current_path()).unwrap();
    assert!(text.contains(" - ERROR - "));
    assert!(text.contains("still works"));
}

#[test]
fn test_loggers_with_the_same_name_coexist() {
    let temp_dir = TempDir::new().unwrap();
    let sink = quiet_sink(temp_dir.path());
    let first = NamedLogger::with_sink("shared-name", Arc::clone(&sink));
    let second = NamedLogger::with_sink("shared-name", Arc::clone(&sink));

    first.warning("from first").unwrap();
    second.warning("from second").unwrap();

    let text = fs::read_to_string(sink.current_path()).unwrap();
    assert_eq!(text.lines().count(), 2);
}
