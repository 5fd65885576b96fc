//! The global sink is built once per process; this file holds a single test
//! because the global slot is shared by every test in the binary.

use std::sync::{Arc, Barrier};
use std::thread;

use daylog::{NamedLogger, SharedSink};
use tempfile::TempDir;

#[test]
fn test_first_folder_wins_under_concurrent_first_use() {
    let temp_dir = TempDir::new().unwrap();
    let candidates: Vec<_> = (0..8)
        .map(|i| temp_dir.path().join(format!("logs-{i}")))
        .collect();
    assert!(SharedSink::global().is_none());

    let barrier = Arc::new(Barrier::new(candidates.len()));
    let handles: Vec<_> = candidates
        .iter()
        .cloned()
        .map(|folder| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                SharedSink::get_or_create(folder).unwrap()
            })
        })
        .collect();
    let sinks: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Every caller got the same instance
    for sink in &sinks[1..] {
        assert!(Arc::ptr_eq(&sinks[0], sink));
    }

    // Only the winning folder was ever created
    let active = sinks[0].folder().to_path_buf();
    assert!(candidates.contains(&active));
    let created: Vec<_> = candidates.iter().filter(|c| c.exists()).collect();
    assert_eq!(created, [&active]);

    // Later loggers asking for another folder reuse the sink silently
    let elsewhere = temp_dir.path().join("ignored");
    let logger = NamedLogger::create("late", &elsewhere).unwrap();
    assert!(Arc::ptr_eq(logger.sink(), &sinks[0]));
    assert!(!elsewhere.exists());

    logger.info("written to the first folder").unwrap();
    let text = std::fs::read_to_string(sinks[0].current_path()).unwrap();
    assert!(text.contains("written to the first folder"));
    assert!(sinks[0].current_path().starts_with(&active));

    let global = SharedSink::global().unwrap();
    assert!(Arc::ptr_eq(&global, &sinks[0]));
}
