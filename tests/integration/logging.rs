use std::{
    io,
    sync::{Arc, Mutex},
};

use prockit::logger::{FileTarget, LogMessage, LogTarget, MultiLogger, Severity};
use tempfile::tempdir;

/// Records every line it emits so tests can inspect delivery.
struct RecordingTarget {
    min_level: Mutex<Severity>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingTarget {
    fn new(min_level: Severity) -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let target = Self {
            min_level: Mutex::new(min_level),
            lines: Arc::clone(&lines),
        };
        (target, lines)
    }
}

impl LogTarget for RecordingTarget {
    fn emit(&self, severity: Severity, message: &LogMessage) -> io::Result<()> {
        if severity < *self.min_level.lock().unwrap() {
            return Ok(());
        }
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {}", severity.as_ref(), message.render()));
        Ok(())
    }

    fn set_min_level(&self, level: Severity) {
        *self.min_level.lock().unwrap() = level;
    }
}

/// A target whose sink always fails.
struct FailingTarget;

impl LogTarget for FailingTarget {
    fn emit(&self, _severity: Severity, _message: &LogMessage) -> io::Result<()> {
        Err(io::Error::other("sink offline"))
    }

    fn set_min_level(&self, _level: Severity) {}
}

#[test]
fn info_reaches_only_the_lower_threshold_target() {
    let (warn_target, warn_lines) = RecordingTarget::new(Severity::Warn);
    let (info_target, info_lines) = RecordingTarget::new(Severity::Info);
    let logger = MultiLogger::new(vec![Box::new(warn_target), Box::new(info_target)]);

    logger.info("routine");

    assert!(warn_lines.lock().unwrap().is_empty());
    assert_eq!(info_lines.lock().unwrap().as_slice(), ["INFO routine"]);
}

#[test]
fn warn_reaches_both_targets() {
    let (warn_target, warn_lines) = RecordingTarget::new(Severity::Warn);
    let (info_target, info_lines) = RecordingTarget::new(Severity::Info);
    let logger = MultiLogger::new(vec![Box::new(warn_target), Box::new(info_target)]);

    logger.warn("careful");

    assert_eq!(warn_lines.lock().unwrap().as_slice(), ["WARN careful"]);
    assert_eq!(info_lines.lock().unwrap().as_slice(), ["WARN careful"]);
}

#[test]
fn a_failing_target_does_not_block_its_siblings() {
    let (recording, lines) = RecordingTarget::new(Severity::Debug);
    let logger = MultiLogger::new(vec![Box::new(FailingTarget), Box::new(recording)]);

    logger.error("still delivered");

    assert_eq!(lines.lock().unwrap().as_slice(), ["ERROR still delivered"]);
}

#[test]
fn set_min_level_broadcasts_to_every_target() {
    let (first, first_lines) = RecordingTarget::new(Severity::Error);
    let (second, second_lines) = RecordingTarget::new(Severity::Warn);
    let logger = MultiLogger::new(vec![Box::new(first), Box::new(second)]);

    logger.set_min_level(Severity::Debug);
    logger.debug("now audible");

    assert_eq!(first_lines.lock().unwrap().len(), 1);
    assert_eq!(second_lines.lock().unwrap().len(), 1);
}

#[test]
fn structured_messages_never_embed_newlines() {
    let (recording, lines) = RecordingTarget::new(Severity::Debug);
    let logger = MultiLogger::new(vec![Box::new(recording)]);

    logger.info(serde_json::json!({
        "nested": { "list": [1, 2], "text": "a\nb" }
    }));

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].contains('\n'), "line not flat: {}", lines[0]);
}

#[test]
fn fan_out_delivers_to_file_and_memory_targets_independently() {
    let temp = tempdir().expect("failed to create tempdir");
    let path = temp.path().join("fanout.log");

    let file_target = FileTarget::new(&path, Severity::Info).unwrap();
    let (console_like, console_lines) = RecordingTarget::new(Severity::Warn);
    let logger = MultiLogger::new(vec![Box::new(console_like), Box::new(file_target)]);

    logger.info("to file only");
    logger.warn("to both");

    let file = std::fs::read_to_string(&path).unwrap();
    assert!(file.contains("|INFO] to file only"));
    assert!(file.contains("|WARN] to both"));

    let console = console_lines.lock().unwrap();
    assert_eq!(console.as_slice(), ["WARN to both"]);
}
