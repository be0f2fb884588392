//! Fan-out logging: one call delivered to every configured target.

use std::{
    borrow::Cow,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Local;
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumString};

use crate::constants::{LOG_ROTATE_KEEP, LOG_ROTATE_SIZE, LOG_TIMESTAMP_FORMAT};

/// Log severities, ordered from least to most severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Deserialize,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// A message handed to the logger.
///
/// Text is emitted verbatim. Structured data is rendered as compact
/// single-line JSON so nested maps and sequences never put an unescaped
/// newline into a line-oriented sink.
#[derive(Debug, Clone)]
pub enum LogMessage {
    /// Plain text, emitted as-is.
    Text(String),
    /// Structured data, rendered through a compact JSON representation.
    Data(serde_json::Value),
}

impl LogMessage {
    /// Renders the message body for a log line.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            LogMessage::Text(text) => Cow::Borrowed(text),
            LogMessage::Data(value) => Cow::Owned(value.to_string()),
        }
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl From<serde_json::Value> for LogMessage {
    fn from(value: serde_json::Value) -> Self {
        LogMessage::Data(value)
    }
}

/// Formats one log line: `[<timestamp>|<SEVERITY>] <message>` plus a newline.
fn format_line(severity: Severity, message: &LogMessage) -> String {
    format!(
        "[{}|{}] {}\n",
        Local::now().format(LOG_TIMESTAMP_FORMAT),
        severity.as_ref(),
        message.render()
    )
}

/// A single logging destination with its own threshold and sink.
///
/// Implementations must be internally thread-safe (e.g. an internal write
/// lock); [`MultiLogger`] does not coordinate access across threads.
pub trait LogTarget: Send + Sync {
    /// Writes the message if it meets this target's minimum severity.
    fn emit(&self, severity: Severity, message: &LogMessage) -> io::Result<()>;

    /// Replaces this target's minimum severity.
    fn set_min_level(&self, level: Severity);
}

/// Log target writing formatted lines to stderr.
pub struct ConsoleTarget {
    min_level: Mutex<Severity>,
}

impl ConsoleTarget {
    /// Creates a console target with the given threshold.
    pub fn new(min_level: Severity) -> Self {
        Self {
            min_level: Mutex::new(min_level),
        }
    }
}

impl LogTarget for ConsoleTarget {
    fn emit(&self, severity: Severity, message: &LogMessage) -> io::Result<()> {
        if severity < *self.min_level.lock().unwrap() {
            return Ok(());
        }
        let line = format_line(severity, message);
        io::stderr().lock().write_all(line.as_bytes())
    }

    fn set_min_level(&self, level: Severity) {
        *self.min_level.lock().unwrap() = level;
    }
}

/// Log target appending to a file, rotating once a size threshold is reached.
///
/// Rotation shifts `<path>.0` to `<path>.1` and the live file to `<path>.0`,
/// retaining `keep` generations.
pub struct FileTarget {
    min_level: Mutex<Severity>,
    sink: Mutex<FileSink>,
}

struct FileSink {
    path: PathBuf,
    file: File,
    size: u64,
    max_size: u64,
    keep: usize,
}

impl FileTarget {
    /// Opens a file target with the default rotation parameters.
    pub fn new(path: impl Into<PathBuf>, min_level: Severity) -> io::Result<Self> {
        Self::with_rotation(path, min_level, LOG_ROTATE_SIZE, LOG_ROTATE_KEEP)
    }

    /// Opens a file target with explicit rotation size and generation count.
    pub fn with_rotation(
        path: impl Into<PathBuf>,
        min_level: Severity,
        max_size: u64,
        keep: usize,
    ) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            min_level: Mutex::new(min_level),
            sink: Mutex::new(FileSink {
                path,
                file,
                size,
                max_size,
                keep,
            }),
        })
    }
}

impl LogTarget for FileTarget {
    fn emit(&self, severity: Severity, message: &LogMessage) -> io::Result<()> {
        if severity < *self.min_level.lock().unwrap() {
            return Ok(());
        }
        let line = format_line(severity, message);
        self.sink.lock().unwrap().write(&line)
    }

    fn set_min_level(&self, level: Severity) {
        *self.min_level.lock().unwrap() = level;
    }
}

impl FileSink {
    fn write(&mut self, line: &str) -> io::Result<()> {
        if self.size > 0 && self.size + line.len() as u64 > self.max_size {
            self.rotate()?;
        }
        self.file.write_all(line.as_bytes())?;
        self.size += line.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        for index in (0..self.keep.saturating_sub(1)).rev() {
            let from = self.generation_path(index);
            if from.exists() {
                fs::rename(&from, self.generation_path(index + 1))?;
            }
        }
        if self.keep > 0 {
            fs::rename(&self.path, self.generation_path(0))?;
        } else {
            fs::remove_file(&self.path)?;
        }
        self.file = open_append(&self.path)?;
        self.size = 0;
        Ok(())
    }

    fn generation_path(&self, index: usize) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(format!(".{index}"));
        PathBuf::from(os)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}

/// Fans a single logging call out to every registered target.
///
/// Targets are dispatched in registration order. A target whose sink fails
/// must not prevent delivery to the remaining targets, so per-target errors
/// are swallowed here. The target set is fixed for the logger's lifetime.
pub struct MultiLogger {
    targets: Vec<Box<dyn LogTarget>>,
}

impl MultiLogger {
    /// Creates a logger over a fixed, ordered set of targets.
    pub fn new(targets: Vec<Box<dyn LogTarget>>) -> Self {
        Self { targets }
    }

    /// Dispatches one message to every target.
    pub fn log(&self, severity: Severity, message: impl Into<LogMessage>) {
        let message = message.into();
        for target in &self.targets {
            // Delivery to each target is independent; a failing sink must not
            // abort delivery to its siblings.
            let _ = target.emit(severity, &message);
        }
    }

    /// Logs at [`Severity::Debug`].
    pub fn debug(&self, message: impl Into<LogMessage>) {
        self.log(Severity::Debug, message);
    }

    /// Logs at [`Severity::Info`].
    pub fn info(&self, message: impl Into<LogMessage>) {
        self.log(Severity::Info, message);
    }

    /// Logs at [`Severity::Warn`].
    pub fn warn(&self, message: impl Into<LogMessage>) {
        self.log(Severity::Warn, message);
    }

    /// Logs at [`Severity::Error`].
    pub fn error(&self, message: impl Into<LogMessage>) {
        self.log(Severity::Error, message);
    }

    /// Logs at [`Severity::Fatal`].
    pub fn fatal(&self, message: impl Into<LogMessage>) {
        self.log(Severity::Fatal, message);
    }

    /// Broadcasts a new minimum severity to every target identically.
    pub fn set_min_level(&self, level: Severity) {
        for target in &self.targets {
            target.set_min_level(level);
        }
    }
}
