//! Error handling for prockit.
use std::fmt;

use thiserror::Error;

use crate::shell::TerminationStatus;

/// A command exited with a status outside the caller's allow-list.
///
/// Carries the exact command string that was executed, how the process
/// terminated, and the captured output when the command ran in captured mode.
/// The output participates in the rendered message only; programmatic matching
/// should use `command` and `status`.
#[derive(Debug, Clone)]
pub struct ShellError {
    /// The built command string that was executed.
    pub command: String,
    /// How the spawned process terminated.
    pub status: TerminationStatus,
    /// Combined output captured from the process, if it was captured at all.
    pub output: Option<String>,
}

impl ShellError {
    /// Creates a new error from the failure site's observations.
    pub fn new(
        command: impl Into<String>,
        status: TerminationStatus,
        output: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            status,
            output,
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command {} exited with code {}", self.command, self.status)?;
        if let Some(output) = &self.output {
            write!(f, " and output {output}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShellError {}

/// Defines all possible errors that can occur in the toolkit.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// A command exited with a disallowed status.
    #[error(transparent)]
    Shell(#[from] ShellError),

    /// The command could not be executed at all (spawn, pipe, or wait failure).
    #[error("Failed to execute command '{command}': {source}")]
    CommandSpawn {
        /// The built command string that failed to execute.
        command: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error reading or accessing a configuration file.
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Error parsing YAML configuration.
    #[error("Invalid YAML format: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// The configuration file does not exist.
    #[error("Config file {path} not found")]
    ConfigMissing {
        /// Path that was looked up.
        path: String,
    },

    /// The file log target could not be opened.
    #[error("Failed to open log file '{path}': {source}")]
    LogOpen {
        /// Path of the log file.
        path: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },
}
