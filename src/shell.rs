//! Synchronous shell execution with structured failure classification.
//!
//! Both entry points block the calling thread until the child terminates.
//! There is no timeout and no cancellation; a hung child hangs the caller.

use std::{
    io::{self, Read},
    os::unix::process::ExitStatusExt,
    process::{self, ExitStatus, Stdio},
};

use tracing::debug;

use crate::{
    command::Command,
    constants::{DEFAULT_SHELL, SHELL_COMMAND_FLAG},
    error::{ShellError, ToolkitError},
};

/// How a spawned process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationStatus {
    /// The process exited normally with the given code.
    Exited(i32),
    /// The process was terminated by the given signal.
    Signaled(i32),
}

impl TerminationStatus {
    /// The raw exit code for a normal termination.
    pub fn code(&self) -> Option<i32> {
        match self {
            TerminationStatus::Exited(code) => Some(*code),
            TerminationStatus::Signaled(_) => None,
        }
    }

    /// Whether this status counts as success given the caller's allow-list.
    ///
    /// Zero is always allowed. Signal terminations never match the allow-list;
    /// it compares raw exit codes of normally-exited processes only.
    fn is_allowed(&self, ignore_codes: &[i32]) -> bool {
        match self {
            TerminationStatus::Exited(0) => true,
            TerminationStatus::Exited(code) => ignore_codes.contains(code),
            TerminationStatus::Signaled(_) => false,
        }
    }
}

impl From<ExitStatus> for TerminationStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => TerminationStatus::Exited(code),
            None => TerminationStatus::Signaled(status.signal().unwrap_or(-1)),
        }
    }
}

impl std::fmt::Display for TerminationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationStatus::Exited(code) => write!(f, "{code}"),
            TerminationStatus::Signaled(signal) => write!(f, "signal {signal}"),
        }
    }
}

/// Options for [`run`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Exit codes, beyond 0, to treat as success.
    pub ignore_codes: Vec<i32>,
}

/// Runs a command, capturing its combined stdout and stderr.
///
/// The child's stderr is redirected into its stdout at the file descriptor
/// level, so the capture preserves interleaving. A single trailing newline is
/// stripped from the captured text. If the exit status is 0 or listed in
/// `options.ignore_codes`, the captured text is returned; otherwise a
/// [`ShellError`] carrying the command, status, and output is returned.
pub fn run(
    command: impl Into<Command>,
    options: &RunOptions,
) -> Result<String, ToolkitError> {
    let cmd = command.into().build();
    debug!("Running shell command: `{cmd}`");

    let spawn_err = |source: io::Error| ToolkitError::CommandSpawn {
        command: cmd.clone(),
        source,
    };

    let (mut reader, writer) = io::pipe().map_err(spawn_err)?;
    let writer_clone = writer.try_clone().map_err(spawn_err)?;

    // The Command temporary drops its copies of the write ends right after
    // spawn, so the reader sees EOF once the child exits.
    let mut child = process::Command::new(DEFAULT_SHELL)
        .arg(SHELL_COMMAND_FLAG)
        .arg(&cmd)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(writer_clone)
        .spawn()
        .map_err(spawn_err)?;

    let mut captured = Vec::new();
    reader.read_to_end(&mut captured).map_err(spawn_err)?;
    let status: TerminationStatus = child.wait().map_err(spawn_err)?.into();

    let output = chomp(&String::from_utf8_lossy(&captured)).to_string();
    debug!("Command `{cmd}` finished with status {status}");

    if status.is_allowed(&options.ignore_codes) {
        Ok(output)
    } else {
        Err(ShellError::new(cmd, status, Some(output)).into())
    }
}

/// Runs a command with the caller's own standard streams.
///
/// The subprocess's output is visible immediately, making this suitable for
/// interactive commands. Any non-zero exit status is an error; there is no
/// allow-list for this mode.
pub fn exec(command: impl Into<Command>) -> Result<(), ToolkitError> {
    let cmd = command.into().build();
    debug!("Executing shell command: `{cmd}`");

    let status: TerminationStatus = process::Command::new(DEFAULT_SHELL)
        .arg(SHELL_COMMAND_FLAG)
        .arg(&cmd)
        .status()
        .map_err(|source| ToolkitError::CommandSpawn {
            command: cmd.clone(),
            source,
        })?
        .into();

    if status == TerminationStatus::Exited(0) {
        Ok(())
    } else {
        Err(ShellError::new(cmd, status, None).into())
    }
}

/// Whether the current process has a controlling terminal.
pub fn interactive() -> bool {
    exec("tty -s").is_ok()
}

/// Strips a single trailing newline, `\n` or `\r\n`.
fn chomp(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}
