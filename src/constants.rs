//! Constants shared across the toolkit.

// ============================================================================
// Shell Execution Constants
// ============================================================================

/// Shell used for executing commands.
pub const DEFAULT_SHELL: &str = "sh";

/// Shell argument flag for executing command strings.
pub const SHELL_COMMAND_FLAG: &str = "-c";

// ============================================================================
// Logging Constants
// ============================================================================

/// Timestamp format used in rendered log lines.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Size threshold at which the file log target rotates.
pub const LOG_ROTATE_SIZE: u64 = 1_024_000;

/// Number of rotated log generations retained.
pub const LOG_ROTATE_KEEP: usize = 2;

/// Suffix appended to the application name to form the log file name.
pub const LOG_FILE_SUFFIX: &str = ".log";

// ============================================================================
// Configuration Constants
// ============================================================================

/// Suffix appended to the application name to form the config file name.
pub const CONFIG_FILE_SUFFIX: &str = ".yaml";

/// Exit code used by [`crate::app::App::die`], reserved for fatal startup
/// conditions such as a missing config file.
pub const FATAL_EXIT_CODE: i32 = 2;
