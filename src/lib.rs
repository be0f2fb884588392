//! Prockit is a minimal process-support toolkit for command-line programs.
//! It provides an application context with a singleton-like identity, a
//! fan-out logger delivering to a console target and a size-rotating file
//! target, YAML configuration loading, and a shell-command execution wrapper
//! that converts external process failures into structured errors.

/// Application context.
pub mod app;

/// CLI interface.
pub mod cli;

/// Command building.
pub mod command;

/// Configuration management.
pub mod config;

/// Shared constants.
pub mod constants;

/// Error handling.
pub mod error;

/// Fan-out logging.
pub mod logger;

/// Shell execution.
pub mod shell;
