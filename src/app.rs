//! Application context: identity, logging, hostname, and configuration.
//!
//! Constructed once at process start and passed by reference to anything that
//! needs it. Hostname and config are computed on first access and cached for
//! the life of the context.

use std::{
    path::{Path, PathBuf},
    process,
    sync::OnceLock,
};

use crate::{
    config::{self, LogSettings},
    constants::{FATAL_EXIT_CODE, LOG_FILE_SUFFIX},
    error::ToolkitError,
    logger::{ConsoleTarget, FileTarget, LogMessage, MultiLogger},
    shell::{self, RunOptions},
};

/// Process-wide application context.
pub struct App {
    name: String,
    config_dir: PathBuf,
    log: MultiLogger,
    hostname: OnceLock<String>,
    config: OnceLock<serde_yaml::Value>,
}

impl App {
    /// Creates a context for `name`, looking up its config and log files in
    /// `config_dir`.
    ///
    /// The logger fans out to a console target and a rotating file target
    /// named `<name>.log`. When `<name>.yaml` is present and parses, its
    /// optional `log:` section tunes both targets; config absence is not an
    /// error here, only once [`App::config`] is asked for.
    pub fn new(
        name: impl Into<String>,
        config_dir: impl Into<PathBuf>,
    ) -> Result<Self, ToolkitError> {
        let name = name.into();
        let config_dir = config_dir.into();

        let config = OnceLock::new();
        let settings = match config::load_config(&config::config_path(&name, &config_dir))
        {
            Ok(value) => {
                let settings = config::log_settings(&value);
                let _ = config.set(value);
                settings
            }
            Err(_) => LogSettings::default(),
        };

        let log = build_logger(&name, &config_dir, &settings)?;

        Ok(Self {
            name,
            config_dir,
            log,
            hostname: OnceLock::new(),
            config,
        })
    }

    /// Creates a context named after the current executable, rooted in the
    /// working directory.
    pub fn from_env() -> Result<Self, ToolkitError> {
        let name = std::env::args()
            .next()
            .map(PathBuf::from)
            .and_then(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "app".to_string());
        Self::new(name, ".")
    }

    /// The application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fan-out logger.
    pub fn log(&self) -> &MultiLogger {
        &self.log
    }

    /// Path of the config file this context reads.
    pub fn config_path(&self) -> PathBuf {
        config::config_path(&self.name, &self.config_dir)
    }

    /// The host name, shelled out once and cached.
    pub fn hostname(&self) -> Result<&str, ToolkitError> {
        if let Some(hostname) = self.hostname.get() {
            return Ok(hostname);
        }
        let hostname = shell::run("hostname", &RunOptions::default())?;
        Ok(self.hostname.get_or_init(|| hostname))
    }

    /// The parsed configuration, loaded once and cached.
    pub fn config(&self) -> Result<&serde_yaml::Value, ToolkitError> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }
        let config = config::load_config(&self.config_path())?;
        Ok(self.config.get_or_init(|| config))
    }

    /// The parsed configuration, or a fatal exit when it cannot be loaded.
    pub fn config_or_die(&self) -> &serde_yaml::Value {
        match self.config() {
            Ok(config) => config,
            Err(err) => self.die(err.to_string()),
        }
    }

    /// Logs a fatal message and terminates the process.
    pub fn die(&self, message: impl Into<LogMessage>) -> ! {
        self.log.fatal(message);
        process::exit(FATAL_EXIT_CODE);
    }
}

fn build_logger(
    name: &str,
    dir: &Path,
    settings: &LogSettings,
) -> Result<MultiLogger, ToolkitError> {
    let log_path = dir.join(format!("{name}{LOG_FILE_SUFFIX}"));
    let file = FileTarget::with_rotation(
        &log_path,
        settings.file_level,
        settings.rotate_size,
        settings.rotate_keep,
    )
    .map_err(|source| ToolkitError::LogOpen {
        path: log_path.display().to_string(),
        source,
    })?;
    let console = ConsoleTarget::new(settings.console_level);

    Ok(MultiLogger::new(vec![Box::new(console), Box::new(file)]))
}
