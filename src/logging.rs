use crate::Result;
use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log specification used when `RUST_LOG` is not set, e.g. `"info"` or `"puct_mcts=trace"`
    pub spec: String,
    /// Log into rotating files in this directory instead of stderr
    pub directory: Option<PathBuf>,
    /// Rotate the current file once it reaches this size
    pub rotate_bytes: u64,
    /// Rotated files to keep
    pub keep_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            spec: "info".to_string(),
            directory: None,
            rotate_bytes: 10 * 1024 * 1024,
            keep_files: 1,
        }
    }
}

/// Starts the global logger. Keep the returned handle alive for as long as
/// logging is needed; dropping it flushes and shuts the logger down.
pub fn setup_logging(config: &LoggingConfig) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(&config.spec)?;

    let handle = match &config.directory {
        Some(directory) => logger
            .log_to_file(FileSpec::default().directory(directory))
            .format(opt_format)
            .rotate(
                Criterion::Size(config.rotate_bytes),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.keep_files),
            )
            .start()?,
        None => logger.log_to_stderr().format(colored_default_format).start()?,
    };

    Ok(handle)
}
