//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for applications embedding Lexicon.

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{LexiconError, Result};

/// Initialize logging based on configuration
///
/// Returns the guard of the file writer when a log directory is configured;
/// keep it alive for as long as logs should be flushed to disk.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LexiconError::Config(format!("Invalid log filter {:?}: {}", config.level, e)))?;

    let stdout_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_ansi(false).with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| LexiconError::Config(format!("Failed to install logging subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a freshly compiled language table
pub fn log_language_compiled(language: &str, group: &str, keys: usize, files: usize, warnings: usize) {
    info!(
        language = language,
        group = group,
        keys = keys,
        files = files,
        warnings = warnings,
        "Language compiled"
    );
}

/// Log the outcome of a compiled cache lookup
pub fn log_cache_lookup(language: &str, group: &str, hit: bool) {
    debug!(
        language = language,
        group = group,
        hit = hit,
        "Compiled cache lookup"
    );
}
