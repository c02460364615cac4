//! Configuration validation module
//!
//! This module provides validation functions for translator configuration
//! so that a bad setting is reported before any translation is loaded.

use tracing_subscriber::EnvFilter;
use crate::i18n::normalize::normalize_language_code;
use crate::i18n::selection::FileSelection;
use crate::utils::errors::{LexiconError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_translations_config(&settings.translations)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate translation configuration
fn validate_translations_config(config: &super::TranslationsConfig) -> Result<()> {
    if config.directory.trim().is_empty() {
        return Err(LexiconError::Config(
            "Translations directory is required".to_string()
        ));
    }

    if let Some(cache_directory) = &config.cache_directory {
        if cache_directory.trim().is_empty() {
            return Err(LexiconError::Config(
                "Cache directory must not be empty when set".to_string()
            ));
        }
    }

    for (name, code) in [("language", &config.language), ("fallback", &config.fallback)] {
        if let Some(code) = code {
            normalize_language_code(code).map_err(|_| {
                LexiconError::Config(format!("Invalid {} code: {:?}", name, code))
            })?;
        }
    }

    FileSelection::from_names(&config.files)
        .map_err(|e| LexiconError::Config(format!("Invalid translation file list: {}", e)))?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LexiconError::Config(
            "Log level is required".to_string()
        ));
    }

    // parsed the way init_logging parses it
    if let Err(e) = EnvFilter::try_new(&config.level) {
        return Err(LexiconError::Config(
            format!("Invalid log level {:?}: {}", config.level, e)
        ));
    }

    if config.directory.is_some() && config.file_name.is_empty() {
        return Err(LexiconError::Config(
            "Log file name is required when a log directory is set".to_string()
        ));
    }

    Ok(())
}
