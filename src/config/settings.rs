//! Translator settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from a `lexicon` configuration file and `LEXICON__*`
//! environment variables.

use serde::{Deserialize, Serialize};
use crate::utils::errors::{LexiconError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub translations: TranslationsConfig,
    pub logging: LoggingConfig,
}

/// Translation sources and language selection
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Root holding one sub-directory per language
    pub directory: String,
    /// Compiled cache root; caching is disabled when unset
    pub cache_directory: Option<String>,
    pub language: Option<String>,
    pub fallback: Option<String>,
    /// Source categories, in merge order (`dictionary`, `messages`,
    /// `sitemap`, `misc` or `custom:<name>`)
    pub files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub file_name: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("lexicon").required(false))
            .add_source(
                config::Environment::with_prefix("LEXICON")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("translations.files")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse settings from an inline TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| LexiconError::Config(format!("Invalid TOML configuration: {}", e)))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translations: TranslationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            directory: "translations".to_string(),
            cache_directory: None,
            language: Some("en".to_string()),
            fallback: None,
            files: vec!["dictionary".to_string(), "messages".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "lexicon.log".to_string(),
            json: false,
        }
    }
}
