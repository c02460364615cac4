//! Error handling for Lexicon
//!
//! This module defines the main error type used throughout the library
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("Invalid translation key: {0:?}")]
    InvalidKey(String),

    #[error("No current language has been set")]
    NoLanguageSelected,

    #[error("Translations directory unavailable: {0}")]
    TranslationsDirectoryUnavailable(String),

    #[error("Language directory \"{language}\" not found")]
    LanguageDirectoryMissing { language: String },

    #[error("Language directory \"{language}\" is not readable: {reason}")]
    LanguageDirectoryUnreadable { language: String, reason: String },

    #[error("Failed to compile language \"{language}\": {reason}")]
    Compilation { language: String, reason: String },

    #[error("Translations cache directory unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Cached language file \"{file}\" could not be read: {reason}")]
    CacheRead { file: String, reason: String },

    #[error("Cached language file \"{file}\" is incomplete or corrupted")]
    CacheCorrupted { file: String },

    #[error("Failed to write compiled language cache file \"{file}\": {reason}")]
    CacheWrite { file: String, reason: String },

    #[error("Translator instance already exists")]
    InstanceAlreadyCreated,

    #[error("Translator instance has not been created")]
    InstanceNotCreated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

impl LexiconError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors are the ones the registry and translator swallow
    /// (after reporting them) instead of failing the lookup.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LexiconError::InvalidLanguageCode(_) => false,
            LexiconError::InvalidKey(_) => false,
            LexiconError::NoLanguageSelected => false,
            LexiconError::TranslationsDirectoryUnavailable(_) => false,
            LexiconError::LanguageDirectoryMissing { .. } => true,
            LexiconError::LanguageDirectoryUnreadable { .. } => true,
            LexiconError::Compilation { .. } => true,
            LexiconError::CacheUnavailable(_) => false,
            LexiconError::CacheRead { .. } => true,
            LexiconError::CacheCorrupted { .. } => true,
            LexiconError::CacheWrite { .. } => true,
            LexiconError::InstanceAlreadyCreated => false,
            LexiconError::InstanceNotCreated => false,
            LexiconError::Config(_) => false,
            LexiconError::ConfigSource(_) => false,
            LexiconError::Yaml(_) => true,
            LexiconError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LexiconError::Config(_) => ErrorSeverity::Critical,
            LexiconError::ConfigSource(_) => ErrorSeverity::Critical,
            LexiconError::TranslationsDirectoryUnavailable(_) => ErrorSeverity::Critical,
            LexiconError::CacheUnavailable(_) => ErrorSeverity::Critical,
            LexiconError::InstanceAlreadyCreated => ErrorSeverity::Critical,
            LexiconError::CacheRead { .. } => ErrorSeverity::Warning,
            LexiconError::CacheCorrupted { .. } => ErrorSeverity::Warning,
            LexiconError::CacheWrite { .. } => ErrorSeverity::Warning,
            LexiconError::InvalidLanguageCode(_) => ErrorSeverity::Info,
            LexiconError::InvalidKey(_) => ErrorSeverity::Info,
            LexiconError::NoLanguageSelected => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
