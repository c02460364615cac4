//! Lexicon translation lookup library
//!
//! Compiles hierarchical YAML translation sources into flat per-language
//! tables, caches compiled tables on disk and resolves dotted keys with
//! fallback to a secondary language.
//!
//! ```no_run
//! use Lexicon::{FileSelection, Translator};
//!
//! # fn main() -> Lexicon::Result<()> {
//! let translator = Translator::builder("translations")
//!     .with_cache_directory("/var/cache/lexicon")
//!     .with_selection(FileSelection::new().dictionary().messages())
//!     .with_language("fr")
//!     .with_fallback("en")
//!     .build()?;
//!
//! let title = translator.translate_or_key("menu.home", None)?;
//! let welcome = translator.translate_formatted("welcome", &["Alice"], None)?;
//! # Ok(())
//! # }
//! ```

#![allow(non_snake_case)]

pub mod config;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LexiconError, Result};

// Re-export main components for easy access
pub use i18n::{
    CollectingSink, CompiledCache, Diagnostic, DiagnosticKind, DiagnosticSink, FileCategory,
    FileSelection, LanguageRegistry, LanguageTable, TracingSink, TranslationCompiler, Translator,
    TranslatorBuilder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
