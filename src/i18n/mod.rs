//! Internationalization module
//!
//! This module turns trees of YAML translation sources into flat, compiled
//! language tables, caches them on disk and resolves lookups with fallback
//! to a secondary language.
//!
//! Layout of a translations root:
//!
//! ```text
//! translations/
//!   en/
//!     dictionary.yml
//!     messages.yml
//!   fr/
//!     dictionary.yml
//! ```

pub mod cache;
pub mod compiler;
pub mod diagnostics;
pub mod format;
pub mod global;
pub mod normalize;
pub mod registry;
pub mod selection;
pub mod table;
pub mod translator;

// Re-export commonly used i18n components
pub use cache::CompiledCache;
pub use compiler::{Compilation, TranslationCompiler};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use format::{format_positional, FormatError};
pub use normalize::{normalize_key_segment, normalize_language_code, validate_flat_key, validate_lookup_key};
pub use registry::{LanguageRegistry, RegistryStats};
pub use selection::{FileCategory, FileSelection};
pub use table::LanguageTable;
pub use translator::{Translator, TranslatorBuilder};
