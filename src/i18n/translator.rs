//! Translator: language selection and lookups with fallback
//!
//! The translator is the object application code talks to. Build one at
//! the composition root and share it (`Arc<Translator>` or `&Translator`)
//! with whatever needs translations; every method takes `&self`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::debug;
use super::cache::CompiledCache;
use super::compiler::TranslationCompiler;
use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use super::format::format_positional;
use super::normalize::{normalize_language_code, validate_lookup_key};
use super::registry::LanguageRegistry;
use super::selection::FileSelection;
use crate::config::TranslationsConfig;
use crate::utils::errors::{LexiconError, Result};

/// Builder for [`Translator`]
pub struct TranslatorBuilder {
    directory: PathBuf,
    cache_directory: Option<PathBuf>,
    selection: FileSelection,
    language: Option<String>,
    fallback: Option<String>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl TranslatorBuilder {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            cache_directory: None,
            selection: FileSelection::new(),
            language: None,
            fallback: None,
            diagnostics: Arc::new(TracingSink),
        }
    }

    pub fn with_cache_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.cache_directory = Some(directory.into());
        self
    }

    pub fn with_selection(mut self, selection: FileSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_fallback(mut self, language: impl Into<String>) -> Self {
        self.fallback = Some(language.into());
        self
    }

    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Validate directories and language codes and build the translator.
    pub fn build(self) -> Result<Translator> {
        if let Err(e) = fs::read_dir(&self.directory) {
            return Err(LexiconError::TranslationsDirectoryUnavailable(format!(
                "{}: {}",
                self.directory.display(),
                e
            )));
        }

        let cache = match &self.cache_directory {
            Some(directory) => {
                Some(CompiledCache::new(directory)?.with_diagnostics(Arc::clone(&self.diagnostics)))
            }
            None => None,
        };
        let current = self.language.as_deref().map(normalize_language_code).transpose()?;
        let fallback = self.fallback.as_deref().map(normalize_language_code).transpose()?;

        let registry = LanguageRegistry::new(
            TranslationCompiler::new(self.directory),
            cache,
            self.selection,
            self.diagnostics,
        );

        Ok(Translator {
            registry,
            current: RwLock::new(current),
            fallback: RwLock::new(fallback),
        })
    }
}

/// Resolves translation keys for the current (or an explicit) language,
/// falling back to a secondary language on a miss.
#[derive(Debug)]
pub struct Translator {
    registry: LanguageRegistry,
    current: RwLock<Option<String>>,
    fallback: RwLock<Option<String>>,
}

impl Translator {
    pub fn builder(directory: impl Into<PathBuf>) -> TranslatorBuilder {
        TranslatorBuilder::new(directory)
    }

    /// Build a translator from configuration
    pub fn from_config(config: &TranslationsConfig) -> Result<Self> {
        let mut builder = Self::builder(&config.directory)
            .with_selection(FileSelection::from_names(&config.files)?);
        if let Some(cache_directory) = &config.cache_directory {
            builder = builder.with_cache_directory(cache_directory);
        }
        if let Some(language) = &config.language {
            builder = builder.with_language(language.as_str());
        }
        if let Some(fallback) = &config.fallback {
            builder = builder.with_fallback(fallback.as_str());
        }
        builder.build()
    }

    /// Translations root directory
    pub fn directory(&self) -> &Path {
        self.registry.compiler().directory()
    }

    /// Compiled cache root, if caching is enabled
    pub fn cache_directory(&self) -> Option<&Path> {
        self.registry.cache().map(CompiledCache::directory)
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Set the current language. Does not load anything.
    pub fn set_language(&self, language: &str) -> Result<()> {
        *self.current.write() = Some(normalize_language_code(language)?);
        Ok(())
    }

    /// Set the fallback language. Does not load anything.
    pub fn set_fallback(&self, language: &str) -> Result<()> {
        *self.fallback.write() = Some(normalize_language_code(language)?);
        Ok(())
    }

    pub fn current_language(&self) -> Option<String> {
        self.current.read().clone()
    }

    pub fn fallback_language(&self) -> Option<String> {
        self.fallback.read().clone()
    }

    pub fn selection(&self) -> FileSelection {
        self.registry.selection()
    }

    /// Change the file selection; tables compiled for the old selection are forgotten.
    pub fn select(&self, selection: FileSelection) {
        self.registry.select(selection);
    }

    /// Clear the file selection and every remembered table. Language choices are kept.
    pub fn flush(&self) {
        self.registry.select(FileSelection::new());
    }

    /// Clear language choices and every remembered table. The file selection is kept.
    pub fn reset(&self) {
        *self.current.write() = None;
        *self.fallback.write() = None;
        self.registry.reset();
    }

    /// Translate `key` into `language` (or the current language).
    ///
    /// Returns `Ok(None)` when neither the language nor the fallback has the
    /// key. Failing to load a language is reported as a diagnostic and
    /// treated as a miss; only caller mistakes (bad key, bad language code,
    /// no language selected) are errors.
    ///
    /// An empty stored value still triggers the fallback lookup, but is
    /// returned when the fallback does not have the key either.
    pub fn translate(&self, key: &str, language: Option<&str>) -> Result<Option<String>> {
        if !validate_lookup_key(key) {
            return Err(LexiconError::InvalidKey(key.to_string()));
        }
        let key = key.to_lowercase();
        let language = self.effective_language(language)?;

        let primary = self.lookup(&language, &key);
        if primary.as_deref().is_some_and(|value| !value.is_empty()) {
            return Ok(primary);
        }

        if let Some(fallback) = self.fallback_language() {
            if fallback != language {
                if let Some(value) = self.lookup(&fallback, &key) {
                    debug!(key = %key, language = %language, fallback = %fallback, "Translation resolved by fallback");
                    return Ok(Some(value));
                }
            }
        }

        Ok(primary)
    }

    /// Like [`Translator::translate`], returning the key itself when nothing is found.
    pub fn translate_or_key(&self, key: &str, language: Option<&str>) -> Result<String> {
        Ok(self.translate(key, language)?.unwrap_or_else(|| key.to_string()))
    }

    /// Translate `key` and substitute printf-style placeholders with `args`.
    ///
    /// `Ok(None)` when the key is not found or the substitution fails.
    pub fn translate_formatted<S: AsRef<str>>(
        &self,
        key: &str,
        args: &[S],
        language: Option<&str>,
    ) -> Result<Option<String>> {
        let Some(template) = self.translate(key, language)? else {
            return Ok(None);
        };
        match format_positional(&template, args) {
            Ok(formatted) => Ok(Some(formatted)),
            Err(e) => {
                debug!(key = %key, error = %e, "Translation formatting failed");
                Ok(None)
            }
        }
    }

    /// Every translation of `language` (or the current language).
    ///
    /// Unlike [`Translator::translate`], load failures are returned to the caller.
    pub fn get_all(&self, language: Option<&str>) -> Result<BTreeMap<String, String>> {
        let language = self.effective_language(language)?;
        Ok(self.registry.get(&language)?.all().clone())
    }

    fn effective_language(&self, language: Option<&str>) -> Result<String> {
        match language {
            Some(language) => normalize_language_code(language),
            None => self.current_language().ok_or(LexiconError::NoLanguageSelected),
        }
    }

    fn lookup(&self, language: &str, key: &str) -> Option<String> {
        let result = self
            .registry
            .get(language)
            .and_then(|table| table.lookup(key).map(|value| value.map(str::to_string)));
        match result {
            Ok(value) => value,
            Err(e) => {
                self.registry.diagnostics().report(Diagnostic::for_language(
                    language,
                    DiagnosticKind::LanguageLoadFailed,
                    format!("Translation [{}] error: {}", language, e),
                ));
                None
            }
        }
    }
}
