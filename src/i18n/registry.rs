//! Language registry
//!
//! Remembers the compiled table of every language used during the life of
//! a translator. A table is resolved at most once per language (until
//! [`LanguageRegistry::reset`]): first from the compiled cache if one is
//! configured, otherwise by compiling the source files of the current file
//! selection. Concurrent callers asking for the same language wait for the
//! single in-flight load instead of starting their own.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use super::cache::CompiledCache;
use super::compiler::TranslationCompiler;
use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use super::normalize::normalize_language_code;
use super::selection::FileSelection;
use super::table::LanguageTable;
use crate::utils::errors::{LexiconError, Result};
use crate::utils::logging;

type Slot = Arc<OnceCell<Arc<LanguageTable>>>;

/// Process-scoped map from language code to compiled table.
pub struct LanguageRegistry {
    compiler: TranslationCompiler,
    cache: Option<CompiledCache>,
    selection: RwLock<FileSelection>,
    tables: DashMap<String, Slot>,
    diagnostics: Arc<dyn DiagnosticSink>,
    compilations: AtomicUsize,
    cache_hits: AtomicUsize,
}

/// Registry counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    pub loaded_languages: usize,
    pub compilations: usize,
    pub cache_hits: usize,
}

impl LanguageRegistry {
    pub fn new(
        compiler: TranslationCompiler,
        cache: Option<CompiledCache>,
        selection: FileSelection,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            compiler,
            cache,
            selection: RwLock::new(selection),
            tables: DashMap::new(),
            diagnostics,
            compilations: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }

    pub fn compiler(&self) -> &TranslationCompiler {
        &self.compiler
    }

    pub fn cache(&self) -> Option<&CompiledCache> {
        self.cache.as_ref()
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticSink> {
        &self.diagnostics
    }

    pub fn selection(&self) -> FileSelection {
        self.selection.read().clone()
    }

    /// Replace the file selection and forget every remembered table.
    pub fn select(&self, selection: FileSelection) {
        let mut current = self.selection.write();
        *current = selection;
        self.tables.clear();
    }

    /// Get the table of `language`, loading it on first use.
    pub fn get(&self, language: &str) -> Result<Arc<LanguageTable>> {
        let language = normalize_language_code(language)?;

        let slot: Slot = self
            .tables
            .entry(language.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        slot.get_or_try_init(|| self.load(&language)).map(Arc::clone)
    }

    /// Whether `language` has already been resolved.
    pub fn is_loaded(&self, language: &str) -> bool {
        normalize_language_code(language)
            .ok()
            .and_then(|language| self.tables.get(&language).map(|slot| slot.get().is_some()))
            .unwrap_or(false)
    }

    /// Forget every remembered table.
    pub fn reset(&self) {
        self.tables.clear();
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            loaded_languages: self.tables.iter().filter(|slot| slot.value().get().is_some()).count(),
            compilations: self.compilations.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    fn load(&self, language: &str) -> Result<Arc<LanguageTable>> {
        let selection = self.selection();
        let group = selection.group_id();

        if let Some(table) = self.cached(language, &group) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::new(table));
        }

        let compilation = self.compiler.compile(language, &selection)?;
        self.compilations.fetch_add(1, Ordering::Relaxed);
        let files = compilation.files_loaded;
        let warnings = compilation.diagnostics.len();
        for diagnostic in compilation.diagnostics.iter().cloned() {
            self.diagnostics.report(diagnostic);
        }
        let table = compilation.into_table(language, &group);
        logging::log_language_compiled(language, &group, table.len(), files, warnings);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(&table) {
                self.diagnostics.report(Diagnostic::for_language(
                    language,
                    DiagnosticKind::CacheWriteFailed,
                    e.to_string(),
                ));
            }
        }

        Ok(Arc::new(table))
    }

    fn cached(&self, language: &str, group: &str) -> Option<LanguageTable> {
        let cache = self.cache.as_ref()?;
        match cache.get(language, group) {
            Ok(table) => {
                logging::log_cache_lookup(language, group, table.is_some());
                table
            }
            Err(e) => {
                let kind = match e {
                    LexiconError::CacheCorrupted { .. } => DiagnosticKind::CacheCorrupted,
                    _ => DiagnosticKind::CacheReadFailed,
                };
                self.diagnostics.report(Diagnostic::for_language(language, kind, e.to_string()));
                None
            }
        }
    }
}

impl std::fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageRegistry")
            .field("directory", &self.compiler.directory())
            .field("cache", &self.cache)
            .field("selection", &*self.selection.read())
            .field("stats", &self.stats())
            .finish()
    }
}
