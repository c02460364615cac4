//! Translation compiler
//!
//! Reads the selected YAML source documents of one language and flattens
//! their nested mappings into a single `key -> string` table. Source files
//! are merged in selection order; when two files define the same flattened
//! key, the later file wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde_yaml::{Mapping, Value};
use tracing::debug;
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::normalize::{normalize_key_segment, normalize_language_code, validate_flat_key};
use super::selection::FileSelection;
use super::table::LanguageTable;
use crate::utils::errors::{LexiconError, Result};

/// Outcome of compiling one language.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub translations: BTreeMap<String, String>,
    pub files_loaded: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn into_table(self, language: &str, group: &str) -> LanguageTable {
        LanguageTable::new(language, group, self.translations)
    }
}

/// Compiles languages from a translations root laid out as
/// `<root>/<language>/<category>.yml`.
#[derive(Debug, Clone)]
pub struct TranslationCompiler {
    directory: PathBuf,
}

impl TranslationCompiler {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Compile `language` from the files in `selection`.
    ///
    /// Missing or unparseable files and malformed entries become
    /// diagnostics; the call only fails when the language directory is
    /// unusable or no file at all could be loaded.
    pub fn compile(&self, language: &str, selection: &FileSelection) -> Result<Compilation> {
        let language = normalize_language_code(language)?;
        let language_dir = self.directory.join(&language);

        match fs::metadata(&language_dir) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(LexiconError::LanguageDirectoryUnreadable {
                    language,
                    reason: "not a directory".to_string(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LexiconError::LanguageDirectoryMissing { language });
            }
            Err(e) => {
                return Err(LexiconError::LanguageDirectoryUnreadable { language, reason: e.to_string() });
            }
        }
        if let Err(e) = fs::read_dir(&language_dir) {
            return Err(LexiconError::LanguageDirectoryUnreadable { language, reason: e.to_string() });
        }

        let mut compilation = Compilation::default();
        for category in selection.categories() {
            let file_name = category.file_name();
            match read_document(&language_dir.join(&file_name)) {
                Ok(document) => {
                    feed(&language, &document, None, &mut compilation);
                    compilation.files_loaded += 1;
                    debug!(language = %language, file = %file_name, "Loaded translation source");
                }
                Err(reason) => compilation.diagnostics.push(Diagnostic::for_language(
                    &language,
                    DiagnosticKind::SourceSkipped { file: file_name.clone() },
                    format!("Skipped translation file \"{}\": {}", file_name, reason),
                )),
            }
        }

        if compilation.files_loaded == 0 {
            return Err(LexiconError::Compilation {
                language,
                reason: "No translation files were loaded".to_string(),
            });
        }

        Ok(compilation)
    }

    /// Flatten already-parsed documents, in order, without touching the filesystem.
    pub fn compile_documents<I>(language: &str, documents: I) -> Compilation
    where
        I: IntoIterator<Item = Mapping>,
    {
        let mut compilation = Compilation::default();
        for document in documents {
            feed(language, &document, None, &mut compilation);
            compilation.files_loaded += 1;
        }
        compilation
    }
}

fn read_document(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        // empty document
        Value::Null => Ok(Mapping::new()),
        other => Ok(serde_yaml::from_value(other)?),
    }
}

fn key_segment(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn feed(language: &str, mapping: &Mapping, parent: Option<&str>, compilation: &mut Compilation) {
    for (raw_key, value) in mapping {
        let key = key_segment(raw_key)
            .map(|segment| normalize_key_segment(parent, &segment))
            .filter(|key| validate_flat_key(key));
        let Some(key) = key else {
            compilation.diagnostics.push(Diagnostic::for_language(
                language,
                DiagnosticKind::InvalidKey { parent: parent.map(str::to_string) },
                format!("Invalid translation key in parent \"{}\"", parent.unwrap_or("~")),
            ));
            continue;
        };

        match value {
            Value::String(s) => {
                compilation.translations.insert(key, s.clone());
            }
            Value::Number(n) => {
                compilation.translations.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                compilation.translations.insert(key, b.to_string());
            }
            Value::Null => {
                compilation.translations.insert(key, String::new());
            }
            Value::Mapping(nested) => feed(language, nested, Some(key.as_str()), compilation),
            Value::Sequence(_) | Value::Tagged(_) => {
                compilation.diagnostics.push(Diagnostic::for_language(
                    language,
                    DiagnosticKind::InvalidValue { key: key.clone() },
                    format!("Invalid translation value for key \"{}\"", key),
                ));
            }
        }
    }
}
