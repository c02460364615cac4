//! Compiled language table

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::normalize::{normalize_language_code, validate_flat_key};
use crate::utils::errors::{LexiconError, Result};

/// Flattened translations of one language for one file group.
///
/// Immutable once built; the registry hands it out behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageTable {
    name: String,
    group: String,
    translations: BTreeMap<String, String>,
    compiled_at: DateTime<Utc>,
}

impl LanguageTable {
    pub fn new(name: impl Into<String>, group: impl Into<String>, translations: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            translations,
            compiled_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn compiled_at(&self) -> DateTime<Utc> {
        self.compiled_at
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Look up an already-normalized key.
    ///
    /// `Ok(None)` means the key is not present; an explicitly empty
    /// translation is `Ok(Some(""))`.
    pub fn lookup(&self, key: &str) -> Result<Option<&str>> {
        if !validate_flat_key(key) {
            return Err(LexiconError::InvalidKey(key.to_string()));
        }
        Ok(self.translations.get(key).map(String::as_str))
    }

    /// Read-only view of every translation.
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.translations
    }

    /// Check that a deserialized table is well formed.
    pub(crate) fn check_shape(&self) -> std::result::Result<(), String> {
        match normalize_language_code(&self.name) {
            Ok(code) if code == self.name => {}
            _ => return Err(format!("bad language name {:?}", self.name)),
        }
        if let Some(key) = self.translations.keys().find(|key| !validate_flat_key(key)) {
            return Err(format!("bad translation key {:?}", key));
        }
        Ok(())
    }
}
