//! Compiled language cache
//!
//! Persists compiled [`LanguageTable`]s under a cache root so that source
//! files do not have to be recompiled on every process start. One file per
//! `(language, group)`, named `lang.<language>.<group>.cache`.
//!
//! Entries are never checked for staleness: clear the cache directory (or
//! call [`CompiledCache::clear`]) after changing source files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::debug;
use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use super::normalize::normalize_language_code;
use super::table::LanguageTable;
use crate::utils::errors::{LexiconError, Result};

const FILE_PREFIX: &str = "lang.";
const FILE_SUFFIX: &str = ".cache";

/// File-backed store of compiled language tables.
#[derive(Clone)]
pub struct CompiledCache {
    directory: PathBuf,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl CompiledCache {
    /// Open a cache root, which must be an existing, readable and writable directory.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();

        match fs::metadata(&directory) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(LexiconError::CacheUnavailable(format!(
                    "{} is not a directory",
                    directory.display()
                )));
            }
            Err(e) => {
                return Err(LexiconError::CacheUnavailable(format!("{}: {}", directory.display(), e)));
            }
        }
        if let Err(e) = fs::read_dir(&directory) {
            return Err(LexiconError::CacheUnavailable(format!(
                "{} is not readable: {}",
                directory.display(),
                e
            )));
        }
        if let Err(e) = NamedTempFile::new_in(&directory) {
            return Err(LexiconError::CacheUnavailable(format!(
                "{} is not writable: {}",
                directory.display(),
                e
            )));
        }

        Ok(Self {
            directory,
            diagnostics: Arc::new(TracingSink),
        })
    }

    /// Route non-fatal cache diagnostics (failed deletions) to `sink`.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Deterministic cache file name for `(language, group)`.
    pub fn file_name(language: &str, group: &str) -> String {
        format!("{}{}.{}{}", FILE_PREFIX, language, group, FILE_SUFFIX)
    }

    pub fn path_for(&self, language: &str, group: &str) -> PathBuf {
        self.directory.join(Self::file_name(language, group))
    }

    /// Fetch the cached table for `(language, group)`.
    ///
    /// Returns `Ok(None)` when nothing is cached. An entry that does not
    /// deserialize into a well-formed table for exactly this language and
    /// group is deleted and reported as [`LexiconError::CacheCorrupted`].
    pub fn get(&self, language: &str, group: &str) -> Result<Option<LanguageTable>> {
        let language = normalize_language_code(language)?;
        check_group(group)?;
        let file = Self::file_name(&language, group);
        let path = self.directory.join(&file);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LexiconError::CacheRead { file, reason: e.to_string() }),
        };

        match decode(&bytes, &language, group) {
            Ok(table) => {
                debug!(language = %language, group = %group, keys = table.len(), "Loaded cached language");
                Ok(Some(table))
            }
            Err(reason) => {
                debug!(file = %file, reason = %reason, "Rejected cached language");
                if let Err(e) = fs::remove_file(&path) {
                    self.diagnostics.report(Diagnostic::for_language(
                        &language,
                        DiagnosticKind::CacheDeleteFailed,
                        format!("Failed to delete invalid cached language file \"{}\": {}", file, e),
                    ));
                }
                Err(LexiconError::CacheCorrupted { file })
            }
        }
    }

    /// Write `table` atomically, replacing any previous entry for its language and group.
    pub fn store(&self, table: &LanguageTable) -> Result<PathBuf> {
        check_group(table.group())?;
        let file = Self::file_name(table.name(), table.group());
        let path = self.directory.join(&file);
        let write_error = |reason: String| LexiconError::CacheWrite { file: file.clone(), reason };

        let payload = serde_json::to_vec(table).map_err(|e| write_error(e.to_string()))?;
        let mut temp = NamedTempFile::new_in(&self.directory).map_err(|e| write_error(e.to_string()))?;
        temp.write_all(&payload).map_err(|e| write_error(e.to_string()))?;
        temp.as_file().sync_all().map_err(|e| write_error(e.to_string()))?;
        temp.persist(&path).map_err(|e| write_error(e.error.to_string()))?;

        debug!(file = %file, keys = table.len(), "Stored compiled language");
        Ok(path)
    }

    /// Delete the entry for `(language, group)`. Returns whether one existed.
    pub fn remove(&self, language: &str, group: &str) -> Result<bool> {
        let language = normalize_language_code(language)?;
        check_group(group)?;
        match fs::remove_file(self.path_for(&language, group)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every cache entry in the cache root. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            let is_entry = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX))
                .unwrap_or(false);
            if is_entry && path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        debug!(directory = %self.directory.display(), removed = removed, "Cleared compiled language cache");
        Ok(removed)
    }
}

impl std::fmt::Debug for CompiledCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledCache")
            .field("directory", &self.directory)
            .finish()
    }
}

// Groups are concatenated category codes and end up in file names.
fn check_group(group: &str) -> Result<()> {
    if group.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LexiconError::Config(format!("Invalid cache group: {:?}", group)))
    }
}

fn decode(bytes: &[u8], language: &str, group: &str) -> std::result::Result<LanguageTable, String> {
    let table: LanguageTable = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    table.check_shape()?;
    if table.name() != language || table.group() != group {
        return Err(format!(
            "entry holds language {:?} group {:?}",
            table.name(),
            table.group()
        ));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use assert_matches::assert_matches;
    use crate::i18n::diagnostics::CollectingSink;

    fn table(name: &str, group: &str) -> LanguageTable {
        let mut translations = BTreeMap::new();
        translations.insert("greet".to_string(), "Hello, %s!".to_string());
        translations.insert("menu.home".to_string(), "Home".to_string());
        translations.insert("blank".to_string(), String::new());
        LanguageTable::new(name, group, translations)
    }

    #[test]
    fn test_file_name() {
        assert_eq!(CompiledCache::file_name("en-us", "dknmsg"), "lang.en-us.dknmsg.cache");
    }

    #[test]
    fn test_store_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        let original = table("en", "dkn");

        let path = cache.store(&original).unwrap();
        assert_eq!(path, dir.path().join("lang.en.dkn.cache"));

        let loaded = cache.get("en", "dkn").unwrap().expect("cached table");
        assert_eq!(loaded.name(), "en");
        assert_eq!(loaded.group(), "dkn");
        assert_eq!(loaded.all(), original.all());
    }

    #[test]
    fn test_absent_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        assert!(cache.get("en", "dkn").unwrap().is_none());
        assert!(!cache.remove("en", "dkn").unwrap());
    }

    #[test]
    fn test_garbage_entry_is_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        let path = cache.path_for("en", "dkn");
        fs::write(&path, b"\x00\x01 not json").unwrap();

        assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheCorrupted { .. }));
        assert!(!path.exists());

        cache.store(&table("en", "dkn")).unwrap();
        assert!(cache.get("en", "dkn").unwrap().is_some());
    }

    #[test]
    fn test_foreign_shapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();

        // extra field
        fs::write(
            cache.path_for("en", "dkn"),
            r#"{"name":"en","group":"dkn","translations":{},"compiled_at":"2024-01-01T00:00:00Z","class":"Other"}"#,
        )
        .unwrap();
        assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheCorrupted { .. }));

        // wrong value types
        fs::write(
            cache.path_for("en", "dkn"),
            r#"{"name":"en","group":"dkn","translations":{"a":[1,2]},"compiled_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheCorrupted { .. }));

        // valid table stored under another language's name
        let payload = serde_json::to_vec(&table("fr", "dkn")).unwrap();
        fs::write(cache.path_for("en", "dkn"), payload).unwrap();
        assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheCorrupted { .. }));
        assert!(!cache.path_for("en", "dkn").exists());
    }

    #[test]
    fn test_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        cache.store(&table("en", "dkn")).unwrap();
        cache.store(&LanguageTable::new("en", "dkn", BTreeMap::new())).unwrap();

        assert!(cache.get("en", "dkn").unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_groups_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        cache.store(&table("en", "dkn")).unwrap();

        assert!(cache.get("en", "dknmsg").unwrap().is_none());
        assert_matches!(cache.get("en", "../x"), Err(LexiconError::Config(_)));
    }

    #[test]
    fn test_clear_only_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        let cache = CompiledCache::new(dir.path())
            .unwrap()
            .with_diagnostics(Arc::new(CollectingSink::new()));
        cache.store(&table("en", "dkn")).unwrap();
        cache.store(&table("fr", "dkn")).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert!(dir.path().join("notes.txt").exists());
        assert!(cache.get("fr", "dkn").unwrap().is_none());
    }

    #[test]
    fn test_missing_root_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_matches!(CompiledCache::new(&missing), Err(LexiconError::CacheUnavailable(_)));

        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        assert_matches!(CompiledCache::new(&file), Err(LexiconError::CacheUnavailable(_)));
    }

    #[test]
    fn test_unreadable_entry_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CompiledCache::new(dir.path()).unwrap();
        fs::create_dir(cache.path_for("en", "dkn")).unwrap();

        assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheRead { file, .. }) if file == "lang.en.dkn.cache");
        assert_matches!(cache.store(&table("en", "dkn")), Err(LexiconError::CacheWrite { .. }));
        // the blocking directory is left alone
        assert!(cache.path_for("en", "dkn").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_delete_of_corrupted_entry_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(CollectingSink::new());
        let cache = CompiledCache::new(dir.path()).unwrap().with_diagnostics(sink.clone());
        let path = cache.path_for("en", "dkn");
        fs::write(&path, "garbage").unwrap();

        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();
        // privileged users ignore directory permissions
        let privileged = fs::write(dir.path().join("privileged"), "").is_ok();
        if !privileged {
            assert_matches!(cache.get("en", "dkn"), Err(LexiconError::CacheCorrupted { .. }));
            assert!(path.exists());
            assert_eq!(sink.count(|k| *k == DiagnosticKind::CacheDeleteFailed), 1);
        }
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
    }
}
