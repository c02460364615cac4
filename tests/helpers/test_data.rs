//! Test data helpers for building translation source trees
//!
//! This module writes YAML source documents into a temporary directory laid
//! out the way the compiler expects (`<root>/<language>/<category>.yml`).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary translations root
pub struct TranslationFixture {
    root: TempDir,
}

impl TranslationFixture {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create translations root"),
        }
    }

    /// Write `<root>/<language>/<file>` with `body`, creating the language directory.
    pub fn file(self, language: &str, file: &str, body: &str) -> Self {
        self.write(language, file, body);
        self
    }

    /// Create an empty language directory.
    pub fn language(self, language: &str) -> Self {
        fs::create_dir_all(self.root.path().join(language)).expect("create language directory");
        self
    }

    /// Write (or overwrite) a source file after construction.
    pub fn write(&self, language: &str, file: &str, body: &str) -> PathBuf {
        let dir = self.root.path().join(language);
        fs::create_dir_all(&dir).expect("create language directory");
        let path = dir.join(file);
        fs::write(&path, body).expect("write translation source");
        path
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

/// English and French sources used by most scenarios
pub fn bilingual_fixture() -> TranslationFixture {
    TranslationFixture::new()
        .file(
            "en",
            "dictionary.yml",
            r#"
menu:
  home: Home
  about: About us
welcome: "Welcome, %s!"
count: "%1$s has %2$d new messages"
only_en: English only
"#,
        )
        .file("en", "messages.yml", "saved: Saved\nmenu:\n  home: Start\n")
        .file(
            "fr",
            "dictionary.yml",
            r#"
menu:
  home: Accueil
welcome: "Bienvenue, %s !"
empty: ""
"#,
        )
        .file("fr", "messages.yml", "saved: Enregistré\n")
}
