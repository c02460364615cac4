//! Test context for unified test setup
//!
//! This module provides a test context holding a translation tree, a cache
//! directory and a translator wired to a collecting diagnostics sink.

use std::sync::Arc;
use Lexicon::{CollectingSink, FileSelection, Translator};
use tempfile::TempDir;

use super::test_data::TranslationFixture;

/// Initialize test logging once; later calls are no-ops.
pub fn init_test_env() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("Lexicon=debug")
        .with_test_writer()
        .try_init();
}

/// Translator plus everything it borrows from the filesystem
pub struct TestContext {
    pub fixture: TranslationFixture,
    pub cache_dir: TempDir,
    pub diagnostics: Arc<CollectingSink>,
    pub translator: Translator,
}

impl TestContext {
    /// Translator over `fixture` with caching, `en` current and no fallback.
    pub fn new(fixture: TranslationFixture) -> Self {
        Self::with_selection(fixture, FileSelection::new().dictionary().messages())
    }

    pub fn with_selection(fixture: TranslationFixture, selection: FileSelection) -> Self {
        init_test_env();
        let cache_dir = tempfile::tempdir().expect("create cache directory");
        let diagnostics = Arc::new(CollectingSink::new());
        let translator = Translator::builder(fixture.path())
            .with_cache_directory(cache_dir.path())
            .with_selection(selection)
            .with_language("en")
            .with_diagnostics(diagnostics.clone())
            .build()
            .expect("build translator");

        Self {
            fixture,
            cache_dir,
            diagnostics,
            translator,
        }
    }

    /// A second translator sharing the same sources and cache.
    pub fn sibling(&self) -> Translator {
        Translator::builder(self.fixture.path())
            .with_cache_directory(self.cache_dir.path())
            .with_selection(self.translator.selection())
            .with_language("en")
            .with_diagnostics(self.diagnostics.clone())
            .build()
            .expect("build sibling translator")
    }
}
