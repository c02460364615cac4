//! Translator integration tests
//!
//! Lookups, fallback precedence and formatting against real source trees.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use Lexicon::{DiagnosticKind, FileSelection, LexiconError, Translator};

#[test]
fn test_later_file_overrides_earlier_file() {
    let ctx = TestContext::new(bilingual_fixture());

    // messages.yml is selected after dictionary.yml
    assert_eq!(ctx.translator.translate("menu.home", None).unwrap().as_deref(), Some("Start"));
    assert_eq!(ctx.translator.translate("menu.about", None).unwrap().as_deref(), Some("About us"));

    ctx.translator.select(FileSelection::new().messages().dictionary());
    assert_eq!(ctx.translator.translate("menu.home", None).unwrap().as_deref(), Some("Home"));
}

#[test]
fn test_fallback_language() {
    let ctx = TestContext::new(bilingual_fixture());
    let t = &ctx.translator;
    t.set_language("fr").unwrap();

    assert_eq!(t.translate("only_en", None).unwrap(), None);

    t.set_fallback("en").unwrap();
    assert_eq!(t.translate("menu.home", None).unwrap().as_deref(), Some("Accueil"));
    assert_eq!(t.translate("only_en", None).unwrap().as_deref(), Some("English only"));
    // empty in fr and absent in en
    assert_eq!(t.translate("empty", None).unwrap().as_deref(), Some(""));
    assert_eq!(t.translate("nowhere", None).unwrap(), None);
    assert_eq!(t.translate_or_key("nowhere", None).unwrap(), "nowhere");
}

#[test]
fn test_explicit_language_overrides_current() {
    let ctx = TestContext::new(bilingual_fixture());
    assert_eq!(ctx.translator.translate("saved", Some("FR")).unwrap().as_deref(), Some("Enregistré"));
    assert_eq!(ctx.translator.current_language().as_deref(), Some("en"));
    assert_eq!(ctx.translator.translate("saved", None).unwrap().as_deref(), Some("Saved"));
}

#[test]
fn test_no_language_selected() {
    let fixture = bilingual_fixture();
    let translator = Translator::builder(fixture.path())
        .with_selection(FileSelection::all())
        .build()
        .unwrap();

    assert_matches!(translator.translate("menu.home", None), Err(LexiconError::NoLanguageSelected));
    assert_matches!(translator.get_all(None), Err(LexiconError::NoLanguageSelected));
    assert_eq!(translator.translate("menu.home", Some("en")).unwrap().as_deref(), Some("Home"));
}

#[test]
fn test_keys_are_case_insensitive_and_validated() {
    let ctx = TestContext::new(bilingual_fixture());
    let t = &ctx.translator;

    assert_eq!(t.translate("MENU.About", None).unwrap().as_deref(), Some("About us"));
    assert_matches!(t.translate("menu..home", None), Err(LexiconError::InvalidKey(_)));
    assert_matches!(t.translate("menu home", None), Err(LexiconError::InvalidKey(_)));
    assert_matches!(t.translate("", None), Err(LexiconError::InvalidKey(_)));
    assert_matches!(t.translate("menu.home", Some("en_GB")), Err(LexiconError::InvalidLanguageCode(_)));
}

#[test]
fn test_formatted_translation() {
    let ctx = TestContext::new(bilingual_fixture());
    let t = &ctx.translator;

    assert_eq!(
        t.translate_formatted("count", &["Alice", "3"], None).unwrap().as_deref(),
        Some("Alice has 3 new messages")
    );
    assert_eq!(
        t.translate_formatted("welcome", &["Zoé"], Some("fr")).unwrap().as_deref(),
        Some("Bienvenue, Zoé !")
    );
    // not enough arguments
    assert_eq!(t.translate_formatted("count", &["Alice"], None).unwrap(), None);
}

#[test]
fn test_malformed_entries_are_skipped() {
    let fixture = TranslationFixture::new().file(
        "en",
        "dictionary.yml",
        "good: Fine\n\"bad key\": Broken\nlist:\n  - a\n  - b\nnested:\n  \"also bad!\": x\n  ok: Yes\n",
    );
    let ctx = TestContext::with_selection(fixture, FileSelection::new().dictionary());

    let all = ctx.translator.get_all(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["good"], "Fine");
    assert_eq!(all["nested.ok"], "Yes");
    assert_eq!(ctx.diagnostics.count(|k| matches!(k, DiagnosticKind::InvalidKey { .. })), 2);
    assert_eq!(ctx.diagnostics.count(|k| matches!(k, DiagnosticKind::InvalidValue { .. })), 1);
}

#[test]
fn test_missing_language_is_a_miss_for_translate() {
    let ctx = TestContext::new(bilingual_fixture());

    assert_eq!(ctx.translator.translate("menu.home", Some("de")).unwrap(), None);
    assert_eq!(ctx.diagnostics.count(|k| *k == DiagnosticKind::LanguageLoadFailed), 1);
    assert_matches!(
        ctx.translator.get_all(Some("de")),
        Err(LexiconError::LanguageDirectoryMissing { language }) if language == "de"
    );
}

#[test]
fn test_get_all_returns_flattened_table() {
    let ctx = TestContext::new(bilingual_fixture());
    let fr = ctx.translator.get_all(Some("fr")).unwrap();

    let keys: Vec<&str> = fr.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["empty", "menu.home", "saved", "welcome"]);
}

#[test]
fn test_language_path_that_is_a_file() {
    let fixture = bilingual_fixture();
    std::fs::write(fixture.path().join("de"), "menu: {home: Start}\n").unwrap();
    let ctx = TestContext::new(fixture);

    assert_eq!(ctx.translator.translate("menu.home", Some("de")).unwrap(), None);
    assert_matches!(
        ctx.translator.get_all(Some("de")),
        Err(LexiconError::LanguageDirectoryUnreadable { language, .. }) if language == "de"
    );
}
