//! Registry integration tests

mod helpers;

use std::sync::Arc;
use std::thread;
use helpers::*;

#[test]
fn test_concurrent_lookups_share_one_compilation() {
    let ctx = TestContext::new(bilingual_fixture());
    let translator = Arc::new(ctx.sibling());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let translator = Arc::clone(&translator);
            thread::spawn(move || {
                let language = if i % 2 == 0 { "en" } else { "fr" };
                translator.translate("menu.home", Some(language)).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(Option::is_some));

    let stats = translator.registry().stats();
    assert_eq!(stats.loaded_languages, 2);
    assert_eq!(stats.compilations + stats.cache_hits, 2);
}

#[test]
fn test_reset_clears_languages_and_tables() {
    let ctx = TestContext::new(bilingual_fixture());
    let t = &ctx.translator;
    t.set_fallback("fr").unwrap();
    t.translate("menu.home", None).unwrap();
    assert!(t.registry().is_loaded("en"));

    t.reset();
    assert_eq!(t.current_language(), None);
    assert_eq!(t.fallback_language(), None);
    assert!(!t.registry().is_loaded("en"));

    t.set_language("en").unwrap();
    assert_eq!(t.translate("menu.home", None).unwrap().as_deref(), Some("Start"));
}

#[test]
fn test_flush_empties_selection() {
    let ctx = TestContext::new(bilingual_fixture());
    let t = &ctx.translator;
    t.translate("menu.home", None).unwrap();

    t.flush();
    assert!(t.selection().is_empty());
    assert_eq!(t.current_language().as_deref(), Some("en"));
    // nothing selected: the language cannot be compiled and lookups miss
    assert_eq!(t.translate("menu.home", None).unwrap(), None);
    assert!(t.get_all(None).is_err());
}
