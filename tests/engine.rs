use std::time::{Duration, Instant};

use site_core::core::filter::YearFilter;
use site_core::core::locale::LANGUAGE_PREF_KEY;
use site_core::core::page::Page;
use site_core::core::publications;
use site_core::core::types::Language;
use site_core::persistence::Preferences;
use site_core::SiteEngine;

fn engine() -> SiteEngine {
    SiteEngine::with_preferences(
        Preferences::new(),
        Page::lab_site(),
        Some(publications::sample()),
    )
}

#[test]
fn construction_reports_everything_visible_and_no_message() {
    let engine = engine();
    let report = engine.report();
    assert_eq!(report.visible_count, report.total_count);
    assert!(report.total_count > 0);
    assert!(report.group_visible.iter().all(|&v| v));
    assert!(report.message.is_none());
    assert_eq!(engine.year_options(), vec!["2024", "2023"]);
}

#[test]
fn startup_applies_a_persisted_language() {
    let mut prefs = Preferences::new();
    prefs.set(LANGUAGE_PREF_KEY, "zh");
    let engine = SiteEngine::with_preferences(prefs, Page::lab_site(), None);

    assert_eq!(engine.locale().active(), Language::Zh);
    let page = engine.page();
    assert_eq!(page.document_lang, "zh-TW");
    assert_eq!(page.toggle_label, "EN");
    assert_eq!(page.node("nav-home").unwrap().content, "首頁");
    assert_eq!(page.node("search-placeholder").unwrap().content, "搜尋論文...");
}

#[test]
fn unrecognized_persisted_language_falls_back_to_english() {
    let mut prefs = Preferences::new();
    prefs.set(LANGUAGE_PREF_KEY, "de");
    let engine = SiteEngine::with_preferences(prefs, Page::lab_site(), None);
    assert_eq!(engine.locale().active(), Language::En);
    assert_eq!(engine.page().node("nav-home").unwrap().content, "Home");
}

#[test]
fn language_choice_round_trips_through_the_preference_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let mut first = SiteEngine::from_file_or_new(&path, Page::lab_site(), None);
    first.toggle_language();
    assert_eq!(first.locale().active(), Language::Zh);
    first.save_preferences().unwrap();

    let second = SiteEngine::from_file_or_new(&path, Page::lab_site(), None);
    assert_eq!(second.locale().active(), Language::Zh);
    assert_eq!(second.page().node("nav-home").unwrap().content, "首頁");
}

#[test]
fn rapid_keystrokes_recompute_once_with_the_final_query() {
    let mut engine = engine();
    let t0 = Instant::now();

    engine.type_query("s", t0);
    engine.type_query("sm", t0 + Duration::from_millis(100));
    engine.type_query("smith", t0 + Duration::from_millis(200));

    // Inside the quiet window nothing has run yet.
    assert!(!engine.tick(t0 + Duration::from_millis(400)));
    assert_eq!(engine.report().visible_count, engine.report().total_count);
    assert!(engine.report().message.is_none());
    assert!(engine.search_pending());

    // The window counts from the last keystroke.
    assert!(engine.tick(t0 + Duration::from_millis(500)));
    assert_eq!(engine.report().visible_count, 1);
    assert_eq!(engine.report().message.as_deref(), Some("1 paper"));

    // The deferred call ran exactly once.
    assert!(!engine.tick(t0 + Duration::from_millis(600)));
}

#[test]
fn year_selection_recomputes_immediately() {
    let mut engine = engine();
    engine.select_year(YearFilter::Year("2023".to_string()));

    let report = engine.report();
    assert_eq!(report.visible_count, 3);
    assert_eq!(report.group_visible, vec![false, true]);
    assert_eq!(report.message.as_deref(), Some("3 papers"));
}

#[test]
fn language_toggle_rephrases_a_displayed_message_without_recounting() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.type_query("smith", t0);
    engine.tick(t0 + Duration::from_millis(300));
    assert_eq!(engine.report().message.as_deref(), Some("1 paper"));

    engine.toggle_language();
    assert_eq!(engine.report().visible_count, 1);
    assert_eq!(engine.report().message.as_deref(), Some("1 篇論文"));

    engine.toggle_language();
    assert_eq!(engine.report().message.as_deref(), Some("1 paper"));
}

#[test]
fn absent_publications_section_disables_the_filter() {
    let mut engine = SiteEngine::with_preferences(Preferences::new(), Page::lab_site(), None);
    let t0 = Instant::now();

    engine.type_query("smith", t0);
    assert!(!engine.search_pending());
    assert!(!engine.tick(t0 + Duration::from_secs(1)));
    engine.select_year(YearFilter::Year("2023".to_string()));

    let report = engine.report();
    assert_eq!(report.total_count, 0);
    assert!(report.message.is_none());
    assert!(engine.publications().is_empty());

    // The rest of the page still works.
    engine.toggle_language();
    assert_eq!(engine.locale().active(), Language::Zh);
}

#[test]
fn clearing_both_inputs_hides_the_message_again() {
    let mut engine = engine();
    let t0 = Instant::now();

    engine.type_query("smith", t0);
    engine.tick(t0 + Duration::from_millis(300));
    assert!(engine.report().message.is_some());

    engine.type_query("", t0 + Duration::from_millis(400));
    engine.tick(t0 + Duration::from_millis(700));
    assert!(engine.report().message.is_none());
    assert_eq!(engine.report().visible_count, engine.report().total_count);
}
