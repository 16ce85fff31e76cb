// src/core/engine.rs
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::core::filter::{FilterReport, FilterState, YearFilter};
use crate::core::locale::{LocaleStore, TranslationTable};
use crate::core::page::Page;
use crate::core::publications::{self, YearGroup};
use crate::core::rate_limit::{Debouncer, Edge};
use crate::core::types::Language;
use crate::persistence::Preferences;

/// Quiet interval for the search box. Keystrokes inside the window keep
/// pushing the recompute out; it runs once typing goes quiet.
const SEARCH_QUIET_INTERVAL: Duration = Duration::from_millis(300);

/// The site front-end in one place: the localized page chrome, the
/// publications timeline, the filter over it, and the persisted
/// preferences. Binaries drive this and render whatever it reports.
pub struct SiteEngine {
    locale: LocaleStore,
    page: Page,
    publications: Option<Vec<YearGroup>>,
    filter: FilterState,
    report: FilterReport,
    search_debounce: Debouncer,
    prefs: Preferences,
    prefs_path: Option<PathBuf>,
}

impl SiteEngine {
    /// Builds an engine from the preference file at `path`, falling back
    /// to defaults when the file is absent or unreadable.
    ///
    /// `publications` is `None` when the page has no publications
    /// section; the filter then self-disables and the rest of the engine
    /// works normally.
    pub fn from_file_or_new(
        path: &Path,
        page: Page,
        publications: Option<Vec<YearGroup>>,
    ) -> Self {
        let prefs = Preferences::load_from_disk(path).unwrap_or_else(|_| Preferences::new());
        let mut engine = Self::with_preferences(prefs, page, publications);
        engine.prefs_path = Some(path.to_path_buf());
        engine
    }

    /// Engine over explicit parts; the simulator and the tests use this.
    pub fn with_preferences(
        mut prefs: Preferences,
        mut page: Page,
        publications: Option<Vec<YearGroup>>,
    ) -> Self {
        let mut locale = LocaleStore::initialize(TranslationTable::builtin(), &prefs);

        // The page ships in the default language; only a persisted
        // non-default choice needs a re-render at startup.
        let active = locale.active();
        if active != Language::default() {
            locale.apply(active, &mut page, &mut prefs);
        }

        let mut engine = Self {
            locale,
            page,
            publications,
            filter: FilterState::new(),
            report: FilterReport::default(),
            search_debounce: Debouncer::new(SEARCH_QUIET_INTERVAL, Edge::Trailing),
            prefs,
            prefs_path: None,
        };
        engine.recompute();
        engine
    }

    pub fn locale(&self) -> &LocaleStore {
        &self.locale
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The publications timeline, empty when the section is absent.
    pub fn publications(&self) -> &[YearGroup] {
        self.publications.as_deref().unwrap_or(&[])
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The latest visibility report. Always aligned with the timeline:
    /// a recompute runs at construction and after every filter change.
    pub fn report(&self) -> &FilterReport {
        &self.report
    }

    /// Year labels for the selector, in timeline order.
    pub fn year_options(&self) -> Vec<String> {
        publications::year_options(self.publications())
    }

    /// Records a new search box value and arms the quiet-interval timer.
    /// Visibility updates once `tick` observes the interval elapsed.
    pub fn type_query(&mut self, raw: &str, now: Instant) {
        if self.publications.is_none() {
            return;
        }
        self.filter.set_query(raw);
        self.search_debounce.arm(now);
    }

    /// Runs a deferred recompute when its quiet interval has elapsed.
    /// Returns true when the report changed. Call from the event loop's
    /// idle path with the current instant.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.search_debounce.fire_due(now) {
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Whether a search recompute is still scheduled.
    pub fn search_pending(&self) -> bool {
        self.search_debounce.pending()
    }

    /// Year selection is a single discrete event, not a character
    /// stream, so it recomputes immediately.
    pub fn select_year(&mut self, year: YearFilter) {
        if self.publications.is_none() {
            return;
        }
        self.filter.set_year(year);
        self.recompute();
    }

    /// Rotates to the next language, re-renders the page, and re-phrases
    /// a displayed result line without touching the visibility counts.
    pub fn toggle_language(&mut self) {
        self.locale.toggle(&mut self.page, &mut self.prefs);
        self.report.message = self
            .filter
            .render_message(self.report.visible_count, &self.locale);
    }

    /// Missing-translation diagnostics accumulated since the last drain.
    pub fn drain_missing_translations(&mut self) -> Vec<(Language, String)> {
        self.locale.drain_missing()
    }

    pub fn preference(&self, key: &str) -> Option<&str> {
        self.prefs.get(key)
    }

    pub fn set_preference(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.prefs.set(key, value);
    }

    /// Writes the preferences back to disk; an engine built without a
    /// path (simulator, tests) is a no-op.
    pub fn save_preferences(&self) -> Result<(), std::io::Error> {
        if let Some(path) = &self.prefs_path {
            self.prefs.save_to_disk(path)
        } else {
            Ok(())
        }
    }

    fn recompute(&mut self) {
        let Some(groups) = &self.publications else {
            return;
        };
        self.report = self.filter.recompute(groups, &self.locale);
    }
}
