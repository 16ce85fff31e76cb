// src/core/locale.rs
use std::collections::HashMap;

use crate::core::page::{NodeRole, Page};
use crate::core::types::Language;
use crate::persistence::Preferences;

/// Preference key the active language is persisted under.
pub const LANGUAGE_PREF_KEY: &str = "language";

/// Site strings as (key, English, Chinese) rows. Keys match the tags the
/// page carries; the footer address keeps its embedded line breaks.
const BUILTIN: &[(&str, &str, &str)] = &[
    ("nav-home", "Home", "首頁"),
    ("nav-about", "About", "關於我們"),
    ("nav-research", "Research", "研究領域"),
    ("nav-outputs", "Outputs", "研究成果"),
    ("nav-team", "Team", "團隊成員"),
    ("nav-books", "Books", "著作"),
    ("nav-publications", "Publications", "學術論文"),
    ("nav-contact", "Contact", "聯絡我們"),
    ("hero-label", "Research Excellence", "卓越研究"),
    ("hero-title", "Lab of Data Analytics in", "人文科學"),
    ("hero-title-highlight", "Human Science", "資料分析實驗室"),
    (
        "hero-subtitle",
        "Advancing quantitative research in foreign language acquisition through innovative statistical modeling and data analytics",
        "透過創新的統計建模與資料分析，推進外語習得的量化研究",
    ),
    ("hero-btn-research", "Explore Research", "探索研究"),
    ("hero-btn-team", "Meet Our Team", "認識團隊"),
    ("stat-publications", "Publications", "學術論文"),
    ("stat-research", "Research Areas", "研究領域"),
    ("stat-tools", "Interactive Tools", "互動工具"),
    ("about-label", "About Us", "關於我們"),
    ("about-title", "Our Research Mission", "研究使命"),
    (
        "about-quote",
        "Bridging the gap between advanced statistical methodology and meaningful insights in human science research.",
        "在先進統計方法學與人文科學研究的有意義洞見之間搭建橋樑。",
    ),
    ("search-placeholder", "Search publications...", "搜尋論文..."),
    ("filter-all", "All Years", "所有年份"),
    ("unit-paper", "paper", "篇論文"),
    ("unit-papers", "papers", "篇論文"),
    ("quick-links", "Quick Links", "快速連結"),
    ("footer-contact", "Contact", "聯絡方式"),
    (
        "footer-address",
        "T4-816, 4th Teaching Building\nNational Taiwan University of Science and Technology\nNo. 43, Sec. 4, Keelung Rd., Da'an Dist.\nTaipei City 10607, Taiwan",
        "第四教學大樓 T4-816\n國立臺灣科技大學\n臺北市大安區基隆路四段43號\n郵遞區號 10607",
    ),
];

/// Two-level mapping from (language, key) to display string.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<Language, HashMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in site strings for every supported language.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(key, en, zh) in BUILTIN {
            table.insert(Language::En, key, en);
            table.insert(Language::Zh, key, zh);
        }
        table
    }

    pub fn insert(
        &mut self,
        lang: Language,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .entry(lang)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Looks up `(lang, key)`. `None` means the caller keeps whatever
    /// text is already rendered; there is no fallback chain.
    pub fn get(&self, lang: Language, key: &str) -> Option<&str> {
        self.entries
            .get(&lang)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
    }

    /// Keys present for `lang`, in no particular order.
    pub fn keys_for(&self, lang: Language) -> impl Iterator<Item = &str> {
        self.entries
            .get(&lang)
            .into_iter()
            .flat_map(|strings| strings.keys().map(String::as_str))
    }
}

/// Single source of truth for the active display language.
///
/// Owns the translation table and the active language; everything else
/// reads through `active()` rather than a shared global. Missing-key
/// lookups are collected in a diagnostics buffer instead of surfacing.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    active: Language,
    table: TranslationTable,
    missing: Vec<(Language, String)>,
}

impl LocaleStore {
    /// Builds a store from the persisted preference. An absent or
    /// unrecognized value falls back to the default language; this never
    /// fails and never writes.
    pub fn initialize(table: TranslationTable, prefs: &Preferences) -> Self {
        let active = prefs
            .get(LANGUAGE_PREF_KEY)
            .and_then(Language::from_code)
            .unwrap_or_default();
        Self {
            active,
            table,
            missing: Vec::new(),
        }
    }

    pub fn active(&self) -> Language {
        self.active
    }

    /// Looks up `key` in the active language.
    pub fn translate(&self, key: &str) -> Option<&str> {
        self.table.get(self.active, key)
    }

    /// The localized unit noun for a result count. English distinguishes
    /// singular at exactly one; the Chinese table maps both keys to the
    /// same noun, so no per-language branch is needed here.
    pub fn unit_noun(&self, count: usize) -> &str {
        let key = if count == 1 { "unit-paper" } else { "unit-papers" };
        self.table.get(self.active, key).unwrap_or("")
    }

    /// Applies `lang` to every tagged node on the page, updates the
    /// document language attribute and the toggle control, persists the
    /// choice, and makes `lang` active.
    ///
    /// A key with no entry for `lang` leaves the node's current text in
    /// place; the miss is recorded for `drain_missing`. Text-role nodes
    /// have embedded line breaks converted to the page's break markup.
    pub fn apply(&mut self, lang: Language, page: &mut Page, prefs: &mut Preferences) {
        let line_break = page.line_break.clone();
        for node in &mut page.nodes {
            match self.table.get(lang, &node.key) {
                Some(text) => {
                    node.content = match node.role {
                        NodeRole::Text => text.replace('\n', &line_break),
                        NodeRole::Placeholder | NodeRole::Label => text.to_string(),
                    };
                }
                None => self.missing.push((lang, node.key.clone())),
            }
        }
        page.document_lang = lang.document_code().to_string();
        page.toggle_label = lang.indicator_label().to_string();
        prefs.set(LANGUAGE_PREF_KEY, lang.code());
        self.active = lang;
    }

    /// Applies the next language in rotation order.
    pub fn toggle(&mut self, page: &mut Page, prefs: &mut Preferences) {
        self.apply(self.active.next(), page, prefs);
    }

    /// Drains the accumulated missing-key diagnostics. Development-time
    /// information only; users never see these.
    pub fn drain_missing(&mut self) -> Vec<(Language, String)> {
        std::mem::take(&mut self.missing)
    }
}
