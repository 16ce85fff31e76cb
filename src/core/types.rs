// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A display language supported by the site.
///
/// Exactly one language is active at a time; the active one lives in the
/// `LocaleStore`, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Languages in rotation order. The toggle walks this list, so adding
    /// a language here extends the cycle without touching the toggle.
    pub const SUPPORTED: [Language; 2] = [Language::En, Language::Zh];

    /// The persisted wire code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Parses a persisted wire code. Unrecognized codes map to `None` so
    /// the caller falls back to the default language.
    pub fn from_code(code: &str) -> Option<Language> {
        Self::SUPPORTED.iter().copied().find(|l| l.code() == code)
    }

    /// The document-level language attribute. The site's Chinese copy is
    /// Traditional, so it carries the regional `zh-TW` tag.
    pub fn document_code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh-TW",
        }
    }

    /// The language after this one in rotation order.
    pub fn next(self) -> Language {
        let pos = Self::SUPPORTED.iter().position(|&l| l == self).unwrap_or(0);
        Self::SUPPORTED[(pos + 1) % Self::SUPPORTED.len()]
    }

    /// Label the toggle control shows while this language is active: the
    /// name of the language the control switches to.
    pub fn indicator_label(self) -> &'static str {
        match self.next() {
            Language::En => "EN",
            Language::Zh => "中文",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_for_all_supported() {
        for lang in Language::SUPPORTED {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unrecognized_code_is_none() {
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("EN"), None);
    }

    #[test]
    fn rotation_is_an_involution_over_two_languages() {
        for lang in Language::SUPPORTED {
            assert_eq!(lang.next().next(), lang);
        }
    }

    #[test]
    fn indicator_names_the_next_language() {
        assert_eq!(Language::En.indicator_label(), "中文");
        assert_eq!(Language::Zh.indicator_label(), "EN");
    }

    #[test]
    fn chinese_document_tag_is_regional() {
        assert_eq!(Language::Zh.document_code(), "zh-TW");
        assert_eq!(Language::En.document_code(), "en");
    }
}
