// src/core/filter.rs
use crate::core::locale::LocaleStore;
use crate::core::publications::YearGroup;

/// Year restriction: every year, or one exact year label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    All,
    Year(String),
}

impl YearFilter {
    /// Parses a selector value, treating `"all"` as the sentinel it is
    /// in the markup.
    pub fn from_value(value: &str) -> Self {
        if value == "all" {
            YearFilter::All
        } else {
            YearFilter::Year(value.to_string())
        }
    }
}

/// Current filter inputs. The query is stored trimmed and case-folded,
/// so matching is a plain substring test against case-folded fields.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    query: String,
    year: YearFilter,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = raw.trim().to_lowercase();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_year(&mut self, year: YearFilter) {
        self.year = year;
    }

    pub fn year(&self) -> &YearFilter {
        &self.year
    }

    /// The filter is active once either input narrows the list; the
    /// count message is shown only while active.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.year != YearFilter::All
    }

    /// Recomputes visibility for every entry and group.
    ///
    /// An entry is visible iff the query is empty or a case-insensitive
    /// substring of its title, authors, or venue, AND the year filter is
    /// `All` or equals the group label exactly (string equality, not
    /// numeric). A group is visible iff any of its entries is. O(n) over
    /// the entry list; fields are matched independently, any one match
    /// suffices.
    pub fn recompute(&self, groups: &[YearGroup], locale: &LocaleStore) -> FilterReport {
        let mut report = FilterReport::default();
        for group in groups {
            let mut group_visible = false;
            let mut row = Vec::with_capacity(group.entries.len());
            for entry in &group.entries {
                report.total_count += 1;
                let matches_query = self.query.is_empty()
                    || entry.title.to_lowercase().contains(&self.query)
                    || entry.authors.to_lowercase().contains(&self.query)
                    || entry.venue.to_lowercase().contains(&self.query);
                let matches_year = match &self.year {
                    YearFilter::All => true,
                    YearFilter::Year(label) => *label == group.label,
                };
                let visible = matches_query && matches_year;
                if visible {
                    report.visible_count += 1;
                    group_visible = true;
                }
                row.push(visible);
            }
            report.entry_visible.push(row);
            report.group_visible.push(group_visible);
        }
        report.message = self.render_message(report.visible_count, locale);
        report
    }

    /// The localized `"{count} {unit}"` result line, or `None` while the
    /// filter is inactive. Split out so a language change can re-phrase a
    /// displayed message without recomputing visibility.
    pub fn render_message(&self, visible_count: usize, locale: &LocaleStore) -> Option<String> {
        self.is_active()
            .then(|| format!("{} {}", visible_count, locale.unit_noun(visible_count)))
    }
}

/// Outcome of one `recompute`: what to show, what to hide, and the
/// localized result line. Rows parallel the group/entry structure.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub entry_visible: Vec<Vec<bool>>,
    pub group_visible: Vec<bool>,
    pub visible_count: usize,
    pub total_count: usize,
    pub message: Option<String>,
}
