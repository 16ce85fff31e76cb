// src/core/publications.rs
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One bibliographic record as rendered on the page. The filter only
/// shows and hides entries; it never creates, deletes, or reorders them.
///
/// Every field defaults to empty so a partially filled record still
/// loads and matches as an empty string instead of erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub venue: String,
}

impl PublicationEntry {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            venue: venue.into(),
        }
    }
}

/// Publications sharing one year label, in page order (newest first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearGroup {
    pub label: String,
    #[serde(default)]
    pub entries: Vec<PublicationEntry>,
}

impl YearGroup {
    pub fn new(label: impl Into<String>, entries: Vec<PublicationEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }
}

/// Loads a publications dataset from a JSON file.
pub fn load_from_disk(path: &Path) -> Result<Vec<YearGroup>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Year labels in page order. The year selector prepends the localized
/// "all years" option to these.
pub fn year_options(groups: &[YearGroup]) -> Vec<String> {
    groups.iter().map(|g| g.label.clone()).collect()
}

/// Built-in dataset used when no JSON file is present.
pub fn sample() -> Vec<YearGroup> {
    vec![
        YearGroup::new(
            "2024",
            vec![
                PublicationEntry::new(
                    "Computerized adaptive testing for vocabulary size: a multilevel approach",
                    "Tseng, W.-T., & Lin, Y.-H.",
                    "Language Testing",
                ),
                PublicationEntry::new(
                    "Motivational self-system and L2 achievement: a meta-analytic path model",
                    "Tseng, W.-T., Chen, M.-L., & Smith, J.",
                    "Applied Linguistics",
                ),
            ],
        ),
        YearGroup::new(
            "2023",
            vec![
                PublicationEntry::new(
                    "Measuring self-regulated vocabulary learning with item response theory",
                    "Tseng, W.-T., & Chang, H.-C.",
                    "Studies in Second Language Acquisition",
                ),
                PublicationEntry::new(
                    "Structural equation modeling of willingness to communicate in EFL classrooms",
                    "Lin, Y.-H., & Tseng, W.-T.",
                    "System",
                ),
                PublicationEntry::new(
                    "A longitudinal multilevel analysis of listening anxiety",
                    "Chen, M.-L.",
                    "The Modern Language Journal",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_options_follow_group_order() {
        assert_eq!(year_options(&sample()), vec!["2024", "2023"]);
        assert!(year_options(&[]).is_empty());
    }

    #[test]
    fn entries_with_absent_fields_deserialize_as_empty() {
        let groups: Vec<YearGroup> =
            serde_json::from_str(r#"[{"label":"2022","entries":[{"title":"Untitled"}]}]"#)
                .unwrap();
        let entry = &groups[0].entries[0];
        assert_eq!(entry.title, "Untitled");
        assert_eq!(entry.authors, "");
        assert_eq!(entry.venue, "");
    }

    #[test]
    fn missing_dataset_file_is_an_error_not_a_panic() {
        assert!(load_from_disk(Path::new("no/such/file.json")).is_err());
    }
}
