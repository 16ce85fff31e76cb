// File: src/persistence.rs
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Session-spanning string key/value store: the persisted side of the
/// user's language and theme choices. Keys this build does not know are
/// kept and written back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Reads a preference file. Callers fall back to `Preferences::new()`
    /// when this errors; a missing or corrupt file is not fatal.
    pub fn load_from_disk(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the preferences atomically: serialize into a temp file in
    /// the target directory, then persist it over the destination.
    pub fn save_to_disk(&self, path: &Path) -> Result<(), Error> {
        let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        let writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| Error::new(std::io::ErrorKind::Other, e))?;

        temp_file.persist(path)?;
        Ok(())
    }
}

/// The preference file under the user's config directory.
pub fn default_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ldahs-site");
    path.push("preferences.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut prefs = Preferences::new();
        prefs.set("language", "zh");
        prefs.set("theme", "dark");
        prefs.save_to_disk(&path).unwrap();

        let loaded = Preferences::load_from_disk(&path).unwrap();
        assert_eq!(loaded.get("language"), Some("zh"));
        assert_eq!(loaded.get("theme"), Some("dark"));
        assert_eq!(loaded.get("font"), None);
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut prefs = Preferences::new();
        prefs.set("future-setting", "42");
        prefs.save_to_disk(&path).unwrap();

        let loaded = Preferences::load_from_disk(&path).unwrap();
        assert_eq!(loaded.get("future-setting"), Some("42"));
    }

    #[test]
    fn missing_file_errors_instead_of_panicking() {
        assert!(Preferences::load_from_disk(Path::new("no/such/prefs.json")).is_err());
    }

    #[test]
    fn on_disk_layout_is_a_flat_string_map() {
        let mut prefs = Preferences::new();
        prefs.set("language", "en");
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"language":"en"}"#);
    }
}
