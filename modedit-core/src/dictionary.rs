//! Data dictionary
//!
//! Read-only authority for valid message and service names. The dictionary is
//! loaded from a directory of YAML files; each load builds a complete snapshot
//! before it replaces the previous one.

use modedit_libs::{AppError, DirectionCategory};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Contents of a single dictionary file.
///
/// ```yaml
/// messages:
///   - Heartbeat
///   - Status
/// services:
///   - Calibrate
/// ```
#[derive(Debug, Default, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    messages: Vec<String>,

    #[serde(default)]
    services: Vec<String>,
}

/// Immutable set of known names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySnapshot {
    messages: BTreeSet<String>,
    services: BTreeSet<String>,
}

impl DictionarySnapshot {
    pub fn new<M, S>(messages: M, services: S) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            services: services.into_iter().map(Into::into).collect(),
        }
    }

    pub fn message_names(&self) -> &BTreeSet<String> {
        &self.messages
    }

    pub fn service_names(&self) -> &BTreeSet<String> {
        &self.services
    }

    /// The set an interface name of `category` is checked against.
    pub fn names(&self, category: DirectionCategory) -> &BTreeSet<String> {
        match category {
            DirectionCategory::Message => &self.messages,
            DirectionCategory::Service => &self.services,
        }
    }

    pub fn contains(&self, category: DirectionCategory, name: &str) -> bool {
        self.names(category).contains(name)
    }
}

/// Handle to the current dictionary snapshot, if any.
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    snapshot: Option<Arc<DictionarySnapshot>>,
    source: Option<PathBuf>,
}

impl DataDictionary {
    /// Create an unloaded dictionary; interface validation is unavailable
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary from an already built snapshot.
    pub fn from_snapshot(snapshot: DictionarySnapshot) -> Self {
        Self {
            snapshot: Some(Arc::new(snapshot)),
            source: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Current snapshot. Clones of the `Arc` stay valid across reloads.
    pub fn snapshot(&self) -> Option<Arc<DictionarySnapshot>> {
        self.snapshot.clone()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sorted message names, empty when unloaded.
    pub fn message_names(&self) -> Vec<String> {
        self.names(DirectionCategory::Message)
    }

    /// Sorted service names, empty when unloaded.
    pub fn service_names(&self) -> Vec<String> {
        self.names(DirectionCategory::Service)
    }

    pub fn names(&self, category: DirectionCategory) -> Vec<String> {
        self.snapshot
            .as_ref()
            .map(|s| s.names(category).iter().cloned().collect())
            .unwrap_or_default()
    }

    /// `None` when no dictionary is loaded.
    pub fn contains(&self, category: DirectionCategory, name: &str) -> Option<bool> {
        self.snapshot.as_ref().map(|s| s.contains(category, name))
    }

    /// Load the dictionary found under `dir`.
    ///
    /// On failure the previous snapshot, if any, stays in place.
    pub fn load<P: AsRef<Path>>(&mut self, dir: P) -> Result<(), AppError> {
        let dir = dir.as_ref();

        match read_dictionary_dir(dir) {
            Ok(snapshot) => {
                info!(
                    "Data dictionary loaded from {:?}: {} messages, {} services",
                    dir,
                    snapshot.messages.len(),
                    snapshot.services.len()
                );
                self.snapshot = Some(Arc::new(snapshot));
                self.source = Some(dir.to_path_buf());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load data dictionary from {:?}: {}", dir, e);
                Err(e)
            }
        }
    }

    /// Load again from the last successfully loaded directory.
    pub fn reload(&mut self) -> Result<(), AppError> {
        let dir = self.source.clone().ok_or_else(|| {
            AppError::DictionaryError("No data dictionary directory to reload".to_string())
        })?;
        self.load(dir)
    }
}

/// Read every `*.yaml` / `*.yml` file below `dir` into one snapshot.
///
/// A missing directory, any unreadable or malformed file, or a directory
/// without dictionary files is an error.
pub fn read_dictionary_dir<P: AsRef<Path>>(dir: P) -> Result<DictionarySnapshot, AppError> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(AppError::DictionaryError(format!(
            "{:?} is not a directory",
            dir
        )));
    }

    let mut snapshot = DictionarySnapshot::default();
    let mut files = 0;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            AppError::DictionaryError(format!("Failed to scan {:?}: {}", dir, e))
        })?;

        if !entry.file_type().is_file() || !is_yaml(entry.path()) {
            continue;
        }

        let contents = fs::read_to_string(entry.path()).map_err(|e| {
            AppError::DictionaryError(format!("Failed to read {:?}: {}", entry.path(), e))
        })?;

        let file: DictionaryFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::DictionaryError(format!("Failed to parse {:?}: {}", entry.path(), e))
        })?;

        snapshot.messages.extend(file.messages);
        snapshot.services.extend(file.services);
        files += 1;
    }

    if files == 0 {
        return Err(AppError::DictionaryError(format!(
            "No dictionary files found in {:?}",
            dir
        )));
    }

    Ok(snapshot)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_dictionary(dir: &Path) {
        fs::create_dir_all(dir.join("physiology")).unwrap();
        fs::write(
            dir.join("core.yaml"),
            "messages: [Heartbeat, Status]\nservices: [Calibrate]\n",
        )
        .unwrap();
        fs::write(
            dir.join("physiology").join("vitals.yml"),
            "messages: [HeartRate]\n",
        )
        .unwrap();
        fs::write(dir.join("README.txt"), "not a dictionary").unwrap();
    }

    #[test]
    fn test_load_merges_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        write_dictionary(temp_dir.path());

        let mut dictionary = DataDictionary::new();
        dictionary.load(temp_dir.path()).unwrap();

        assert_eq!(
            dictionary.message_names(),
            vec!["HeartRate", "Heartbeat", "Status"]
        );
        assert_eq!(dictionary.service_names(), vec!["Calibrate"]);
        assert_eq!(
            dictionary.contains(DirectionCategory::Service, "Calibrate"),
            Some(true)
        );
    }

    #[test]
    fn test_unloaded_dictionary() {
        let dictionary = DataDictionary::new();
        assert!(!dictionary.is_loaded());
        assert!(dictionary.message_names().is_empty());
        assert_eq!(dictionary.contains(DirectionCategory::Message, "Heartbeat"), None);
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_dictionary_dir(temp_dir.path().join("amm_data"));
        assert!(matches!(result, Err(AppError::DictionaryError(_))));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_dictionary_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_failed_reload_keeps_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        write_dictionary(temp_dir.path());

        let mut dictionary = DataDictionary::new();
        dictionary.load(temp_dir.path()).unwrap();
        let before = dictionary.snapshot().unwrap();

        fs::write(temp_dir.path().join("broken.yaml"), "messages: [").unwrap();
        assert!(dictionary.reload().is_err());

        assert_eq!(dictionary.snapshot().unwrap(), before);
        assert_eq!(dictionary.source(), Some(temp_dir.path()));
    }

    #[test]
    fn test_reload_replaces_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        write_dictionary(temp_dir.path());

        let mut dictionary = DataDictionary::new();
        dictionary.load(temp_dir.path()).unwrap();
        let held = dictionary.snapshot().unwrap();

        fs::write(temp_dir.path().join("extra.yaml"), "messages: [Alarm]\n").unwrap();
        dictionary.reload().unwrap();

        assert!(dictionary.message_names().contains(&"Alarm".to_string()));
        assert!(!held.message_names().contains("Alarm"));
    }

    #[test]
    fn test_reload_without_source() {
        let mut dictionary = DataDictionary::from_snapshot(DictionarySnapshot::new(
            ["Heartbeat"],
            Vec::<String>::new(),
        ));
        assert!(dictionary.reload().is_err());
        assert!(dictionary.is_loaded());
    }
}
