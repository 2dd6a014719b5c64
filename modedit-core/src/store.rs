//! Configuration store
//!
//! Owns the in-memory module configuration and its dirty flag. Editors read
//! through [`ConfigStore::document`] and only take [`ConfigStore::document_mut`]
//! once an operation is known to succeed, so a rejected edit never leaves a
//! partial change or a stale dirty flag behind.

use modedit_libs::{load_config, save_config, AppError, ModuleConfig, Reset, Vocabulary};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The five plain string collections of a module configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringCollection {
    HeaderPaths,
    CSources,
    CxxSources,
    Libraries,
    LibraryPaths,
}

/// Single-writer owner of the configuration document.
#[derive(Debug, Default)]
pub struct ConfigStore {
    document: ModuleConfig,
    changed: bool,
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// Create a store holding an empty, unchanged document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing document that has never been persisted.
    pub fn from_document(document: ModuleConfig) -> Self {
        Self {
            document,
            changed: false,
            path: None,
        }
    }

    pub fn document(&self) -> &ModuleConfig {
        &self.document
    }

    /// File the document was loaded from or last saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True when the document differs from the last loaded or saved state.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Mutable access for an edit that has already been validated.
    pub(crate) fn document_mut(&mut self) -> &mut ModuleConfig {
        self.changed = true;
        &mut self.document
    }

    pub fn collection(&self, collection: StringCollection) -> &[String] {
        let doc = &self.document;
        match collection {
            StringCollection::HeaderPaths => &doc.header_paths,
            StringCollection::CSources => &doc.c_sources,
            StringCollection::CxxSources => &doc.cxx_sources,
            StringCollection::Libraries => &doc.libraries,
            StringCollection::LibraryPaths => &doc.library_paths,
        }
    }

    pub(crate) fn collection_mut(&mut self, collection: StringCollection) -> &mut Vec<String> {
        let doc = self.document_mut();
        match collection {
            StringCollection::HeaderPaths => &mut doc.header_paths,
            StringCollection::CSources => &mut doc.c_sources,
            StringCollection::CxxSources => &mut doc.cxx_sources,
            StringCollection::Libraries => &mut doc.libraries,
            StringCollection::LibraryPaths => &mut doc.library_paths,
        }
    }

    pub fn description(&self) -> &str {
        &self.document.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        if description != self.document.description {
            self.document_mut().description = description;
        }
    }

    /// Replace the document with the contents of `path`.
    ///
    /// Enumeration values unknown to `vocabulary` are reset to the defaults and
    /// returned; in that case the document is marked changed because it no
    /// longer matches the file. On any error the current document is kept.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        vocabulary: &Vocabulary,
    ) -> Result<Vec<Reset>, AppError> {
        let path = path.as_ref();

        info!("Loading module configuration from: {:?}", path);

        let mut document = load_config(path)?;
        let resets = vocabulary.normalize(&mut document);

        for reset in &resets {
            warn!(
                "Invalid {} '{}' for '{}', resetting to '{}'",
                reset.field, reset.from, reset.owner, reset.to
            );
        }

        self.document = document;
        self.changed = !resets.is_empty();
        self.path = Some(path.to_path_buf());

        info!(
            "Loaded {} parameters and {} interfaces",
            self.document.parameters.len(),
            self.document.interfaces.len()
        );
        Ok(resets)
    }

    /// Write the document back to the file it came from.
    pub fn save(&mut self) -> Result<(), AppError> {
        let path = self.path.clone().ok_or_else(|| {
            AppError::ConfigError("No file name set for this configuration".to_string())
        })?;
        self.save_as(path)
    }

    /// Write the document to `path` and remember it as the current file.
    ///
    /// The dirty flag is only cleared when the write succeeds.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AppError> {
        let path = path.as_ref();

        info!("Saving module configuration to: {:?}", path);

        save_config(&self.document, path)?;

        self.changed = false;
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

/// Smallest `prefix{n}` (n >= 0) for which `taken` is false.
pub(crate) fn next_free_name(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut suffix: usize = 0;
    loop {
        let candidate = format!("{}{}", prefix, suffix);
        if !taken(&candidate) {
            debug!("Synthesized name '{}'", candidate);
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modedit_libs::{InterfaceConfig, ParameterConfig};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> ModuleConfig {
        ModuleConfig {
            description: "Pulse oximeter".to_string(),
            header_paths: vec!["include".to_string(), "third_party".to_string()],
            libraries: vec!["libm.a".to_string()],
            parameters: vec![ParameterConfig::new("gain", "double")],
            interfaces: vec![
                InterfaceConfig::new("Heartbeat", "input", "periodic"),
                InterfaceConfig::new("Status", "output", "on_change"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_new_store_is_clean() {
        let store = ConfigStore::new();
        assert!(!store.is_changed());
        assert!(store.path().is_none());
        assert_eq!(store.document(), &ModuleConfig::default());
    }

    #[test]
    fn test_set_description_marks_changed() {
        let mut store = ConfigStore::new();
        store.set_description("");
        assert!(!store.is_changed());

        store.set_description("Ventilator");
        assert!(store.is_changed());
        assert_eq!(store.description(), "Ventilator");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("module.yaml");

        let mut store = ConfigStore::from_document(sample());
        store.set_description("Pulse oximeter v2");
        store.save_as(&path).unwrap();
        assert!(!store.is_changed());

        let mut reloaded = ConfigStore::new();
        let resets = reloaded.load(&path, &Vocabulary::default()).unwrap();

        assert!(resets.is_empty());
        assert_eq!(reloaded.document(), store.document());
        assert!(!reloaded.is_changed());
        assert_eq!(reloaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "parameters: [ {name: ").unwrap();

        let mut store = ConfigStore::from_document(sample());
        store.set_description("edited");

        let result = store.load(&path, &Vocabulary::default());
        assert!(result.is_err());
        assert_eq!(store.description(), "edited");
        assert!(store.is_changed());
    }

    #[test]
    fn test_load_with_unknown_type_marks_changed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("module.yaml");
        fs::write(
            &path,
            "parameters:\n  - name: gain\n    type: quaternion\n",
        )
        .unwrap();

        let mut store = ConfigStore::new();
        let resets = store.load(&path, &Vocabulary::default()).unwrap();

        assert_eq!(resets.len(), 1);
        assert_eq!(store.document().parameters[0].data_type, "bool");
        assert!(store.is_changed());
    }

    #[test]
    fn test_failed_save_keeps_changed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("module.yaml");

        let mut store = ConfigStore::new();
        store.set_description("unsaved");

        assert!(store.save_as(&path).is_err());
        assert!(store.is_changed());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_save_without_path() {
        let mut store = ConfigStore::new();
        assert!(matches!(store.save(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_next_free_name_skips_taken() {
        let taken = ["new_param_0", "new_param_2"];
        let name = next_free_name("new_param_", |n| taken.contains(&n));
        assert_eq!(name, "new_param_1");
    }
}
