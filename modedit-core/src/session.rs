//! Editing session
//!
//! One `EditorSession` is created per editor window and passed by reference to
//! whatever needs it. It owns the configuration store, the data dictionary and
//! the settings, and hands out editors that borrow them for a single call
//! sequence.

use crate::collection::{CollectionEditor, CollectionHint, StoreCollection};
use crate::diagram::{self, Diagram, DEFAULT_MODULE_NAME};
use crate::dictionary::DataDictionary;
use crate::interfaces::InterfaceEditor;
use crate::parameters::ParameterEditor;
use crate::store::{ConfigStore, StringCollection};
use modedit_libs::{AppError, EditorSettings, Reset};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name of the data dictionary next to the module directories.
pub const DICTIONARY_DIR_NAME: &str = "amm_data";

/// Editor over one string collection of the session's document.
pub type StringCollectionEditor<'a> = CollectionEditor<StoreCollection<'a>>;

/// Outcome of [`EditorSession::open`].
#[derive(Debug)]
pub struct OpenReport {
    /// Enumeration values replaced while loading
    pub resets: Vec<Reset>,
    /// Directory the dictionary was loaded from, if any
    pub dictionary_dir: Option<PathBuf>,
    /// Why the dictionary could not be loaded; interfaces are read-only then
    pub dictionary_error: Option<AppError>,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    store: ConfigStore,
    dictionary: DataDictionary,
    settings: EditorSettings,
}

impl EditorSession {
    /// Create a session with an empty document and no dictionary.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            store: ConfigStore::new(),
            dictionary: DataDictionary::new(),
            settings,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn dictionary(&self) -> &DataDictionary {
        &self.dictionary
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Open a module configuration, then load the data dictionary for it.
    ///
    /// A configuration load failure leaves the session untouched. A dictionary
    /// failure does not undo the configuration load; it is reported in the
    /// returned [`OpenReport`].
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<OpenReport, AppError> {
        let path = path.as_ref();
        let resets = self.store.load(path, &self.settings.vocabulary)?;

        let dictionary_dir = self
            .settings
            .dictionary_dir
            .clone()
            .or_else(|| default_dictionary_dir(path));

        let mut report = OpenReport {
            resets,
            dictionary_dir: None,
            dictionary_error: None,
        };

        match dictionary_dir {
            Some(dir) => match self.dictionary.load(&dir) {
                Ok(()) => report.dictionary_dir = Some(dir),
                Err(e) => {
                    warn!("Interfaces cannot be edited until a dictionary is loaded");
                    report.dictionary_error = Some(e);
                }
            },
            None => {
                report.dictionary_error = Some(AppError::DictionaryError(format!(
                    "No data dictionary location for {:?}",
                    path
                )));
            }
        }

        info!("Module configuration opened: {:?}", path);
        Ok(report)
    }

    pub fn save(&mut self) -> Result<(), AppError> {
        self.store.save()
    }

    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AppError> {
        self.store.save_as(path)
    }

    /// True when closing now would lose edits.
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_changed()
    }

    pub fn description(&self) -> &str {
        self.store.description()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.store.set_description(description);
    }

    pub fn load_dictionary<P: AsRef<Path>>(&mut self, dir: P) -> Result<(), AppError> {
        self.dictionary.load(dir)
    }

    pub fn reload_dictionary(&mut self) -> Result<(), AppError> {
        self.dictionary.reload()
    }

    pub fn collection(&mut self, collection: StringCollection) -> StringCollectionEditor<'_> {
        CollectionEditor::new(
            StoreCollection::new(&mut self.store, collection),
            CollectionHint::for_collection(collection),
        )
    }

    pub fn header_paths(&mut self) -> StringCollectionEditor<'_> {
        self.collection(StringCollection::HeaderPaths)
    }

    pub fn c_sources(&mut self) -> StringCollectionEditor<'_> {
        self.collection(StringCollection::CSources)
    }

    pub fn cxx_sources(&mut self) -> StringCollectionEditor<'_> {
        self.collection(StringCollection::CxxSources)
    }

    pub fn libraries(&mut self) -> StringCollectionEditor<'_> {
        self.collection(StringCollection::Libraries)
    }

    pub fn library_paths(&mut self) -> StringCollectionEditor<'_> {
        self.collection(StringCollection::LibraryPaths)
    }

    pub fn parameters(&mut self) -> ParameterEditor<'_> {
        ParameterEditor::new(&mut self.store, &self.settings.vocabulary)
    }

    pub fn interfaces(&mut self) -> InterfaceEditor<'_> {
        InterfaceEditor::new(
            &mut self.store,
            &self.dictionary,
            &self.settings.vocabulary,
        )
    }

    /// Hub label: the configuration file stem, or `module` before a save.
    pub fn module_name(&self) -> String {
        self.store
            .path()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_MODULE_NAME)
            .to_string()
    }

    /// Snapshot of the interface diagram for the current document.
    pub fn diagram(&self) -> Diagram {
        diagram::build(
            &self.module_name(),
            &self.store.document().interfaces,
            &self.settings.vocabulary,
            &self.settings.layout,
        )
    }
}

/// `<config dir>/../amm_data`, the layout used by module repositories.
pub fn default_dictionary_dir(config_path: &Path) -> Option<PathBuf> {
    config_path
        .parent()
        .and_then(Path::parent)
        .map(|root| root.join(DICTIONARY_DIR_NAME))
}
