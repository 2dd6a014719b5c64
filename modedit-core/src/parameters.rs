//! Parameter editor
//!
//! Manages the ordered, name-keyed list of module parameters.

use crate::store::{next_free_name, ConfigStore};
use modedit_libs::{EditError, ParameterConfig, Vocabulary};
use tracing::{debug, warn};

/// Prefix for synthesized parameter names.
pub const NEW_PARAMETER_PREFIX: &str = "new_param_";

/// Editing operations on the parameters of a [`ConfigStore`].
pub struct ParameterEditor<'a> {
    store: &'a mut ConfigStore,
    vocabulary: &'a Vocabulary,
}

impl<'a> ParameterEditor<'a> {
    pub fn new(store: &'a mut ConfigStore, vocabulary: &'a Vocabulary) -> Self {
        Self { store, vocabulary }
    }

    /// Parameter names in display order.
    pub fn list(&self) -> Vec<String> {
        self.store
            .document()
            .parameters
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterConfig> {
        self.store.document().parameters.iter().find(|p| p.name == name)
    }

    /// Supported data types, in selector order.
    pub fn data_types(&self) -> &[String] {
        &self.vocabulary.data_types
    }

    fn index_of(&self, name: &str) -> Result<usize, EditError> {
        self.store
            .document()
            .parameters
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| EditError::NotFound(name.to_string()))
    }

    /// Append a parameter with a fresh `new_param_N` name and return the name.
    pub fn add_parameter(&mut self) -> String {
        let name = next_free_name(NEW_PARAMETER_PREFIX, |n| self.get(n).is_some());
        let parameter = ParameterConfig::new(name.clone(), self.vocabulary.default_data_type());

        self.store.document_mut().parameters.push(parameter);
        debug!("Added parameter '{}'", name);
        name
    }

    /// Remove `name`; returns false when there was nothing to remove.
    pub fn delete_parameter(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Ok(index) => {
                self.store.document_mut().parameters.remove(index);
                debug!("Deleted parameter '{}'", name);
                true
            }
            Err(_) => false,
        }
    }

    /// Move the record at `old_name` to `new_name`, keeping its fields.
    pub fn rename_parameter(&mut self, old_name: &str, new_name: &str) -> Result<(), EditError> {
        let index = self.index_of(old_name)?;

        if old_name == new_name {
            return Ok(());
        }
        if new_name.is_empty() {
            return Err(EditError::EmptyName);
        }
        if self.get(new_name).is_some() {
            warn!("Rejected rename of '{}': '{}' already exists", old_name, new_name);
            return Err(EditError::Duplicate(new_name.to_string()));
        }

        self.store.document_mut().parameters[index].name = new_name.to_string();
        debug!("Renamed parameter '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    /// Rename the parameter shown at `row`.
    ///
    /// The previous name is taken from the current order, which is the order
    /// returned by [`ParameterEditor::list`].
    pub fn rename_at(&mut self, row: usize, new_name: &str) -> Result<(), EditError> {
        let old_name = self
            .store
            .document()
            .parameters
            .get(row)
            .map(|p| p.name.clone())
            .ok_or_else(|| EditError::NotFound(format!("row {}", row)))?;
        self.rename_parameter(&old_name, new_name)
    }

    fn update(
        &mut self,
        name: &str,
        apply: impl FnOnce(&mut ParameterConfig),
    ) -> Result<(), EditError> {
        let index = self.index_of(name)?;
        apply(&mut self.store.document_mut().parameters[index]);
        Ok(())
    }

    pub fn set_description(&mut self, name: &str, description: &str) -> Result<(), EditError> {
        self.update(name, |p| p.description = description.to_string())
    }

    pub fn set_units(&mut self, name: &str, units: &str) -> Result<(), EditError> {
        self.update(name, |p| p.units = units.to_string())
    }

    pub fn set_default_value(&mut self, name: &str, value: &str) -> Result<(), EditError> {
        self.update(name, |p| p.default_value = value.to_string())
    }

    /// Change the data type; unknown types are rejected with the current one.
    pub fn set_data_type(&mut self, name: &str, data_type: &str) -> Result<(), EditError> {
        let index = self.index_of(name)?;

        if !self.vocabulary.has_data_type(data_type) {
            let current = self.store.document().parameters[index].data_type.clone();
            warn!("Rejected data type '{}' for parameter '{}'", data_type, name);
            return Err(EditError::UnknownDataType {
                requested: data_type.to_string(),
                current,
            });
        }

        self.store.document_mut().parameters[index].data_type = data_type.to_string();
        Ok(())
    }

    pub fn set_adjustable(&mut self, name: &str, adjustable: bool) -> Result<(), EditError> {
        self.update(name, |p| p.adjustable = adjustable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modedit_libs::ModuleConfig;

    fn store_with(names: &[&str]) -> ConfigStore {
        ConfigStore::from_document(ModuleConfig {
            parameters: names
                .iter()
                .map(|n| ParameterConfig::new(*n, "double"))
                .collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_add_parameter_fills_gaps() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["new_param_0", "new_param_2"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        assert_eq!(editor.add_parameter(), "new_param_1");
        assert_eq!(editor.add_parameter(), "new_param_3");

        let added = editor.get("new_param_1").unwrap();
        assert_eq!(added.data_type, "bool");
        assert!(added.description.is_empty());
        assert!(!added.adjustable);
        assert!(store.is_changed());
    }

    #[test]
    fn test_add_parameter_n_times_distinct() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain", "new_param_1"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        let added: Vec<String> = (0..5).map(|_| editor.add_parameter()).collect();

        let mut unique = added.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
        assert!(!added.contains(&"new_param_1".to_string()));
        assert_eq!(editor.list().len(), 7);
    }

    #[test]
    fn test_rename_to_existing_rejected() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain", "offset"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        let result = editor.rename_parameter("gain", "offset");
        assert_eq!(result, Err(EditError::Duplicate("offset".to_string())));
        assert_eq!(editor.list(), vec!["gain", "offset"]);
        assert!(!store.is_changed());
    }

    #[test]
    fn test_rename_preserves_fields_and_order() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain", "offset"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        editor.set_units("gain", "dB").unwrap();
        editor.set_adjustable("gain", true).unwrap();
        editor.rename_parameter("gain", "amplification").unwrap();

        assert_eq!(editor.list(), vec!["amplification", "offset"]);
        let renamed = editor.get("amplification").unwrap();
        assert_eq!(renamed.units, "dB");
        assert!(renamed.adjustable);
        assert!(editor.get("gain").is_none());
    }

    #[test]
    fn test_rename_same_name_is_noop() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        assert!(editor.rename_parameter("gain", "gain").is_ok());
        assert!(!store.is_changed());
    }

    #[test]
    fn test_rename_empty_rejected() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        assert_eq!(editor.rename_parameter("gain", ""), Err(EditError::EmptyName));
        assert_eq!(editor.list(), vec!["gain"]);
    }

    #[test]
    fn test_rename_at_row() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain", "offset"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        editor.rename_at(1, "bias").unwrap();
        assert_eq!(editor.list(), vec!["gain", "bias"]);
        assert!(editor.rename_at(5, "x").is_err());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        assert!(!editor.delete_parameter("offset"));
        assert!(!store.is_changed());

        let mut editor = ParameterEditor::new(&mut store, &vocabulary);
        assert!(editor.delete_parameter("gain"));
        assert!(editor.list().is_empty());
    }

    #[test]
    fn test_invalid_data_type_reports_current() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["gain"]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        let result = editor.set_data_type("gain", "quaternion");
        assert_eq!(
            result,
            Err(EditError::UnknownDataType {
                requested: "quaternion".to_string(),
                current: "double".to_string(),
            })
        );

        editor.set_data_type("gain", "float").unwrap();
        assert_eq!(editor.get("gain").unwrap().data_type, "float");
    }

    #[test]
    fn test_data_types_follow_vocabulary() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&[]);
        let editor = ParameterEditor::new(&mut store, &vocabulary);

        assert_eq!(editor.data_types(), Vocabulary::default().data_types.as_slice());
        assert_eq!(editor.data_types()[0], "bool");
    }

    #[test]
    fn test_list_is_idempotent() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&["offset", "gain", "bias"]);
        let editor = ParameterEditor::new(&mut store, &vocabulary);

        assert_eq!(editor.list(), editor.list());
        assert_eq!(editor.list(), vec!["offset", "gain", "bias"]);
    }

    #[test]
    fn test_field_setters_require_existing_name() {
        let vocabulary = Vocabulary::default();
        let mut store = store_with(&[]);
        let mut editor = ParameterEditor::new(&mut store, &vocabulary);

        assert!(editor.set_description("gain", "x").is_err());
        assert!(editor.set_default_value("gain", "1").is_err());
        assert!(editor.set_adjustable("gain", true).is_err());
        assert!(!store.is_changed());
    }
}
