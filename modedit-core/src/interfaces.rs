//! Interface editor
//!
//! Manages the ordered, name-keyed list of interfaces. Each interface has a
//! direction and an interface kind, both taken from the configured vocabulary.
//! The direction's category decides which data dictionary set the name must
//! belong to: message names for message directions, service names for service
//! directions.

use crate::dictionary::DataDictionary;
use crate::store::{next_free_name, ConfigStore};
use modedit_libs::{DirectionCategory, EditError, InterfaceConfig, Vocabulary};
use tracing::{debug, warn};

/// Prefix for synthesized interface names.
pub const NEW_INTERFACE_PREFIX: &str = "new_message_";

/// Editing operations on the interfaces of a [`ConfigStore`].
pub struct InterfaceEditor<'a> {
    store: &'a mut ConfigStore,
    dictionary: &'a DataDictionary,
    vocabulary: &'a Vocabulary,
}

impl<'a> InterfaceEditor<'a> {
    pub fn new(
        store: &'a mut ConfigStore,
        dictionary: &'a DataDictionary,
        vocabulary: &'a Vocabulary,
    ) -> Self {
        Self {
            store,
            dictionary,
            vocabulary,
        }
    }

    /// Interface names in display order.
    pub fn list(&self) -> Vec<String> {
        self.store
            .document()
            .interfaces
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceConfig> {
        self.store.document().interfaces.iter().find(|i| i.name == name)
    }

    /// Direction names, in selector order.
    pub fn directions(&self) -> Vec<String> {
        self.vocabulary.direction_names()
    }

    /// Interface kinds, in selector order.
    pub fn io_types(&self) -> &[String] {
        &self.vocabulary.io_types
    }

    fn index_of(&self, name: &str) -> Result<usize, EditError> {
        self.store
            .document()
            .interfaces
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| EditError::NotFound(name.to_string()))
    }

    /// Category of the interface's current direction.
    ///
    /// `None` for a direction that is not in the vocabulary.
    pub fn category(&self, name: &str) -> Result<Option<DirectionCategory>, EditError> {
        let index = self.index_of(name)?;
        let direction = &self.store.document().interfaces[index].direction;
        Ok(self.vocabulary.direction(direction).map(|d| d.category))
    }

    /// Append an interface named `new_message_N` with the default direction
    /// and kind.
    ///
    /// The synthesized name is a placeholder; it shows up in
    /// [`InterfaceEditor::invalid_interfaces`] until renamed.
    pub fn add_interface(&mut self) -> Result<String, EditError> {
        if !self.dictionary.is_loaded() {
            return Err(EditError::DictionaryUnavailable);
        }

        let name = next_free_name(NEW_INTERFACE_PREFIX, |n| self.get(n).is_some());
        let interface = InterfaceConfig::new(
            name.clone(),
            self.vocabulary.default_direction(),
            self.vocabulary.default_io_type(),
        );

        self.store.document_mut().interfaces.push(interface);
        debug!("Added interface '{}'", name);
        Ok(name)
    }

    /// Remove `name`; returns false when there was nothing to remove.
    pub fn delete_interface(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Ok(index) => {
                self.store.document_mut().interfaces.remove(index);
                debug!("Deleted interface '{}'", name);
                true
            }
            Err(_) => false,
        }
    }

    /// Change the direction of `name`.
    ///
    /// The name is kept even when the new direction belongs to the other
    /// category; check [`InterfaceEditor::is_name_valid`] afterwards and refresh
    /// the completion source from [`InterfaceEditor::name_candidates`].
    pub fn set_direction(&mut self, name: &str, direction: &str) -> Result<(), EditError> {
        let index = self.index_of(name)?;

        if self.vocabulary.direction(direction).is_none() {
            let current = self.store.document().interfaces[index].direction.clone();
            warn!("Rejected direction '{}' for interface '{}'", direction, name);
            return Err(EditError::UnknownDirection {
                requested: direction.to_string(),
                current,
            });
        }

        self.store.document_mut().interfaces[index].direction = direction.to_string();
        debug!("Interface '{}' direction set to '{}'", name, direction);
        Ok(())
    }

    pub fn set_io_type(&mut self, name: &str, io_type: &str) -> Result<(), EditError> {
        let index = self.index_of(name)?;

        if !self.vocabulary.has_io_type(io_type) {
            let current = self.store.document().interfaces[index].io_type.clone();
            warn!("Rejected interface type '{}' for interface '{}'", io_type, name);
            return Err(EditError::UnknownIoType {
                requested: io_type.to_string(),
                current,
            });
        }

        self.store.document_mut().interfaces[index].io_type = io_type.to_string();
        Ok(())
    }

    /// Rename `old_name` to a dictionary name matching its current direction.
    pub fn rename_interface(&mut self, old_name: &str, new_name: &str) -> Result<(), EditError> {
        let index = self.index_of(old_name)?;

        if old_name == new_name {
            return Ok(());
        }
        if new_name.is_empty() {
            return Err(EditError::EmptyName);
        }
        if self.get(new_name).is_some() {
            return Err(EditError::Duplicate(new_name.to_string()));
        }

        let category = self.category(old_name)?.ok_or_else(|| EditError::InvalidDirection {
            name: old_name.to_string(),
            direction: self.store.document().interfaces[index].direction.clone(),
        })?;

        match self.dictionary.contains(category, new_name) {
            None => return Err(EditError::DictionaryUnavailable),
            Some(false) => {
                warn!(
                    "Rejected rename of '{}': '{}' is not a known {} name",
                    old_name,
                    new_name,
                    category.as_str()
                );
                return Err(EditError::NotInDictionary {
                    name: new_name.to_string(),
                    category: category.as_str().to_string(),
                });
            }
            Some(true) => {}
        }

        self.store.document_mut().interfaces[index].name = new_name.to_string();
        debug!("Renamed interface '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    /// Rename the interface shown at `row`, see [`InterfaceEditor::rename_interface`].
    pub fn rename_at(&mut self, row: usize, new_name: &str) -> Result<(), EditError> {
        let old_name = self
            .store
            .document()
            .interfaces
            .get(row)
            .map(|i| i.name.clone())
            .ok_or_else(|| EditError::NotFound(format!("row {}", row)))?;
        self.rename_interface(&old_name, new_name)
    }

    /// Whether the name of `name` is in the dictionary set of its category.
    pub fn is_name_valid(&self, name: &str) -> Result<bool, EditError> {
        match self.category(name)? {
            None => Ok(false),
            Some(category) => self
                .dictionary
                .contains(category, name)
                .ok_or(EditError::DictionaryUnavailable),
        }
    }

    /// Completion source for the row of `name`.
    pub fn name_candidates(&self, name: &str) -> Result<Vec<String>, EditError> {
        if !self.dictionary.is_loaded() {
            return Err(EditError::DictionaryUnavailable);
        }
        Ok(self
            .category(name)?
            .map(|category| self.dictionary.names(category))
            .unwrap_or_default())
    }

    /// Interfaces whose names are not valid for their direction.
    pub fn invalid_interfaces(&self) -> Result<Vec<String>, EditError> {
        if !self.dictionary.is_loaded() {
            return Err(EditError::DictionaryUnavailable);
        }

        let mut invalid = Vec::new();
        for name in self.list() {
            if !self.is_name_valid(&name)? {
                invalid.push(name);
            }
        }
        Ok(invalid)
    }
}
