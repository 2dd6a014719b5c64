//! Collection editor
//!
//! Generic add/remove controller for ordered collections of unique entries
//! (header paths, sources, libraries, library paths). The editor talks to its
//! storage through [`CollectionAccess`] and is instantiated once per concrete
//! collection.

use crate::store::{ConfigStore, StringCollection};
use modedit_libs::EditError;
use tracing::debug;

/// What an entry of a collection refers to on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    File,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Directory => "directory",
            ItemKind::File => "file",
        }
    }
}

/// Presentation hint for whatever UI picks new entries.
///
/// Never consulted by the editor itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionHint {
    pub item_kind: ItemKind,
    /// File dialog filter, e.g. `C Sources (*.c)`
    pub filter: &'static str,
}

impl CollectionHint {
    pub fn for_collection(collection: StringCollection) -> Self {
        let (item_kind, filter) = match collection {
            StringCollection::HeaderPaths => (ItemKind::Directory, "All Files (*.*)"),
            StringCollection::CSources => (ItemKind::File, "C Sources (*.c)"),
            StringCollection::CxxSources => (ItemKind::File, "CPP Sources (*.cpp)"),
            StringCollection::Libraries => (ItemKind::File, "Libraries (*.a, *.so)"),
            StringCollection::LibraryPaths => (ItemKind::Directory, "All Files (*.*)"),
        };
        Self { item_kind, filter }
    }
}

/// An entry type the editor can validate.
pub trait CollectionItem: Clone + PartialEq {
    /// Empty candidates are always rejected.
    fn is_blank(&self) -> bool;

    /// Text used in errors and logs.
    fn label(&self) -> String;
}

impl CollectionItem for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }

    fn label(&self) -> String {
        self.clone()
    }
}

/// Storage capabilities needed by [`CollectionEditor`].
pub trait CollectionAccess {
    type Item: CollectionItem;

    /// Entries in insertion order
    fn list(&self) -> &[Self::Item];

    fn contains(&self, item: &Self::Item) -> bool {
        self.list().contains(item)
    }

    /// Append an entry; uniqueness is checked by the caller
    fn add(&mut self, item: Self::Item);

    /// Remove an entry, returning whether it was present
    fn remove(&mut self, item: &Self::Item) -> bool;
}

impl<T: CollectionItem> CollectionAccess for Vec<T> {
    type Item = T;

    fn list(&self) -> &[T] {
        self
    }

    fn add(&mut self, item: T) {
        self.push(item);
    }

    fn remove(&mut self, item: &T) -> bool {
        match self.iter().position(|i| i == item) {
            Some(index) => {
                Vec::remove(self, index);
                true
            }
            None => false,
        }
    }
}

/// One string collection of the document behind a [`ConfigStore`].
///
/// Every successful `add`/`remove` marks the document changed.
pub struct StoreCollection<'a> {
    store: &'a mut ConfigStore,
    collection: StringCollection,
}

impl<'a> StoreCollection<'a> {
    pub fn new(store: &'a mut ConfigStore, collection: StringCollection) -> Self {
        Self { store, collection }
    }
}

impl CollectionAccess for StoreCollection<'_> {
    type Item = String;

    fn list(&self) -> &[String] {
        self.store.collection(self.collection)
    }

    fn add(&mut self, item: String) {
        self.store.collection_mut(self.collection).push(item);
    }

    fn remove(&mut self, item: &String) -> bool {
        if !self.contains(item) {
            return false;
        }
        self.store.collection_mut(self.collection).retain(|i| i != item);
        true
    }
}

/// Ordered set management on top of a [`CollectionAccess`].
pub struct CollectionEditor<A> {
    access: A,
    hint: CollectionHint,
}

impl<A: CollectionAccess> CollectionEditor<A> {
    pub fn new(access: A, hint: CollectionHint) -> Self {
        Self { access, hint }
    }

    pub fn hint(&self) -> CollectionHint {
        self.hint
    }

    /// Current entries, in insertion order.
    pub fn list(&self) -> Vec<A::Item> {
        self.access.list().to_vec()
    }

    pub fn contains(&self, item: &A::Item) -> bool {
        self.access.contains(item)
    }

    /// Append `candidate` unless it is empty or already present.
    pub fn add(&mut self, candidate: A::Item) -> Result<(), EditError> {
        if candidate.is_blank() {
            return Err(EditError::EmptyName);
        }
        if self.access.contains(&candidate) {
            return Err(EditError::Duplicate(candidate.label()));
        }

        debug!("Adding {} '{}'", self.hint.item_kind.as_str(), candidate.label());
        self.access.add(candidate);
        Ok(())
    }

    /// Remove `item`; rejected when it is not present.
    pub fn remove(&mut self, item: &A::Item) -> Result<(), EditError> {
        if !self.access.remove(item) {
            return Err(EditError::NotFound(item.label()));
        }

        debug!("Removed {} '{}'", self.hint.item_kind.as_str(), item.label());
        Ok(())
    }
}
