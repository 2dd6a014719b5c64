//! # Module Editor Core
//!
//! Editing and validation model behind the module configuration editor.
//! Every operation is synchronous and either applies completely or is
//! rejected without touching the document; callers re-query `list()` and the
//! getters after each call to refresh their view.
//!
//! ## Components
//!
//! - `ConfigStore`: owns the document and its dirty flag
//! - `DataDictionary`: known message and service names
//! - `CollectionEditor`: header paths, sources, libraries, library paths
//! - `ParameterEditor` / `InterfaceEditor`: the two keyed record lists
//! - `diagram::build`: box-and-arrow projection of the interfaces
//! - `EditorSession`: ties the above together for one open document

pub mod collection;
pub mod diagram;
pub mod dictionary;
pub mod interfaces;
pub mod parameters;
pub mod session;
pub mod store;

pub use collection::{
    CollectionAccess, CollectionEditor, CollectionHint, CollectionItem, ItemKind, StoreCollection,
};
pub use diagram::{Connector, Diagram, DiagramNode, NodeRole};
pub use dictionary::{read_dictionary_dir, DataDictionary, DictionarySnapshot};
pub use interfaces::InterfaceEditor;
pub use parameters::ParameterEditor;
pub use session::{EditorSession, OpenReport, StringCollectionEditor};
pub use store::{ConfigStore, StringCollection};
