//! # Module Editor Libraries
//!
//! Shared types for the module configuration editor. This crate holds the
//! persisted document schema, the editor settings and the error types used by
//! the editing core and the command-line front end.
//!
//! ## Main Components
//!
//! - `ModuleConfig`: the configuration document as stored on disk
//! - `EditorSettings` / `Vocabulary`: injectable enumerations and diagram geometry
//! - `AppError` / `EditError`: load/save failures and rejected edits

pub mod config;
pub mod error;
pub mod settings;

// Re-export main types for convenience
pub use config::{load_config, save_config, InterfaceConfig, ModuleConfig, ParameterConfig};
pub use error::{AppError, EditError};
pub use settings::{
    load_settings, DirectionCategory, DirectionDef, EditorSettings, Flow, LayoutSettings, Point,
    Reset, Vocabulary,
};

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
