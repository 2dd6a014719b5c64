//! Error types for the module editor.
//!
//! Two families live here:
//! - `AppError` for load/save failures of documents, dictionaries and settings
//! - `EditError` for rejected editing operations (nothing was mutated)

use thiserror::Error;

/// Load and persist failures.
///
/// Every variant is recoverable: the previous in-memory state is kept and the
/// caller may retry with a different path or corrected file.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error - invalid or unreadable module configuration
    ///
    /// # Example
    /// ```
    /// use modedit_libs::AppError;
    /// let error = AppError::ConfigError("duplicate parameter 'gain'".to_string());
    /// ```
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Data dictionary error - the dictionary directory could not be loaded
    #[error("Data dictionary error: {0}")]
    DictionaryError(String),

    /// Editor settings error - invalid vocabulary or layout settings
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error (diagram export)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A rejected editing operation.
///
/// Returned by the collection, parameter and interface editors. The document
/// is untouched whenever one of these comes back, so the caller only has to
/// restore whatever it displayed before the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("'{0}' already exists")]
    Duplicate(String),

    #[error("'{0}' not found")]
    NotFound(String),

    /// Carries the value the caller should re-display.
    #[error("unknown direction '{requested}', keeping '{current}'")]
    UnknownDirection { requested: String, current: String },

    /// The interface's stored direction is not in the vocabulary, so its name
    /// cannot be checked against the dictionary.
    #[error("interface '{name}' has unknown direction '{direction}'")]
    InvalidDirection { name: String, direction: String },

    #[error("unknown interface type '{requested}', keeping '{current}'")]
    UnknownIoType { requested: String, current: String },

    #[error("unknown data type '{requested}', keeping '{current}'")]
    UnknownDataType { requested: String, current: String },

    #[error("'{name}' is not a known {category} name")]
    NotInDictionary { name: String, category: String },

    #[error("data dictionary is not loaded")]
    DictionaryUnavailable,
}
