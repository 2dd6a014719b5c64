//! Persisted module configuration.
//!
//! This module defines the structures stored in a module's configuration file
//! (`*.yaml`) together with the functions that read and write it.

use crate::error::AppError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Root structure of a module configuration file.
///
/// # Example YAML
///
/// ```yaml
/// description: "Pulse oximeter model"
/// header_paths:
///   - "include"
/// c_sources: []
/// cxx_sources:
///   - "src/pulse_ox.cpp"
/// libraries:
///   - "libphysiology.a"
/// library_paths:
///   - "lib"
/// parameters:
///   - name: "sample_rate"
///     description: "Sampling frequency"
///     type: "double"
///     units: "Hz"
///     default: "50"
///     adjustable: true
/// interfaces:
///   - name: "Heartbeat"
///     direction: "input"
///     type: "periodic"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Free text shown at the top of the editor
    #[serde(default)]
    pub description: String,

    /// Include directories
    #[serde(default)]
    pub header_paths: Vec<String>,

    /// C translation units
    #[serde(default)]
    pub c_sources: Vec<String>,

    /// C++ translation units
    #[serde(default)]
    pub cxx_sources: Vec<String>,

    /// External libraries to link
    #[serde(default)]
    pub libraries: Vec<String>,

    /// Directories searched for external libraries
    #[serde(default)]
    pub library_paths: Vec<String>,

    /// Tunable parameters, in display order
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,

    /// Message and service bindings, in display order
    #[serde(default)]
    pub interfaces: Vec<InterfaceConfig>,
}

/// A named, typed configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterConfig {
    /// Unique key within the module
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// One of the configured data types
    #[serde(rename = "type", default)]
    pub data_type: String,

    #[serde(default)]
    pub units: String,

    /// Default value, kept as text exactly as the user typed it
    #[serde(rename = "default", default)]
    pub default_value: String,

    /// Whether the value may be changed at runtime.
    ///
    /// Older files store this as the string `"true"` / `"false"`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub adjustable: bool,
}

/// Accept a YAML bool or its string spelling.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!(
                "invalid adjustable flag '{}', expected true or false",
                other
            ))),
        },
    }
}

impl ParameterConfig {
    /// Create a parameter with empty metadata.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }
}

/// A message or service binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Message or service name from the data dictionary
    pub name: String,

    /// One of the configured directions
    #[serde(default)]
    pub direction: String,

    /// One of the configured interface kinds
    #[serde(rename = "type", default)]
    pub io_type: String,
}

impl InterfaceConfig {
    pub fn new(
        name: impl Into<String>,
        direction: impl Into<String>,
        io_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
            io_type: io_type.into(),
        }
    }
}

impl ModuleConfig {
    /// Check the structural invariants of a document.
    ///
    /// Collection entries must be unique; parameter and interface names must be
    /// non-empty and unique. Enumeration values are not checked here, see
    /// [`crate::Vocabulary::normalize`].
    pub fn validate(&self) -> Result<(), AppError> {
        let collections = [
            ("header_paths", &self.header_paths),
            ("c_sources", &self.c_sources),
            ("cxx_sources", &self.cxx_sources),
            ("libraries", &self.libraries),
            ("library_paths", &self.library_paths),
        ];

        for (field, entries) in collections {
            check_unique(field, entries.iter().map(String::as_str))?;
        }

        check_names("parameters", self.parameters.iter().map(|p| p.name.as_str()))?;
        check_names("interfaces", self.interfaces.iter().map(|i| i.name.as_str()))?;

        Ok(())
    }
}

fn check_unique<'a>(field: &str, entries: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry) {
            return Err(AppError::ConfigError(format!(
                "duplicate entry '{}' in {}",
                entry, field
            )));
        }
    }
    Ok(())
}

fn check_names<'a>(field: &str, names: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let names: Vec<&str> = names.collect();
    if names.iter().any(|n| n.is_empty()) {
        return Err(AppError::ConfigError(format!(
            "{} contains an entry with an empty name",
            field
        )));
    }
    check_unique(field, names.into_iter())
}

/// Load and parse a module configuration from a YAML file.
///
/// # Returns
///
/// * `Ok(ModuleConfig)` - Successfully parsed and structurally valid document
/// * `Err(AppError)` - Failed to read the file, parse YAML or validate
///
/// # Example
///
/// ```rust,ignore
/// use modedit_libs::load_config;
///
/// let config = load_config("modules/pulse_ox/module_config.yaml")?;
/// println!("{} parameters", config.parameters.len());
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ModuleConfig, AppError> {
    let path = config_path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::ConfigError(format!("Failed to read config file at {:?}: {}", path, e))
    })?;

    let config: ModuleConfig = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::ConfigError(format!("Failed to parse config YAML at {:?}: {}", path, e))
    })?;

    config.validate()?;

    Ok(config)
}

/// Serialize a module configuration and write it to `config_path`.
pub fn save_config<P: AsRef<Path>>(config: &ModuleConfig, config_path: P) -> Result<(), AppError> {
    let path = config_path.as_ref();

    let yaml = serde_yaml::to_string(config)?;

    fs::write(path, yaml).map_err(|e| {
        AppError::ConfigError(format!("Failed to write config file at {:?}: {}", path, e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ModuleConfig {
        ModuleConfig {
            description: "Pulse oximeter".to_string(),
            header_paths: vec!["include".to_string()],
            cxx_sources: vec!["src/a.cpp".to_string(), "src/b.cpp".to_string()],
            parameters: vec![ParameterConfig {
                name: "gain".to_string(),
                description: "Amplifier gain".to_string(),
                data_type: "double".to_string(),
                units: "dB".to_string(),
                default_value: "1.5".to_string(),
                adjustable: true,
            }],
            interfaces: vec![InterfaceConfig::new("Heartbeat", "input", "periodic")],
            ..Default::default()
        }
    }

    #[test]
    fn test_parameter_field_names() {
        let yaml = serde_yaml::to_string(&sample()).unwrap();
        assert!(yaml.contains("type: double"));
        assert!(yaml.contains("default:"));
        assert!(yaml.contains("adjustable: true"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let config: ModuleConfig = serde_yaml::from_str("description: bare\n").unwrap();
        assert_eq!(config.description, "bare");
        assert!(config.header_paths.is_empty());
        assert!(config.interfaces.is_empty());
    }

    #[test]
    fn test_save_and_load_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("module.yaml");

        let config = sample();
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.cxx_sources[0], "src/a.cpp");
    }

    #[test]
    fn test_duplicate_collection_entry_rejected() {
        let mut config = sample();
        config.header_paths.push("include".to_string());
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_empty_parameter_name_rejected() {
        let mut config = sample();
        config.parameters.push(ParameterConfig::new("", "double"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_string_adjustable_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.yaml");
        fs::write(
            &path,
            "parameters:\n  - name: gain\n    adjustable: 'true'\n  - name: bias\n    adjustable: \"false\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.parameters[0].adjustable);
        assert!(!config.parameters[1].adjustable);

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("adjustable: true"));
        assert!(yaml.contains("adjustable: false"));
    }

    #[test]
    fn test_invalid_adjustable_text_rejected() {
        let result: Result<ParameterConfig, _> =
            serde_yaml::from_str("name: gain\nadjustable: maybe\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_config(temp_dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
