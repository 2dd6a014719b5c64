//! Editor settings.
//!
//! The closed enumerations used by the editors (interface directions,
//! interface kinds, parameter data types) are product specific, so they are
//! read from an optional settings file instead of being baked into the code.
//! The same file carries the diagram geometry and the data dictionary location.

use crate::config::ModuleConfig;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root structure of the editor settings file.
///
/// # Example YAML
///
/// ```yaml
/// dictionary_dir: "../amm_data"
/// vocabulary:
///   directions:
///     - name: "input"
///       category: "message"
///       flow: "inbound"
///     - name: "service_provided"
///       category: "service"
///       flow: "outbound"
///   io_types: ["periodic", "on_change"]
///   data_types: ["double", "string"]
/// layout:
///   hub: { x: 250.0, y: 250.0 }
///   lane_offset: 200.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Data dictionary directory; derived from the opened file when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_dir: Option<PathBuf>,

    #[serde(default)]
    pub vocabulary: Vocabulary,

    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Which dictionary set an interface name is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionCategory {
    Message,
    Service,
}

impl DirectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionCategory::Message => "message",
            DirectionCategory::Service => "service",
        }
    }
}

/// Data flow relative to the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Data enters the module
    Inbound,
    /// Data leaves the module
    Outbound,
}

/// One entry of the direction enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionDef {
    pub name: String,
    pub category: DirectionCategory,
    pub flow: Flow,
}

impl DirectionDef {
    pub fn new(name: impl Into<String>, category: DirectionCategory, flow: Flow) -> Self {
        Self {
            name: name.into(),
            category,
            flow,
        }
    }
}

/// The closed enumerations offered by the editors.
///
/// The first entry of each list is the default for new records and the
/// replacement for unknown values found in a loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub directions: Vec<DirectionDef>,
    pub io_types: Vec<String>,
    pub data_types: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        use DirectionCategory::{Message, Service};
        use Flow::{Inbound, Outbound};

        Self {
            directions: vec![
                DirectionDef::new("input", Message, Inbound),
                DirectionDef::new("output", Message, Outbound),
                DirectionDef::new("service_provided", Service, Outbound),
                DirectionDef::new("service_required", Service, Inbound),
            ],
            io_types: to_strings(&["periodic", "aperiodic", "on_change"]),
            data_types: to_strings(&[
                "bool", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
                "float", "double", "string",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A value from a loaded file that was not in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    /// Parameter or interface name
    pub owner: String,
    /// `direction`, `type` or `data type`
    pub field: &'static str,
    pub from: String,
    pub to: String,
}

impl Vocabulary {
    /// Look up a direction by name.
    pub fn direction(&self, name: &str) -> Option<&DirectionDef> {
        self.directions.iter().find(|d| d.name == name)
    }

    pub fn has_io_type(&self, name: &str) -> bool {
        self.io_types.iter().any(|t| t == name)
    }

    pub fn has_data_type(&self, name: &str) -> bool {
        self.data_types.iter().any(|t| t == name)
    }

    pub fn default_direction(&self) -> &str {
        self.directions.first().map(|d| d.name.as_str()).unwrap_or_default()
    }

    pub fn default_io_type(&self) -> &str {
        self.io_types.first().map(String::as_str).unwrap_or_default()
    }

    pub fn default_data_type(&self) -> &str {
        self.data_types.first().map(String::as_str).unwrap_or_default()
    }

    /// Names of all directions, in order.
    pub fn direction_names(&self) -> Vec<String> {
        self.directions.iter().map(|d| d.name.clone()).collect()
    }

    /// Ensure every list is usable.
    ///
    /// Directions need at least two entries with at least one message and one
    /// service direction; names must be unique and non-empty.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.directions.len() < 2 {
            return Err(AppError::SettingsError(
                "at least two directions are required".to_string(),
            ));
        }

        for category in [DirectionCategory::Message, DirectionCategory::Service] {
            if !self.directions.iter().any(|d| d.category == category) {
                return Err(AppError::SettingsError(format!(
                    "no direction with category '{}'",
                    category.as_str()
                )));
            }
        }

        let lists = [
            ("directions", self.direction_names()),
            ("io_types", self.io_types.clone()),
            ("data_types", self.data_types.clone()),
        ];

        for (field, values) in lists {
            if values.is_empty() {
                return Err(AppError::SettingsError(format!("{} cannot be empty", field)));
            }
            for (i, value) in values.iter().enumerate() {
                if value.is_empty() {
                    return Err(AppError::SettingsError(format!(
                        "{} contains an empty entry",
                        field
                    )));
                }
                if values[..i].contains(value) {
                    return Err(AppError::SettingsError(format!(
                        "{} contains '{}' twice",
                        field, value
                    )));
                }
            }
        }

        Ok(())
    }

    /// Replace enumeration values that are not in the vocabulary with defaults.
    ///
    /// Returns one [`Reset`] per replaced value; an empty list means the
    /// document was left untouched.
    pub fn normalize(&self, config: &mut ModuleConfig) -> Vec<Reset> {
        let mut resets = Vec::new();

        for parameter in &mut config.parameters {
            if !self.has_data_type(&parameter.data_type) {
                let to = self.default_data_type().to_string();
                resets.push(Reset {
                    owner: parameter.name.clone(),
                    field: "data type",
                    from: std::mem::replace(&mut parameter.data_type, to.clone()),
                    to,
                });
            }
        }

        for interface in &mut config.interfaces {
            if self.direction(&interface.direction).is_none() {
                let to = self.default_direction().to_string();
                resets.push(Reset {
                    owner: interface.name.clone(),
                    field: "direction",
                    from: std::mem::replace(&mut interface.direction, to.clone()),
                    to,
                });
            }
            if !self.has_io_type(&interface.io_type) {
                let to = self.default_io_type().to_string();
                resets.push(Reset {
                    owner: interface.name.clone(),
                    field: "type",
                    from: std::mem::replace(&mut interface.io_type, to.clone()),
                    to,
                });
            }
        }

        resets
    }
}

/// A point in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the generated interface diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Position of the module (hub) node
    pub hub: Point,

    /// Horizontal distance between the hub and the input/output lanes
    pub lane_offset: f64,

    /// Vertical distance between the hub and the service lane
    pub service_offset: f64,

    /// Distance between neighbouring nodes within one lane
    pub node_spacing: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            hub: Point::new(250.0, 250.0),
            lane_offset: 200.0,
            service_offset: 150.0,
            node_spacing: 60.0,
        }
    }
}

/// Load and validate editor settings from a YAML file.
pub fn load_settings<P: AsRef<Path>>(settings_path: P) -> Result<EditorSettings, AppError> {
    let path = settings_path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::SettingsError(format!("Failed to read settings file at {:?}: {}", path, e))
    })?;

    let settings: EditorSettings = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::SettingsError(format!("Failed to parse settings YAML at {:?}: {}", path, e))
    })?;

    settings.vocabulary.validate()?;

    Ok(settings)
}
