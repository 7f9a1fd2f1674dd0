//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjgenConfig {
    /// Where generated files go.
    pub output: OutputConfig,
    /// YAML formatting defaults.
    pub yaml: YamlConfig,
    /// File registry settings.
    pub registry: RegistryConfig,
}

/// Output location configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the project directory.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("generated"),
        }
    }
}

/// YAML dump configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlConfig {
    /// Spaces per nested mapping level.
    pub indent: usize,
    /// Spaces between a parent key and the `-` of its sequence items.
    pub list_indent: usize,
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            list_indent: 0,
        }
    }
}

/// Generated-file registry configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether to write the registry file at all.
    pub enabled: bool,
    /// Directory for the registry, relative to the output directory.
    pub directory: PathBuf,
    /// Registry file name.
    pub file_name: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(".projgen"),
            file_name: "file-registry.yml".to_string(),
        }
    }
}
