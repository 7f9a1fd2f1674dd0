//! Configuration file loading and parsing.

use crate::types::ProjgenConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding projgen's own files inside a project.
pub const CONFIG_DIR_NAME: &str = ".projgen";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error("invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the project's config file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    /// Load configuration from `.projgen/config.yaml`, or defaults if absent.
    pub fn load(&self) -> Result<ProjgenConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(ProjgenConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(&self, path: &Path) -> Result<ProjgenConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: ProjgenConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &ProjgenConfig) -> Result<(), ConfigError> {
        if config.yaml.indent == 0 {
            return Err(ConfigError::ValidationError {
                message: "yaml.indent must be greater than 0".to_string(),
            });
        }

        if config.registry.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "registry.file_name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to `.projgen/config.yaml`.
    pub fn save(&self, config: &ProjgenConfig) -> Result<(), ConfigError> {
        let config_dir = self.base_path.join(CONFIG_DIR_NAME);
        std::fs::create_dir_all(&config_dir)?;

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(self.config_path(), yaml)?;
        Ok(())
    }
}
