//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use projgen_common_config::{ConfigError, EnvError};
use thiserror::Error;

/// CLI error type with context for the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    /// Building or synthesizing the project failed.
    #[error("{message}")]
    Generation {
        message: String,
        #[source]
        source: projgen_common_core::Error,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Generation { .. } => "E003",
            Self::NotFound { .. } => "E005",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Generation { .. } => 4,
            Self::NotFound { .. } => 6,
            Self::User { .. } | Self::Other(_) => 1,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::User { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("See suggestions below")
            }
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Wrap a generation failure with what was being done
    pub fn generation(message: impl Into<String>, source: projgen_common_core::Error) -> Self {
        Self::Generation {
            message: format!("{}: {source}", message.into()),
            source,
        }
    }

    /// Render the error, hint and suggestions for the terminal
    pub fn render(&self) -> String {
        let mut out = format!("error[{}]: {self}", self.code());
        if let Some(hint) = self.hint() {
            out.push_str(&format!("\n  hint: {hint}"));
        }
        for suggestion in self.suggestions() {
            out.push_str(&format!("\n    - {suggestion}"));
        }
        out
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context("JSON serialization failed"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .projgen/config.yaml in your project directory".to_string()),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: format!("Environment error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check your .env and .env.local files".to_string()),
        }
    }
}

impl From<projgen_common_core::Error> for CliError {
    fn from(err: projgen_common_core::Error) -> Self {
        match err {
            projgen_common_core::Error::FileSystem {
                message,
                path,
                source,
            } => Self::Io {
                message,
                source,
                path,
            },
            other => Self::Generation {
                message: other.to_string(),
                source: other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_exit_statuses() {
        let err: CliError = ConfigError::ValidationError {
            message: "yaml.indent must be at least 1".into(),
        }
        .into();
        assert_eq!(err.code(), "E001");
        assert_eq!(err.exit_status(), 2);
        assert_eq!(
            err.hint(),
            Some("Check .projgen/config.yaml in your project directory")
        );

        let err = CliError::not_found_with_suggestions("file", "x.txt", vec!["a.txt".into()]);
        assert_eq!(err.code(), "E005");
        assert_eq!(err.exit_status(), 6);
        assert_eq!(err.suggestions(), ["a.txt".to_string()]);
        assert_eq!(err.to_string(), "file not found: x.txt");
    }

    #[test]
    fn test_filesystem_errors_become_io() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CliError =
            projgen_common_core::Error::file_system("failed to write file: /x", "/x", source).into();

        match err {
            CliError::Io { message, path, .. } => {
                assert_eq!(message, "failed to write file: /x");
                assert_eq!(path, Some(PathBuf::from("/x")));
            }
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_path_errors_become_generation() {
        let err: CliError =
            projgen_common_core::Error::resolution("a.[3]", "[3]", "index 3 out of range").into();
        assert_eq!(err.code(), "E003");
        assert!(err.render().starts_with("error[E003]: cannot resolve 'a.[3]'"));
    }

    #[test]
    fn test_render_includes_suggestions() {
        let err = CliError::not_found_with_suggestions(
            "file",
            "nope.txt",
            vec!["a.txt".into(), "b.txt".into()],
        );
        assert_eq!(
            err.render(),
            "error[E005]: file not found: nope.txt\n  hint: See suggestions below\n    - a.txt\n    - b.txt"
        );
    }
}
