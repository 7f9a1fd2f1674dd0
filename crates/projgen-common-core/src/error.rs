//! Error types for projgen.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for projgen operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),

    /// A path step could not be followed in the current value tree.
    #[error("cannot resolve '{path}' at step '{step}': {reason}")]
    PathResolution {
        path: String,
        step: String,
        reason: String,
    },

    /// The path string itself is malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A value that the document model cannot represent.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// Two constructs under the same parent share an id.
    #[error("construct id '{id}' already used under '{parent}'")]
    DuplicateId { parent: String, id: String },

    /// A node handle that does not belong to this tree.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Filesystem failure, surfaced with the path it happened on.
    #[error("{message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error wrapped with additional context.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a new generic error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a path resolution error.
    pub fn resolution(
        path: impl Into<String>,
        step: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PathResolution {
            path: path.into(),
            step: step.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn file_system(message: impl Into<String>, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// The underlying I/O error kind, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::FileSystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Whether this error came from addressing a document location.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Self::PathResolution { .. } | Self::InvalidPath { .. })
    }
}

/// Result type alias using projgen's Error.
pub type Result<T> = std::result::Result<T, Error>;
