//! Error types for the manifest server.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while hashing files or building a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }

    /// Underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            ManifestError::Io { source, .. } => Some(source.kind()),
            ManifestError::InvalidPath(_) => None,
        }
    }
}

impl From<walkdir::Error> for ManifestError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        let source = match err.io_error() {
            Some(io) => std::io::Error::new(io.kind(), err.to_string()),
            // Loop detection carries no io::Error of its own
            None => std::io::Error::new(std::io::ErrorKind::Other, err.to_string()),
        };
        ManifestError::Io { path, source }
    }
}

/// Errors for a single `/files/...` request.
#[derive(Debug, Error)]
pub enum FileRequestError {
    #[error("File path required")]
    EmptyPath,

    #[error("Invalid path: {0}")]
    PathViolation(String),

    #[error("File not found: {0}")]
    NotFound(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Files root is not set (set LAUNCHER_FILES_PATH, `files_path` in the config file, or pass --root)")]
    MissingRoot,

    #[error("Invalid configuration value for `{key}`: {message}")]
    Invalid { key: String, message: String },

    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}
