//! Configuration System
//!
//! Layered configuration for the file server: built-in defaults, an optional TOML
//! file, `LAUNCHER_*` environment variables, and finally command-line flags.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::tree::{DigestAlgorithm, ScanOptions, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::config_file::DEFAULT_CONFIG_FILE;
pub use sources::environment::ENV_PREFIX;

/// Listen address used when none is configured.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory to serve (required)
    #[serde(default)]
    pub files_path: Option<PathBuf>,

    /// Socket address to listen on
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the served root is scanned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Path component names excluded from the manifest
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            files_path: None,
            addr: default_addr(),
            scan: ScanConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Check everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.files_path {
            None => return Err(ConfigError::MissingRoot),
            Some(path) if path.as_os_str().is_empty() => return Err(ConfigError::MissingRoot),
            Some(_) => {}
        }
        self.listen_addr()?;
        if self.scan.ignore.iter().any(|p| p.is_empty() || p.contains('/')) {
            return Err(ConfigError::Invalid {
                key: "scan.ignore".to_string(),
                message: "entries must be single path component names".to_string(),
            });
        }
        self.logging.validate()
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr.parse().map_err(|e| ConfigError::Invalid {
            key: "addr".to_string(),
            message: format!("'{}' is not a socket address: {}", self.addr, e),
        })
    }

    /// Scan options for the configured root, canonicalized to an absolute path.
    pub fn scan_options(&self) -> Result<ScanOptions, ConfigError> {
        let root = self.files_path.as_ref().ok_or(ConfigError::MissingRoot)?;
        let root = dunce::canonicalize(root).map_err(|e| ConfigError::Invalid {
            key: "files_path".to_string(),
            message: format!("cannot resolve {}: {}", root.display(), e),
        })?;

        Ok(ScanOptions::new(root)
            .with_algorithm(self.scan.algorithm)
            .with_walker_config(WalkerConfig {
                follow_symlinks: self.scan.follow_symlinks,
                ignore_patterns: self.scan.ignore.clone(),
            }))
    }
}
