//! Config loader: assembles defaults, file and environment into a `ServerConfig`.

use super::merge;
use super::sources::{config_file, environment};
use super::ServerConfig;
use crate::error::ConfigError;
use config::Map;
use std::path::Path;

/// Loads `ServerConfig` from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, config file and the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<ServerConfig, ConfigError> {
        Self::load_with_env(config_file, None)
    }

    /// Same as [`ConfigLoader::load`], reading environment variables from `vars`
    /// instead of the process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        vars: Option<Map<String, String>>,
    ) -> Result<ServerConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = config_file::add_to_builder(builder, config_file)?;
        let builder = environment::add_to_builder(builder, vars);

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
