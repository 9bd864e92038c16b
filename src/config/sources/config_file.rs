//! Config file source: `--config <path>`, or `launcher-files.toml` in the working directory

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "launcher-files.toml";

/// Add the config file source to the builder.
///
/// An explicitly named file must exist. The default file is optional.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    explicit: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match explicit {
        Some(path) => Ok(builder.add_source(File::from(path).required(true))),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                debug!(config_path = %default_path.display(), "Using config file from working directory");
                Ok(builder.add_source(File::from(default_path).required(false)))
            } else {
                Ok(builder)
            }
        }
    }
}
