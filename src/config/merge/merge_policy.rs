//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Sources added afterwards override these in order: config file, then environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("addr", crate::config::DEFAULT_ADDR)?
        .set_default("scan.algorithm", "blake3")?
        .set_default("scan.follow_symlinks", false)?
        .set_default("scan.ignore", Vec::<String>::new())
}
