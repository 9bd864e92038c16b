//! Environment source: `LAUNCHER_*` variables
//!
//! `LAUNCHER_FILES_PATH` and `LAUNCHER_ADDR` map to the top-level `files_path` and
//! `addr` keys. Nested keys use a double underscore, e.g. `LAUNCHER_SCAN__ALGORITHM`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};

pub const ENV_PREFIX: &str = "LAUNCHER";

/// Add the environment source to the builder.
///
/// `vars` replaces the process environment when given (used by tests).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    let env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("scan.ignore")
        .source(vars);

    builder.add_source(env)
}
