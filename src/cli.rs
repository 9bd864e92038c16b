//! CLI domain: argument parsing and how flags override loaded configuration.

mod parse;

pub use parse::Cli;

use crate::config::ServerConfig;

impl Cli {
    /// Apply command-line overrides on top of file and environment configuration.
    /// Precedence: explicit flags override `--verbose`, which overrides config.
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(ref root) = self.root {
            config.files_path = Some(root.clone());
        }
        if let Some(ref addr) = self.addr {
            config.addr = addr.clone();
        }
        if let Some(algorithm) = self.algorithm {
            config.scan.algorithm = algorithm;
        }
        if self.follow_symlinks {
            config.scan.follow_symlinks = true;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
    }
}
