//! CLI parse: clap types for the file server. No behavior; definitions only.

use crate::tree::DigestAlgorithm;
use clap::Parser;
use std::path::PathBuf;

/// Serve a directory tree with a content-addressed manifest
#[derive(Parser, Debug)]
#[command(name = "launcher-files")]
#[command(about = "Serve a directory tree over HTTP with a content-addressed manifest")]
pub struct Cli {
    /// Directory to serve (overrides LAUNCHER_FILES_PATH)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080 (overrides LAUNCHER_ADDR)
    #[arg(long)]
    pub addr: Option<String>,

    /// Configuration file path (default: ./launcher-files.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Digest algorithm for manifest hashes (blake3, sha256)
    #[arg(long)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Descend into symlinked directories while scanning
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Enable verbose logging (debug level)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}
