//! Launcher Files: a directory tree served over HTTP
//!
//! Computes a manifest (relative path, content hash, size) of every file under a
//! root, serves it as JSON, rebuilds it on demand, and streams individual files
//! by relative path.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod server;
pub mod store;
pub mod tree;

pub use manifest::{HashedFile, Manifest};
pub use store::SnapshotStore;
pub use tree::{DigestAlgorithm, ScanOptions};
