//! Filesystem scanning
//!
//! Walks the served root, hashes every file and assembles the results into a
//! manifest.

pub mod builder;
pub mod hasher;
pub mod path;
pub mod walker;

pub use builder::{build_manifest, ManifestBuilder, ScanOptions};
pub use hasher::{DigestAlgorithm, FileHasher, CHUNK_SIZE};
pub use walker::{FileEntry, Walker, WalkerConfig};
