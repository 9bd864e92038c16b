//! Manifest builder: walk the root and hash every file

use crate::error::ManifestError;
use crate::manifest::Manifest;
use crate::tree::hasher::{DigestAlgorithm, FileHasher};
use crate::tree::walker::{Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};

/// Everything that determines how a root is scanned.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub algorithm: DigestAlgorithm,
    pub walker: WalkerConfig,
}

impl ScanOptions {
    /// Default scan of `root`: BLAKE3, symlinks not followed, nothing ignored.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            algorithm: DigestAlgorithm::default(),
            walker: WalkerConfig::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = config;
        self
    }
}

/// Builds complete manifests from the filesystem
pub struct ManifestBuilder {
    options: ScanOptions,
}

impl ManifestBuilder {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    /// Walk the root and hash every file into a new manifest.
    ///
    /// The first I/O error from the walk or from hashing aborts the build; no
    /// partial manifest is ever returned.
    #[instrument(skip(self), fields(root = %self.options.root.display(), algorithm = %self.options.algorithm))]
    pub fn build(&self) -> Result<Manifest, ManifestError> {
        let start = Instant::now();
        info!("Starting manifest build");

        let walker = Walker::with_config(self.options.root.clone(), self.options.walker.clone());
        let mut hasher = FileHasher::new(self.options.algorithm);

        let manifest = walker
            .files()
            .map(|entry| {
                let entry = entry?;
                hasher.hash(&entry.full_path, &entry.relative_path)
            })
            .collect::<Result<Manifest, ManifestError>>()
            .inspect_err(|e| error!("Manifest build failed: {}", e))?;

        info!(
            files = manifest.len(),
            total_bytes = manifest.total_size(),
            duration_ms = start.elapsed().as_millis(),
            "Hashed directory"
        );

        Ok(manifest)
    }
}

/// Build a manifest of `root` with default scan options.
pub fn build_manifest(root: &Path) -> Result<Manifest, ManifestError> {
    ManifestBuilder::new(ScanOptions::new(root)).build()
}
