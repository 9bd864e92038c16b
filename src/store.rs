//! Snapshot Store
//!
//! Holds the single authoritative manifest and mediates concurrent access to it.
//! Builds run entirely outside the snapshot lock; only the pointer swap that
//! publishes a finished manifest takes the exclusive lock.

use crate::error::ManifestError;
use crate::manifest::Manifest;
use crate::tree::builder::{ManifestBuilder, ScanOptions};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The currently published manifest and its generation number.
struct Published {
    manifest: Arc<Manifest>,
    generation: u64,
}

/// Owns the current manifest snapshot.
pub struct SnapshotStore {
    builder: ManifestBuilder,
    current: RwLock<Published>,
    /// Serializes recalculations; never taken by readers.
    build_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Build the initial manifest. The store cannot exist without one.
    pub fn new(options: ScanOptions) -> Result<Self, ManifestError> {
        let builder = ManifestBuilder::new(options);
        let manifest = builder.build()?;
        info!(files = manifest.len(), "Initial manifest built");

        Ok(Self {
            builder,
            current: RwLock::new(Published {
                manifest: Arc::new(manifest),
                generation: 1,
            }),
            build_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        self.builder.root()
    }

    /// The most recently published manifest.
    pub fn current_snapshot(&self) -> Arc<Manifest> {
        Arc::clone(&self.current.read().manifest)
    }

    /// Number of successful builds published so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Rebuild the manifest and publish it. Returns the new file count.
    ///
    /// On failure the previous snapshot stays in force. Concurrent calls queue on
    /// the build lock; readers keep seeing the previous snapshot meanwhile.
    #[instrument(skip(self), fields(root = %self.root().display()))]
    pub fn recalculate(&self) -> Result<usize, ManifestError> {
        let _build = self.build_lock.lock();

        let manifest = match self.builder.build() {
            Ok(manifest) => Arc::new(manifest),
            Err(e) => {
                warn!("Recalculation failed, keeping previous manifest: {}", e);
                return Err(e);
            }
        };
        let count = manifest.len();

        let generation = {
            let mut current = self.current.write();
            current.manifest = manifest;
            current.generation += 1;
            current.generation
        };

        info!(files = count, generation, "Recalculated manifest");
        Ok(count)
    }
}
