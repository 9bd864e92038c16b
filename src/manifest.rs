//! Manifest data model
//!
//! A `Manifest` is an immutable snapshot of every file under the served root at one
//! point in time. Its JSON form is the wire format of `GET /manifest`:
//!
//! ```json
//! { "files": [ { "path": "dir/a.bin", "hash": "9f…", "size": 1024 } ] }
//! ```

use serde::{Deserialize, Serialize};

/// One file's entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedFile {
    #[serde(rename = "path")]
    relative_path: String,
    #[serde(rename = "hash")]
    digest: String,
    size: u64,
}

impl HashedFile {
    pub fn new(relative_path: String, digest: String, size: u64) -> Self {
        Self {
            relative_path,
            digest,
            size,
        }
    }

    /// Forward-slash path relative to the scan root.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Lowercase hex digest of the file content.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Immutable set of hashed files, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    files: Vec<HashedFile>,
}

impl Manifest {
    pub fn new(files: Vec<HashedFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[HashedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up an entry by its relative path.
    pub fn get(&self, relative_path: &str) -> Option<&HashedFile> {
        self.files
            .iter()
            .find(|f| f.relative_path == relative_path)
    }

    /// Sum of all file sizes in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl FromIterator<HashedFile> for Manifest {
    fn from_iter<I: IntoIterator<Item = HashedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
