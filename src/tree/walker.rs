//! Filesystem walker yielding the file entries of a manifest

use crate::error::ManifestError;
use crate::tree::path;
use std::fs;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// A non-directory entry found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path on disk
    pub full_path: PathBuf,
    /// Forward-slash path relative to the root
    pub relative_path: String,
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into symlinked directories (default: false)
    pub follow_symlinks: bool,
    /// Path component names to skip entirely (e.g. ".git")
    pub ignore_patterns: Vec<String>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Lazily enumerate every non-directory entry under the root.
    ///
    /// Directories are descended into but never yielded. Everything else, including
    /// symlinks that are not followed and special files, is yielded for hashing.
    /// Entries within a directory are visited in file name order.
    pub fn files(&self) -> impl Iterator<Item = Result<FileEntry, ManifestError>> + '_ {
        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        walker
            .into_iter()
            .filter_entry(move |entry| !self.should_ignore(entry))
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(ManifestError::from(e))),
                };

                if entry.depth() == 0 {
                    // The root must be a directory; a file root has no relative name.
                    // A symlinked root is judged by its target, which walkdir descends.
                    if entry.file_type().is_dir() || root_links_to_dir(&entry) {
                        return None;
                    }
                    return Some(Err(ManifestError::io(
                        entry.path(),
                        std::io::Error::new(
                            std::io::ErrorKind::Other,
                            "manifest root is not a directory",
                        ),
                    )));
                }

                if entry.file_type().is_dir() {
                    return None;
                }

                Some(
                    path::relative_slash_path(&self.root, entry.path()).map(|relative_path| {
                        FileEntry {
                            full_path: entry.into_path(),
                            relative_path,
                        }
                    }),
                )
            })
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || self.config.ignore_patterns.is_empty() {
            return false;
        }

        let relative = match entry.path().strip_prefix(&self.root) {
            Ok(relative) => relative,
            Err(_) => return false,
        };

        relative.components().any(|component| match component {
            std::path::Component::Normal(name) => self
                .config
                .ignore_patterns
                .iter()
                .any(|pattern| name.to_string_lossy() == pattern.as_str()),
            _ => false,
        })
    }
}

fn root_links_to_dir(entry: &DirEntry) -> bool {
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
}
