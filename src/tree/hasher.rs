//! Streaming content hashing for manifest entries
//!
//! Files are fed through the digest in fixed-size chunks so memory use stays flat
//! regardless of file size.

use crate::error::ManifestError;
use crate::manifest::HashedFile;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::{error, trace};

/// Size of the read buffer used when streaming a file through the digest.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Digest used for manifest hashes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl DigestAlgorithm {
    /// Length of the hex-encoded digest.
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlgorithm::Blake3 => blake3::OUT_LEN * 2,
            DigestAlgorithm::Sha256 => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DigestAlgorithm::Blake3 => "blake3",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!(
                "unknown digest algorithm '{}' (expected 'blake3' or 'sha256')",
                other
            )),
        }
    }
}

/// Incremental digest state for one file.
enum Digester {
    Blake3(Box<blake3::Hasher>),
    Sha256(Sha256),
}

impl Digester {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Blake3 => Digester::Blake3(Box::new(blake3::Hasher::new())),
            DigestAlgorithm::Sha256 => Digester::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Digester::Blake3(hasher) => {
                hasher.update(chunk);
            }
            Digester::Sha256(hasher) => hasher.update(chunk),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Digester::Blake3(hasher) => hex::encode(hasher.finalize().as_bytes()),
            Digester::Sha256(hasher) => hex::encode(hasher.finalize()),
        }
    }
}

/// Hashes files one at a time, reusing a single chunk buffer.
pub struct FileHasher {
    algorithm: DigestAlgorithm,
    buf: Vec<u8>,
}

impl FileHasher {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            buf: vec![0u8; CHUNK_SIZE],
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Hash the file at `full_path`, recording it under `relative_path`.
    pub fn hash(&mut self, full_path: &Path, relative_path: &str) -> Result<HashedFile, ManifestError> {
        let mut file = File::open(full_path).map_err(|e| {
            error!(path = %full_path.display(), "Error opening file: {}", e);
            ManifestError::io(full_path, e)
        })?;

        let (digest, size) = self.hash_reader(&mut file).map_err(|e| {
            error!(path = %full_path.display(), "Error hashing file: {}", e);
            ManifestError::io(full_path, e)
        })?;

        trace!(path = relative_path, size, digest = %digest, "Hashed file");
        Ok(HashedFile::new(relative_path.to_string(), digest, size))
    }

    /// Stream `reader` to EOF through the digest. Returns the hex digest and byte count.
    pub fn hash_reader<R: Read>(&mut self, reader: &mut R) -> std::io::Result<(String, u64)> {
        let mut digester = Digester::new(self.algorithm);
        let mut size: u64 = 0;

        loop {
            let n = match reader.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digester.update(&self.buf[..n]);
            size += n as u64;
        }

        Ok((digester.finalize_hex(), size))
    }
}
