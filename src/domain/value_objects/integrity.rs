//! Integrity Hash Value Object
//!
//! Subresource-integrity style fingerprints (`sha256-<base64>`), used both to
//! compare release trees and as the `integrity` attribute in Bazel manifests.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{BcrError, BcrResult};

const READ_CHUNK: usize = 64 * 1024;

/// Digest algorithm tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegrityAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl IntegrityAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrityAlgorithm::Sha256 => "sha256",
            IntegrityAlgorithm::Sha384 => "sha384",
            IntegrityAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            IntegrityAlgorithm::Sha256 => 32,
            IntegrityAlgorithm::Sha384 => 48,
            IntegrityAlgorithm::Sha512 => 64,
        }
    }
}

impl FromStr for IntegrityAlgorithm {
    type Err = BcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(IntegrityAlgorithm::Sha256),
            "sha384" => Ok(IntegrityAlgorithm::Sha384),
            "sha512" => Ok(IntegrityAlgorithm::Sha512),
            other => Err(BcrError::InvalidIntegrity {
                value: other.to_string(),
                reason: "unsupported algorithm".to_string(),
            }),
        }
    }
}

/// Algorithm-tagged, base64-encoded digest of a byte stream
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrityHash(String);

impl IntegrityHash {
    /// Digest everything readable from `reader`
    ///
    /// Read errors are returned to the caller, never swallowed.
    pub fn from_reader<R: Read>(algorithm: IntegrityAlgorithm, mut reader: R) -> io::Result<Self> {
        let digest = match algorithm {
            IntegrityAlgorithm::Sha256 => digest_stream::<Sha256, _>(&mut reader)?,
            IntegrityAlgorithm::Sha384 => digest_stream::<Sha384, _>(&mut reader)?,
            IntegrityAlgorithm::Sha512 => digest_stream::<Sha512, _>(&mut reader)?,
        };
        Ok(Self::from_digest(algorithm, &digest))
    }

    pub fn from_bytes(algorithm: IntegrityAlgorithm, bytes: &[u8]) -> Self {
        let digest = match algorithm {
            IntegrityAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
            IntegrityAlgorithm::Sha384 => Sha384::digest(bytes).to_vec(),
            IntegrityAlgorithm::Sha512 => Sha512::digest(bytes).to_vec(),
        };
        Self::from_digest(algorithm, &digest)
    }

    /// SHA-256 fingerprint of a file's bytes
    pub fn of_file(path: &Path) -> io::Result<Self> {
        Self::of_file_with(IntegrityAlgorithm::Sha256, path)
    }

    pub fn of_file_with(algorithm: IntegrityAlgorithm, path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(algorithm, file)
    }

    /// Validate a textual fingerprint such as `sha256-...`
    pub fn parse(value: &str) -> BcrResult<Self> {
        let invalid = |reason: &str| BcrError::InvalidIntegrity {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (algo, encoded) = value
            .split_once('-')
            .ok_or_else(|| invalid("expected '<algorithm>-<base64 digest>'"))?;
        let algorithm: IntegrityAlgorithm = algo.parse().map_err(|_| invalid("unsupported algorithm"))?;
        let digest = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| invalid("digest is not valid base64"))?;
        if digest.len() != algorithm.digest_len() {
            return Err(invalid("digest has the wrong length"));
        }

        Ok(Self(value.to_string()))
    }

    pub fn algorithm(&self) -> IntegrityAlgorithm {
        self.0
            .split_once('-')
            .and_then(|(algo, _)| algo.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(algorithm: IntegrityAlgorithm, digest: &[u8]) -> Self {
        Self(format!(
            "{}-{}",
            algorithm.name(),
            general_purpose::STANDARD.encode(digest)
        ))
    }
}

fn digest_stream<D: Digest, R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

impl fmt::Display for IntegrityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IntegrityHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
