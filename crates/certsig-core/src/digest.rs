//! # Content Digest — Certificate Fingerprints
//!
//! Defines `ContentDigest` and `DigestAlgorithm`. A certificate's fingerprint
//! is the SHA-512 digest of the canonical form of its payload, rendered as
//! lowercase hex.
//!
//! ## Security Invariant
//!
//! `ContentDigest` can only be computed from `CanonicalBytes`. Two documents
//! that differ only in key order or whitespace therefore share a fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::canonical::CanonicalBytes;

/// The hash algorithm used to produce a content digest.
///
/// `sha512` is the only algorithm in the supported signature suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-512 (FIPS 180-4).
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string as it appears in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha512 => "sha512",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl ContentDigest {
    /// The hash algorithm that produced this digest.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-512 content digest from canonical bytes.
pub fn sha512_digest(data: &CanonicalBytes) -> ContentDigest {
    ContentDigest {
        algorithm: DigestAlgorithm::Sha512,
        bytes: Sha512::digest(data.as_bytes()).to_vec(),
    }
}

/// Compute a SHA-512 hex string from canonical bytes.
pub fn sha512_hex(data: &CanonicalBytes) -> String {
    sha512_digest(data).to_hex()
}
