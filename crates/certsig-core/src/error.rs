//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by the certsig crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Canonicalization errors name the offending value or limit.
//! - Cryptographic errors cover decoding only. A signature that decodes but
//!   does not verify is a `false` result, not an error.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value contains a number with no finite IEEE-754 representation.
    #[error("non-finite number cannot be canonicalized: {0}")]
    NonFiniteNumber(String),

    /// The value nests deeper than the canonicalizer accepts.
    #[error("value nesting exceeds maximum depth of {max}")]
    DepthExceeded {
        /// The depth limit that was hit.
        max: usize,
    },

    /// Conversion to a JSON value failed (e.g. a map with non-string keys).
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature bytes could not be decoded (wrong type, bad hex, wrong length).
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Public key bytes could not be decoded or are not a valid curve point.
    #[error("malformed public key: {0}")]
    MalformedPublicKey(String),
}
