//! # Algorithm Suite Gate
//!
//! Exactly one suite is accepted: `sha512` / `EdDSA` / `Ed25519`. The gate
//! runs before any cryptographic work so unsupported inputs never reach the
//! verifier.

use serde_json::Value;

use crate::document::{PublicKeyDescriptor, SignatureAlgorithm};
use crate::error::VerifyError;

/// The only accepted `signature.algorithm.hash`.
pub const SUPPORTED_HASH: &str = "sha512";
/// The only accepted `signature.algorithm.encryption`.
pub const SUPPORTED_ENCRYPTION: &str = "EdDSA";
/// The only accepted `publicKey.parameters.scheme`.
pub const SUPPORTED_SCHEME: &str = "Ed25519";

/// A member of the suite declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmField {
    Hash,
    Encryption,
    Scheme,
}

impl AlgorithmField {
    /// JSON path of the member, relative to the document it was read from.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Hash => "signature.algorithm.hash",
            Self::Encryption => "signature.algorithm.encryption",
            Self::Scheme => "publicKey.parameters.scheme",
        }
    }
}

/// One member of the declared suite that does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmMismatch {
    pub field: AlgorithmField,
    pub expected: &'static str,
    /// The declared value as JSON text, or `None` when absent.
    pub found: Option<String>,
}

impl std::fmt::Display for AlgorithmMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.found {
            Some(found) => write!(
                f,
                "{} is {found}, expected \"{}\"",
                self.field.path(),
                self.expected
            ),
            None => write!(
                f,
                "{} is absent, expected \"{}\"",
                self.field.path(),
                self.expected
            ),
        }
    }
}

/// Check the declared suite against the resolved signer key.
///
/// All three members are checked and every mismatch is reported, not just
/// the first.
pub fn validate(
    algorithm: &SignatureAlgorithm,
    public_key: &PublicKeyDescriptor,
) -> Result<(), VerifyError> {
    let mismatches: Vec<AlgorithmMismatch> = [
        check(AlgorithmField::Hash, algorithm.hash.as_ref(), SUPPORTED_HASH),
        check(
            AlgorithmField::Encryption,
            algorithm.encryption.as_ref(),
            SUPPORTED_ENCRYPTION,
        ),
        check(
            AlgorithmField::Scheme,
            public_key.parameters.scheme.as_ref(),
            SUPPORTED_SCHEME,
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(VerifyError::UnsupportedAlgorithm(mismatches))
    }
}

fn check(
    field: AlgorithmField,
    declared: Option<&Value>,
    expected: &'static str,
) -> Option<AlgorithmMismatch> {
    match declared {
        Some(Value::String(s)) if s == expected => None,
        Some(other) => Some(AlgorithmMismatch {
            field,
            expected,
            found: Some(other.to_string()),
        }),
        None => Some(AlgorithmMismatch {
            field,
            expected,
            found: None,
        }),
    }
}
