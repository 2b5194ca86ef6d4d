//! # Rejection Reasons
//!
//! Every way a document can fail before a cryptographic verdict is reached.
//! An `Invalid` signature is an outcome, not an error, and is therefore not
//! represented here.

use certsig_core::CanonicalizationError;
use thiserror::Error;

use crate::algorithm::AlgorithmMismatch;

/// Why a document was rejected without a valid/invalid verdict.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Required fields absent or of the wrong shape at the top level.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// `signature.signer` is neither `"self"` nor a well-formed embedded document.
    #[error("malformed signer: {0}")]
    MalformedSigner(String),

    /// The declared hash/encryption/scheme suite is not the supported one.
    #[error("unsupported algorithm: {}", describe_mismatches(.0))]
    UnsupportedAlgorithm(Vec<AlgorithmMismatch>),

    /// The certificate payload cannot be canonicalized.
    #[error("encoding error: {0}")]
    Encoding(#[from] CanonicalizationError),

    /// `signature.value` fails structural decoding.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The resolved `publicKey.key` fails structural decoding.
    #[error("malformed public key: {0}")]
    MalformedPublicKey(String),
}

impl VerifyError {
    /// Stable machine-readable code for logs and reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedDocument(_) => "malformed_document",
            Self::MalformedSigner(_) => "malformed_signer",
            Self::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Self::Encoding(_) => "encoding_error",
            Self::MalformedSignature(_) => "malformed_signature",
            Self::MalformedPublicKey(_) => "malformed_public_key",
        }
    }
}

fn describe_mismatches(mismatches: &[AlgorithmMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
