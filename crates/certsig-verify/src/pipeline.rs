//! # Verification Pipeline
//!
//! Runs a document through the gates in a fixed order and stops at the
//! first failure:
//!
//! 1. document shape
//! 2. signer resolution
//! 3. algorithm suite (against the resolved key's scheme)
//! 4. canonicalization of `certificate`
//! 5. Ed25519 verification
//!
//! Nothing cryptographic happens before gates 1-3 pass. The pipeline is a
//! pure function of its input and holds no state between calls.

use serde_json::Value;

use certsig_core::{sha512_digest, CanonicalBytes, ContentDigest};

use crate::algorithm;
use crate::document::CertificateDocument;
use crate::error::VerifyError;
use crate::signer::{Signer, SignerKind};
use crate::verifier;

/// Result of verifying one document.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// The signature verifies under the resolved key.
    Valid(VerifiedCertificate),
    /// Every gate passed but the signature does not verify.
    Invalid,
    /// A gate failed before a cryptographic verdict was reached.
    Rejected(VerifyError),
}

/// What is known about a document whose signature verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCertificate {
    pub signer: SignerKind,
    /// SHA-512 of the canonical `certificate` payload.
    pub fingerprint: ContentDigest,
}

impl VerificationOutcome {
    /// Process exit code: 0 valid, 1 invalid, 2 rejected.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Valid(_) => 0,
            Self::Invalid => 1,
            Self::Rejected(_) => 2,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<&VerifyError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Verify a parsed JSON document.
pub fn verify(document: &Value) -> VerificationOutcome {
    outcome(CertificateDocument::from_value(document))
}

/// Verify a document given as JSON text.
pub fn verify_str(text: &str) -> VerificationOutcome {
    outcome(CertificateDocument::from_json_str(text))
}

/// Verify a document given as raw JSON bytes.
pub fn verify_slice(bytes: &[u8]) -> VerificationOutcome {
    outcome(
        serde_json::from_slice::<Value>(bytes)
            .map_err(|e| VerifyError::MalformedDocument(e.to_string()))
            .and_then(|value| CertificateDocument::from_value(&value)),
    )
}

/// Verify an already shape-checked document.
pub fn verify_document(document: &CertificateDocument) -> VerificationOutcome {
    let outcome = match run_gates(document) {
        Ok(report) => VerificationOutcome::Valid(report),
        Err(None) => VerificationOutcome::Invalid,
        Err(Some(err)) => VerificationOutcome::Rejected(err),
    };
    match &outcome {
        VerificationOutcome::Valid(report) => {
            tracing::debug!(signer = %report.signer, fingerprint = %report.fingerprint, "signature valid");
        }
        VerificationOutcome::Invalid => tracing::warn!("signature does not verify"),
        VerificationOutcome::Rejected(err) => {
            tracing::warn!(reason = err.code(), error = %err, "document rejected");
        }
    }
    outcome
}

fn outcome(parsed: Result<CertificateDocument, VerifyError>) -> VerificationOutcome {
    match parsed {
        Ok(document) => verify_document(&document),
        Err(err) => {
            tracing::warn!(reason = err.code(), error = %err, "document rejected");
            VerificationOutcome::Rejected(err)
        }
    }
}

/// `Err(None)` is an invalid signature; `Err(Some(_))` a rejection.
fn run_gates(document: &CertificateDocument) -> Result<VerifiedCertificate, Option<VerifyError>> {
    let signer = Signer::from_value(&document.signature.signer)?;
    let public_key = signer.public_key(document)?;
    tracing::debug!(signer = %signer.kind(), "signer resolved");

    algorithm::validate(&document.signature.algorithm, &public_key)?;
    tracing::debug!("algorithm suite accepted");

    let payload = CanonicalBytes::new(&document.certificate_value()).map_err(VerifyError::from)?;
    tracing::debug!(bytes = payload.len(), "payload canonicalized");

    if verifier::verify_signature(&payload, &document.signature.value, &public_key.key)? {
        Ok(VerifiedCertificate {
            signer: signer.kind(),
            fingerprint: sha512_digest(&payload),
        })
    } else {
        Err(None)
    }
}
