//! Ed25519 verification of a canonical payload against the document's
//! encoded signature and key.

use serde_json::Value;

use certsig_core::{CanonicalBytes, CryptoError};
use certsig_crypto::{Ed25519PublicKey, Ed25519Signature};

use crate::error::VerifyError;

/// Decode `signature.value` and `publicKey.key`, then verify.
///
/// `Ok(false)` means the encodings were well-formed but the signature does
/// not verify. Decoding failures are errors.
pub fn verify_signature(
    payload: &CanonicalBytes,
    value: &Value,
    key: &Value,
) -> Result<bool, VerifyError> {
    let signature = decode_signature(value)?;
    let public_key = decode_public_key(key)?;
    certsig_crypto::verify_with_public_key(payload, &signature, &public_key).map_err(into_verify_error)
}

/// Decode a hex-encoded 64-byte `signature.value`.
pub fn decode_signature(value: &Value) -> Result<Ed25519Signature, VerifyError> {
    let text = value.as_str().ok_or_else(|| {
        VerifyError::MalformedSignature("signature.value must be a hex string".to_string())
    })?;
    Ed25519Signature::from_hex(text).map_err(into_verify_error)
}

/// Decode a hex-encoded 32-byte `publicKey.key`.
pub fn decode_public_key(key: &Value) -> Result<Ed25519PublicKey, VerifyError> {
    let text = key.as_str().ok_or_else(|| {
        VerifyError::MalformedPublicKey("publicKey.key must be a hex string".to_string())
    })?;
    Ed25519PublicKey::from_hex(text).map_err(into_verify_error)
}

fn into_verify_error(err: CryptoError) -> VerifyError {
    match err {
        CryptoError::MalformedSignature(msg) => VerifyError::MalformedSignature(msg),
        CryptoError::MalformedPublicKey(msg) => VerifyError::MalformedPublicKey(msg),
    }
}
