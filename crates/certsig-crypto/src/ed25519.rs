//! # Ed25519
//!
//! Keys, signatures, and EdDSA verification over canonical payloads.
//!
//! Both signing and verification take `&CanonicalBytes`; there is no entry
//! point for arbitrary byte slices. Decoding problems (hex, length, curve
//! point) surface as `CryptoError` before any verification is attempted.
//! [`verify()`] itself is a plain yes/no.
//!
//! `Ed25519KeyPair` has no `Serialize` impl and redacts itself in `Debug`.

use certsig_core::{CanonicalBytes, CryptoError};
use ed25519_dalek::{Signer as _, SigningKey, Verifier as _, VerifyingKey};

use crate::encoding::hex_bytes;

pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

hex_bytes!(
    /// 32-byte Ed25519 public key, written as 64 hex digits.
    Ed25519PublicKey,
    PUBLIC_KEY_LENGTH,
    CryptoError::MalformedPublicKey
);

hex_bytes!(
    /// 64-byte Ed25519 signature, written as 128 hex digits.
    Ed25519Signature,
    SIGNATURE_LENGTH,
    CryptoError::MalformedSignature
);

impl Ed25519PublicKey {
    /// Decompress into a dalek key.
    ///
    /// Fails with `MalformedPublicKey` when the bytes do not encode a point
    /// on the curve.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_bytes(self.as_bytes())
            .map_err(|e| CryptoError::MalformedPublicKey(format!("not a curve point: {e}")))
    }
}

/// A signing key together with its public half.
pub struct Ed25519KeyPair {
    secret: SigningKey,
}

impl Ed25519KeyPair {
    /// Fresh key from the operating system RNG.
    pub fn generate() -> Self {
        Self {
            secret: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Deterministic key from a 32-byte seed (RFC 8032 private key).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            secret: SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::from_bytes(self.secret.verifying_key().to_bytes())
    }

    /// Sign a canonical payload.
    pub fn sign(&self, payload: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature::from_bytes(self.secret.sign(payload.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// `true` iff `signature` is a valid EdDSA signature over `payload` under
/// `key`.
///
/// Out-of-range scalars and non-decompressible `R` points simply yield
/// `false`.
pub fn verify(payload: &CanonicalBytes, signature: &Ed25519Signature, key: &VerifyingKey) -> bool {
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    key.verify(payload.as_bytes(), &signature).is_ok()
}

/// [`verify()`] with a hex-level public key; fails only if the key is not
/// a curve point.
pub fn verify_with_public_key(
    payload: &CanonicalBytes,
    signature: &Ed25519Signature,
    key: &Ed25519PublicKey,
) -> Result<bool, CryptoError> {
    Ok(verify(payload, signature, &key.to_verifying_key()?))
}
