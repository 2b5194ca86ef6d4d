//! # certsig-crypto — Cryptographic Primitives
//!
//! Ed25519 for certsig:
//!
//! - **Public keys and signatures** as fixed-size newtypes that travel as hex.
//! - **Key pairs** for producing signatures over `CanonicalBytes`.
//! - **Verification** that answers valid/invalid over `CanonicalBytes`.
//!
//! ## Crate Policy
//!
//! - Depends only on `certsig-core` internally.
//! - No mocking of cryptographic operations in tests. All tests use real
//!   `CanonicalBytes` and real Ed25519.

mod encoding;
pub mod ed25519;

pub use ed25519::{
    verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature,
    PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
