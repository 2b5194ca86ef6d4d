//! # certsig-core — Foundational Types for certsig
//!
//! This crate is the leaf of the certsig workspace. It defines the byte-level
//! primitives every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL signed, verified, and fingerprinted
//!    bytes flow through `CanonicalBytes::new()`. No raw `serde_json::to_vec()`
//!    on a signing path. Ever.
//!
//! 2. **Self-contained canonical form.** The RFC 8785 writer lives in this
//!    crate so its edge cases (number formatting, key ordering, escapes) are
//!    specified and tested here rather than inherited from a dependency.
//!
//! 3. **`sha512_digest()` accepts only `&CanonicalBytes`.** Fingerprints are
//!    stable across key order and whitespace by construction.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `certsig-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, MAX_DEPTH};
pub use digest::{sha512_digest, sha512_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CryptoError};
