//! # certsig-verify — Certificate Document Verification
//!
//! Decides whether a self-describing certificate document carries a valid
//! Ed25519 signature over the canonical form of its `certificate` payload.
//!
//! ## Pipeline
//!
//! [`verify()`] runs, in order: shape check, signer resolution, algorithm
//! suite gate, canonicalization, signature verification. The first failing
//! gate produces [`VerificationOutcome::Rejected`] with a [`VerifyError`];
//! a well-formed document whose signature does not verify is
//! [`VerificationOutcome::Invalid`].
//!
//! ## Signers
//!
//! `signature.signer` is either `"self"` (the document's own
//! `certificate.publicKey`) or an embedded delegate document whose
//! `certificate.publicKey` is used instead. Resolution is one hop: the
//! delegate's own signature is not verified.
//!
//! ## Crate Policy
//!
//! - No I/O. Callers supply bytes, text, or parsed JSON.
//! - Stateless; every public type is `Send + Sync`.

pub mod algorithm;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod signer;
pub mod verifier;

pub use algorithm::{AlgorithmField, AlgorithmMismatch};
pub use document::{CertificateDocument, KeyParameters, PublicKeyDescriptor, SignatureAlgorithm, SignatureMetadata};
pub use error::VerifyError;
pub use pipeline::{verify, verify_document, verify_slice, verify_str, VerificationOutcome, VerifiedCertificate};
pub use signer::{resolve, DelegateDocument, Signer, SignerKind};
pub use verifier::verify_signature;
