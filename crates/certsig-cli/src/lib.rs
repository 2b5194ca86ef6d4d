//! # certsig-cli — Certificate Signature Command-Line Interface
//!
//! ## Subcommands
//!
//! - `verify`: verify a certificate document's signature
//! - `fingerprint`: print SHA-512 fingerprints of the signed payloads
//!
//! ## Crate Policy
//!
//! - Argument parsing and file I/O live here; verification logic lives in
//!   `certsig-verify`.
//! - Verdicts go to stdout, logs go to stderr.

pub mod config;
pub mod fingerprint;
pub mod source;
pub mod verify;
