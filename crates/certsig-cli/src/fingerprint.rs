//! # Fingerprint Subcommand
//!
//! Prints the SHA-512 fingerprint of a document's canonical `certificate`
//! payload, and of the delegate's payload when the document names one.
//! The signature is not checked.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use certsig_core::{sha512_digest, CanonicalBytes, ContentDigest};
use certsig_verify::{CertificateDocument, Signer};

use crate::config::CliConfig;
use crate::source::read_document;

/// Arguments for `certsig fingerprint`.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Certificate document (`-` for stdin).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the fingerprint subcommand.
pub fn run_fingerprint(args: &FingerprintArgs, config: &CliConfig) -> Result<u8> {
    let bytes = read_document(&args.file, config.max_document_bytes)?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse JSON: {}", args.file.display()))?;
    let document = CertificateDocument::from_value(&value)?;

    for (label, digest) in fingerprints(&document)? {
        println!("{label}: {digest}");
    }
    Ok(0)
}

/// Labelled fingerprints: `certificate`, then `delegate` if present.
pub fn fingerprints(document: &CertificateDocument) -> Result<Vec<(&'static str, ContentDigest)>> {
    let mut out = vec![("certificate", payload_digest(&document.certificate)?)];
    match Signer::from_value(&document.signature.signer) {
        Ok(Signer::Delegate(delegate)) => {
            out.push(("delegate", payload_digest(&delegate.certificate)?));
        }
        Ok(Signer::SelfSigned) => {}
        Err(err) => tracing::warn!(error = %err, "signer not recognized, skipping delegate fingerprint"),
    }
    Ok(out)
}

fn payload_digest(payload: &Map<String, Value>) -> Result<ContentDigest> {
    let canonical = CanonicalBytes::new(&Value::Object(payload.clone()))
        .context("failed to canonicalize certificate payload")?;
    Ok(sha512_digest(&canonical))
}
