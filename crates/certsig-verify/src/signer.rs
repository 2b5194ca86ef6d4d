//! # Signer Resolution
//!
//! Decides which public key is authoritative for a document's signature:
//! the document's own `certificate.publicKey`, or the `publicKey` of a single
//! embedded delegate document.
//!
//! ## Scope
//!
//! Resolution depth is exactly one. The delegate contributes only its
//! `certificate.publicKey`; its own `signature` (including a nested `signer`)
//! is never read, so an unverified delegate key is trusted as-is.

use serde_json::{Map, Value};

use crate::document::{CertificateDocument, PublicKeyDescriptor};
use crate::error::VerifyError;

/// Marker value of `signature.signer` for self-signed documents.
pub const SELF_SIGNED_MARKER: &str = "self";

/// Who produced the signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Signer {
    /// The document's own key signed it.
    SelfSigned,
    /// An embedded delegate document's key signed it.
    Delegate(Box<DelegateDocument>),
}

/// The parts of an embedded delegate document the resolver uses.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegateDocument {
    /// The delegate's payload.
    pub certificate: Map<String, Value>,
    /// `certificate.publicKey` of the delegate.
    pub public_key: PublicKeyDescriptor,
}

/// Which kind of signer a verified document used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind {
    SelfSigned,
    Delegate,
}

impl std::fmt::Display for SignerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfSigned => f.write_str("self"),
            Self::Delegate => f.write_str("delegate"),
        }
    }
}

impl Signer {
    /// Interpret a `signature.signer` value.
    ///
    /// # Errors
    ///
    /// `VerifyError::MalformedSigner` when the value is a string other than
    /// `"self"`, is not an object, or is an object without
    /// `certificate.publicKey.key`.
    pub fn from_value(value: &Value) -> Result<Self, VerifyError> {
        match value {
            Value::String(s) if s == SELF_SIGNED_MARKER => Ok(Self::SelfSigned),
            Value::String(s) => Err(VerifyError::MalformedSigner(format!(
                "expected \"{SELF_SIGNED_MARKER}\" or an embedded certificate document, got string {s:?}"
            ))),
            Value::Object(delegate) => {
                let certificate = delegate
                    .get("certificate")
                    .and_then(Value::as_object)
                    .ok_or_else(|| {
                        VerifyError::MalformedSigner(
                            "signature.signer.certificate is missing or not an object".to_string(),
                        )
                    })?;
                let public_key = PublicKeyDescriptor::from_certificate(
                    certificate,
                    "signature.signer.certificate",
                )?;
                Ok(Self::Delegate(Box::new(DelegateDocument {
                    certificate: certificate.clone(),
                    public_key,
                })))
            }
            other => Err(VerifyError::MalformedSigner(format!(
                "expected \"{SELF_SIGNED_MARKER}\" or an embedded certificate document, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// The kind of this signer.
    pub fn kind(&self) -> SignerKind {
        match self {
            Self::SelfSigned => SignerKind::SelfSigned,
            Self::Delegate(_) => SignerKind::Delegate,
        }
    }

    /// The public key descriptor this signer vouches with.
    pub fn public_key(&self, document: &CertificateDocument) -> Result<PublicKeyDescriptor, VerifyError> {
        match self {
            Self::SelfSigned => {
                PublicKeyDescriptor::from_certificate(&document.certificate, "certificate")
            }
            Self::Delegate(delegate) => Ok(delegate.public_key.clone()),
        }
    }
}

/// Resolve the authoritative public key descriptor for `document`.
pub fn resolve(document: &CertificateDocument) -> Result<PublicKeyDescriptor, VerifyError> {
    Signer::from_value(&document.signature.signer)?.public_key(document)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(signer: Value) -> CertificateDocument {
        CertificateDocument::from_value(&json!({
            "certificate": {
                "publicKey": {"parameters": {"scheme": "Ed25519"}, "key": "aa"}
            },
            "signature": {
                "signer": signer,
                "algorithm": {"hash": "sha512", "encryption": "EdDSA"},
                "value": "00"
            }
        }))
        .unwrap()
    }

    fn delegate(key: &str) -> Value {
        json!({
            "certificate": {
                "publicKey": {"parameters": {"scheme": "Ed25519"}, "key": key}
            },
            "signature": {"signer": "self", "algorithm": {}, "value": "00"}
        })
    }

    #[test]
    fn self_signed_resolves_own_key() {
        let doc = document(json!("self"));
        assert_eq!(resolve(&doc).unwrap().key, json!("aa"));
    }

    #[test]
    fn delegate_resolves_delegate_key() {
        let doc = document(delegate("bb"));
        let signer = Signer::from_value(&doc.signature.signer).unwrap();
        assert_eq!(signer.kind(), SignerKind::Delegate);
        assert_eq!(signer.public_key(&doc).unwrap().key, json!("bb"));
    }

    #[test]
    fn nested_signer_of_delegate_is_not_followed() {
        let mut d = delegate("bb");
        d["signature"]["signer"] = delegate("cc");
        let doc = document(d);
        assert_eq!(resolve(&doc).unwrap().key, json!("bb"));
    }

    #[test]
    fn delegate_without_signature_still_resolves() {
        let doc = document(json!({
            "certificate": {"publicKey": {"parameters": {"scheme": "Ed25519"}, "key": "dd"}}
        }));
        assert_eq!(resolve(&doc).unwrap().key, json!("dd"));
    }

    #[test]
    fn arbitrary_string_is_malformed_signer() {
        let doc = document(json!("someone-else"));
        assert!(matches!(resolve(&doc), Err(VerifyError::MalformedSigner(_))));
    }

    #[test]
    fn non_object_signer_is_malformed_signer() {
        for signer in [json!(null), json!(7), json!(["self"]), json!(true)] {
            let doc = document(signer);
            assert!(matches!(resolve(&doc), Err(VerifyError::MalformedSigner(_))));
        }
    }

    #[test]
    fn delegate_missing_public_key_is_malformed_signer() {
        let doc = document(json!({"certificate": {"subject": "x"}}));
        match resolve(&doc) {
            Err(VerifyError::MalformedSigner(msg)) => assert!(msg.contains("publicKey")),
            other => panic!("expected MalformedSigner, got {other:?}"),
        }
    }

    #[test]
    fn delegate_missing_certificate_is_malformed_signer() {
        let doc = document(json!({"signature": {"signer": "self"}}));
        assert!(matches!(resolve(&doc), Err(VerifyError::MalformedSigner(_))));
    }

    #[test]
    fn self_signed_without_public_key_is_malformed_signer() {
        let doc = CertificateDocument::from_value(&json!({
            "certificate": {"subject": "no key"},
            "signature": {"signer": "self", "value": "00"}
        }))
        .unwrap();
        assert!(matches!(resolve(&doc), Err(VerifyError::MalformedSigner(_))));
    }
}
