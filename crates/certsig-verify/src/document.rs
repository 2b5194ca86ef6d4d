//! # Certificate Document Model
//!
//! The parsed shape of a self-describing certificate document:
//!
//! ```json
//! {
//!   "certificate": { "publicKey": { "parameters": { "scheme": "Ed25519" }, "key": "<hex>" }, ... },
//!   "signature": {
//!     "signer": "self" | { "certificate": { "publicKey": { ... } }, ... },
//!     "algorithm": { "hash": "sha512", "encryption": "EdDSA" },
//!     "value": "<hex>"
//!   }
//! }
//! ```
//!
//! Only the members the pipeline depends on are typed. The payload and the
//! opaque `signer`, `value`, and `key` members stay as `serde_json::Value`
//! so each later gate can report its own failure instead of collapsing
//! everything into one deserialization error.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::VerifyError;

/// A parsed certificate document.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateDocument {
    /// The signed payload. Its canonical form is what the signature covers.
    pub certificate: Map<String, Value>,

    /// Detached signature over `certificate`.
    pub signature: SignatureMetadata,
}

/// The `signature` member of a document.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureMetadata {
    /// `"self"` or an embedded delegate document. Interpreted by
    /// [`Signer::from_value`](crate::signer::Signer::from_value).
    pub signer: Value,

    /// Declared suite. Absent members are reported by the algorithm gate.
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,

    /// Hex-encoded signature bytes.
    pub value: Value,
}

/// The declared `{hash, encryption}` pair.
///
/// Members are kept untyped: a missing or non-string identifier is an
/// unsupported suite, not a malformed document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SignatureAlgorithm {
    #[serde(default)]
    pub hash: Option<Value>,
    #[serde(default)]
    pub encryption: Option<Value>,
}

/// A `publicKey` descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicKeyDescriptor {
    #[serde(default)]
    pub parameters: KeyParameters,

    /// Opaque key material. For Ed25519 this is the hex-encoded 32-byte key.
    pub key: Value,
}

/// `publicKey.parameters`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyParameters {
    #[serde(default)]
    pub scheme: Option<Value>,
}

impl CertificateDocument {
    /// Parse and shape-check a document from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self, VerifyError> {
        Self::deserialize(value).map_err(|e| VerifyError::MalformedDocument(e.to_string()))
    }

    /// Parse and shape-check a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, VerifyError> {
        serde_json::from_str(text).map_err(|e| VerifyError::MalformedDocument(e.to_string()))
    }

    /// The payload as a JSON value, for canonicalization.
    pub fn certificate_value(&self) -> Value {
        Value::Object(self.certificate.clone())
    }
}

impl PublicKeyDescriptor {
    /// Extract `certificate.publicKey` from a payload.
    ///
    /// `origin` names the payload in error messages (`certificate` or
    /// `signature.signer.certificate`).
    pub(crate) fn from_certificate(
        certificate: &Map<String, Value>,
        origin: &str,
    ) -> Result<Self, VerifyError> {
        let raw = certificate.get("publicKey").ok_or_else(|| {
            VerifyError::MalformedSigner(format!("{origin}.publicKey is missing"))
        })?;
        Self::deserialize(raw)
            .map_err(|e| VerifyError::MalformedSigner(format!("{origin}.publicKey: {e}")))
    }

    /// The declared key scheme, if it is a string.
    pub fn scheme(&self) -> Option<&str> {
        self.parameters.scheme.as_ref().and_then(Value::as_str)
    }
}
