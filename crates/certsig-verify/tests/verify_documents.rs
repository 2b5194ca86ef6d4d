//! # End-to-End Document Verification
//!
//! Builds real certificate documents signed with real Ed25519 keys and runs
//! them through the public pipeline. No cryptography is mocked.

use certsig_core::{sha512_digest, CanonicalBytes, MAX_DEPTH};
use certsig_crypto::Ed25519KeyPair;
use certsig_verify::{
    verify, verify_str, AlgorithmField, SignerKind, VerificationOutcome, VerifyError,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key_pair(seed: u8) -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed(&[seed; 32])
}

fn payload(kp: &Ed25519KeyPair, subject: &str) -> Value {
    json!({
        "subject": subject,
        "validityPeriod": {"notBefore": "2024-01-01T00:00:00Z", "notAfter": "2034-01-01T00:00:00Z"},
        "permissions": {"outbound": {"urls": ["https://example.org/"]}},
        "publicKey": {
            "parameters": {"scheme": "Ed25519"},
            "key": kp.public_key().to_hex()
        }
    })
}

fn sign_payload(signing: &Ed25519KeyPair, certificate: &Value, signer: Value) -> Value {
    let canonical = CanonicalBytes::new(certificate).expect("payload canonicalizes");
    json!({
        "certificate": certificate,
        "signature": {
            "signer": signer,
            "algorithm": {"hash": "sha512", "encryption": "EdDSA"},
            "value": signing.sign(&canonical).to_hex()
        }
    })
}

fn self_signed(kp: &Ed25519KeyPair, subject: &str) -> Value {
    sign_payload(kp, &payload(kp, subject), json!("self"))
}

/// A leaf signed by `root`, with `root`'s self-signed document as signer.
fn delegated(root: &Ed25519KeyPair, leaf: &Ed25519KeyPair) -> Value {
    let root_doc = self_signed(root, "root");
    sign_payload(root, &payload(leaf, "leaf"), root_doc)
}

fn rejection(outcome: VerificationOutcome) -> VerifyError {
    match outcome {
        VerificationOutcome::Rejected(err) => err,
        other => panic!("expected Rejected, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Self-signed documents
// ---------------------------------------------------------------------------

#[test]
fn self_signed_document_is_valid() {
    let kp = key_pair(1);
    let doc = self_signed(&kp, "node-1");
    match verify(&doc) {
        VerificationOutcome::Valid(report) => {
            assert_eq!(report.signer, SignerKind::SelfSigned);
            let canonical = CanonicalBytes::new(&doc["certificate"]).unwrap();
            assert_eq!(report.fingerprint, sha512_digest(&canonical));
        }
        other => panic!("expected Valid, got {other:?}"),
    }
}

#[test]
fn tampered_payload_is_invalid() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["certificate"]["subject"] = json!("node-2");
    assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
}

#[test]
fn added_payload_member_is_invalid() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["certificate"]["extra"] = json!(true);
    assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
}

#[test]
fn flipped_signature_bit_is_invalid() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    let mut sig = hex::decode(doc["signature"]["value"].as_str().unwrap()).unwrap();
    sig[0] ^= 0x01;
    doc["signature"]["value"] = json!(hex::encode(sig));
    assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
}

#[test]
fn key_order_and_whitespace_do_not_matter() {
    let kp = key_pair(1);
    let doc = self_signed(&kp, "node-1");
    let sig = doc["signature"]["value"].as_str().unwrap();
    let key = kp.public_key().to_hex();

    // Same document, members reordered and reformatted by hand.
    let text = format!(
        r#"{{
            "signature": {{ "value": "{sig}", "algorithm": {{ "encryption": "EdDSA", "hash": "sha512" }}, "signer": "self" }},
            "certificate": {{
                "publicKey": {{ "key": "{key}", "parameters": {{ "scheme": "Ed25519" }} }},
                "permissions": {{ "outbound": {{ "urls": [ "https://example.org/" ] }} }},
                "validityPeriod": {{ "notAfter": "2034-01-01T00:00:00Z", "notBefore": "2024-01-01T00:00:00Z" }},
                "subject": "node-1"
            }}
        }}"#
    );
    assert!(verify_str(&text).is_valid());
}

#[test]
fn uppercase_hex_encodings_are_accepted() {
    let kp = key_pair(1);
    let certificate = payload(&kp, "node-1");
    let mut doc = sign_payload(&kp, &certificate, json!("self"));
    let upper = doc["signature"]["value"].as_str().unwrap().to_uppercase();
    doc["signature"]["value"] = json!(upper);
    assert!(verify(&doc).is_valid());
}

// ---------------------------------------------------------------------------
// Delegate signers
// ---------------------------------------------------------------------------

#[test]
fn delegate_signed_document_is_valid() {
    let doc = delegated(&key_pair(1), &key_pair(2));
    match verify(&doc) {
        VerificationOutcome::Valid(report) => assert_eq!(report.signer, SignerKind::Delegate),
        other => panic!("expected Valid, got {other:?}"),
    }
}

#[test]
fn leaf_key_cannot_stand_in_for_delegate() {
    // Signed by the leaf's own key but naming the root as signer.
    let root = key_pair(1);
    let leaf = key_pair(2);
    let doc = sign_payload(&leaf, &payload(&leaf, "leaf"), self_signed(&root, "root"));
    assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
}

#[test]
fn delegate_with_wrong_key_is_invalid() {
    let root = key_pair(1);
    let impostor = key_pair(3);
    let mut doc = delegated(&root, &key_pair(2));
    doc["signature"]["signer"]["certificate"]["publicKey"]["key"] =
        json!(impostor.public_key().to_hex());
    assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
}

#[test]
fn delegate_signature_is_not_checked() {
    let mut doc = delegated(&key_pair(1), &key_pair(2));
    doc["signature"]["signer"]["signature"]["value"] = json!("garbage");
    assert!(verify(&doc).is_valid());
}

#[test]
fn delegate_scheme_governs_algorithm_gate() {
    let mut doc = delegated(&key_pair(1), &key_pair(2));
    doc["signature"]["signer"]["certificate"]["publicKey"]["parameters"]["scheme"] =
        json!("secp256k1");
    match rejection(verify(&doc)) {
        VerifyError::UnsupportedAlgorithm(m) => {
            assert_eq!(m.len(), 1);
            assert_eq!(m[0].field, AlgorithmField::Scheme);
        }
        other => panic!("expected UnsupportedAlgorithm, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Algorithm gating
// ---------------------------------------------------------------------------

#[test]
fn sha256_is_unsupported_even_with_good_signature() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["signature"]["algorithm"]["hash"] = json!("sha256");
    assert!(matches!(
        rejection(verify(&doc)),
        VerifyError::UnsupportedAlgorithm(_)
    ));
}

#[test]
fn every_suite_deviation_is_unsupported() {
    let kp = key_pair(1);
    let deviations: [(&str, Value); 5] = [
        ("/signature/algorithm/encryption", json!("ECDSA")),
        ("/signature/algorithm/hash", json!("SHA512")),
        ("/certificate/publicKey/parameters/scheme", json!("ed25519")),
        ("/signature/algorithm/hash", Value::Null),
        ("/signature/algorithm", json!({})),
    ];
    for (pointer, replacement) in deviations {
        let mut doc = self_signed(&kp, "node-1");
        *doc.pointer_mut(pointer).unwrap() = replacement;
        let err = rejection(verify(&doc));
        assert_eq!(err.code(), "unsupported_algorithm", "{pointer}");
    }
}

#[test]
fn missing_algorithm_object_is_unsupported() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["signature"].as_object_mut().unwrap().remove("algorithm");
    assert!(matches!(
        rejection(verify(&doc)),
        VerifyError::UnsupportedAlgorithm(ref m) if m.len() == 2
    ));
}

// ---------------------------------------------------------------------------
// Structural rejections
// ---------------------------------------------------------------------------

#[test]
fn arbitrary_signer_string_is_malformed_signer() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["signature"]["signer"] = json!("root-ca");
    assert!(matches!(rejection(verify(&doc)), VerifyError::MalformedSigner(_)));
}

#[test]
fn delegate_without_public_key_is_malformed_signer() {
    let mut doc = delegated(&key_pair(1), &key_pair(2));
    doc["signature"]["signer"]["certificate"]
        .as_object_mut()
        .unwrap()
        .remove("publicKey");
    assert!(matches!(rejection(verify(&doc)), VerifyError::MalformedSigner(_)));
}

#[test]
fn missing_signature_value_is_malformed_document() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["signature"].as_object_mut().unwrap().remove("value");
    assert!(matches!(rejection(verify(&doc)), VerifyError::MalformedDocument(_)));
}

#[test]
fn structurally_broken_inputs_are_malformed_document() {
    for input in [
        json!(null),
        json!("certificate"),
        json!({}),
        json!({"certificate": {}}),
        json!({"signature": {"signer": "self", "value": "00"}}),
        json!({"certificate": [], "signature": {"signer": "self", "value": "00"}}),
        json!({"certificate": {}, "signature": {"signer": "self", "algorithm": "sha512", "value": "00"}}),
    ] {
        assert!(
            matches!(rejection(verify(&input)), VerifyError::MalformedDocument(_)),
            "{input}"
        );
    }
}

#[test]
fn truncated_json_is_malformed_document() {
    let text = serde_json::to_string(&self_signed(&key_pair(1), "node-1")).unwrap();
    let truncated = &text[..text.len() / 2];
    assert!(matches!(
        rejection(verify_str(truncated)),
        VerifyError::MalformedDocument(_)
    ));
}

#[test]
fn short_signature_is_malformed_signature() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["signature"]["value"] = json!("abcdef");
    assert!(matches!(rejection(verify(&doc)), VerifyError::MalformedSignature(_)));
}

#[test]
fn non_hex_key_is_malformed_public_key() {
    let kp = key_pair(1);
    let mut doc = self_signed(&kp, "node-1");
    doc["certificate"]["publicKey"]["key"] = json!("zz".repeat(32));
    assert!(matches!(rejection(verify(&doc)), VerifyError::MalformedPublicKey(_)));
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn over_deep_payload_is_encoding_error() {
    let kp = key_pair(30);
    let mut doc = self_signed(&kp, "deep");
    let mut nested = json!(0);
    for _ in 0..MAX_DEPTH + 72 {
        nested = json!([nested]);
    }
    doc["certificate"]["permissions"] = nested;

    let err = rejection(verify(&doc));
    assert!(matches!(err, VerifyError::Encoding(_)), "got {err:?}");
    assert_eq!(err.code(), "encoding_error");
}

#[test]
fn payload_at_depth_limit_still_reaches_crypto() {
    let kp = key_pair(31);
    let mut certificate = payload(&kp, "limit");
    // The certificate object itself is the first level.
    let mut nested = json!(0);
    for _ in 0..MAX_DEPTH - 1 {
        nested = json!([nested]);
    }
    certificate["permissions"] = nested;
    let doc = sign_payload(&kp, &certificate, json!("self"));

    assert!(verify(&doc).is_valid());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_verification_needs_no_coordination() {
    let docs: Vec<Value> = (1..=8u8).map(|s| self_signed(&key_pair(s), "node")).collect();
    std::thread::scope(|scope| {
        for doc in &docs {
            scope.spawn(move || assert!(verify(doc).is_valid()));
        }
    });
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn payload_extras() -> impl Strategy<Value = Vec<(String, i64)>> {
        proptest::collection::vec(("[a-zA-Z][a-zA-Z0-9_]{0,8}", any::<i32>().prop_map(i64::from)), 0..6)
    }

    proptest! {
        #[test]
        fn any_signed_payload_verifies(subject in "\\PC{0,24}", extras in payload_extras(), seed in any::<u8>()) {
            let kp = key_pair(seed);
            let mut certificate = payload(&kp, &subject);
            for (k, v) in &extras {
                if k != "publicKey" {
                    certificate[k.as_str()] = json!(v);
                }
            }
            let doc = sign_payload(&kp, &certificate, json!("self"));
            prop_assert!(verify(&doc).is_valid());
        }

        #[test]
        fn any_subject_change_is_invalid(a in "\\PC{1,16}", b in "\\PC{1,16}") {
            prop_assume!(a != b);
            let kp = key_pair(9);
            let mut doc = self_signed(&kp, &a);
            doc["certificate"]["subject"] = json!(b);
            prop_assert!(matches!(verify(&doc), VerificationOutcome::Invalid));
        }
    }
}
