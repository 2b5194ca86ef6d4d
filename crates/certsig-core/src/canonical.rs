//! # Canonical Serialization — RFC 8785 Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are signed, verified, or fingerprinted anywhere in certsig.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which runs the writer in
//! this module. Any function that signs or verifies must accept
//! `&CanonicalBytes`, so a signature can never be checked against the literal
//! bytes of whatever JSON serialization happened to arrive on disk.
//!
//! ## Canonical Form
//!
//! The writer implements the JSON Canonicalization Scheme (RFC 8785), the same
//! form produced by the JavaScript `canonicalize` package that signers use:
//!
//! 1. **Literals**: `null`, `true`, `false`.
//! 2. **Strings**: UTF-8, only `"`, `\`, and control characters escaped.
//!    `\b \t \n \f \r` use their short escapes, other controls `\u00xx`.
//! 3. **Numbers**: every number is an IEEE-754 double rendered with the
//!    ECMAScript `Number.prototype.toString` algorithm. `-0` becomes `0`.
//! 4. **Objects**: members sorted by the UTF-16 code units of their names,
//!    no whitespace.
//! 5. **Arrays**: elements in original order, no whitespace.
//!
//! Key ordering and string escaping are done here. Number text comes from
//! `ryu-js`; no other behavior is delegated to a third-party canonical JSON
//! library.

use std::io::Write;

use serde_json::{Number, Value};

use crate::error::CanonicalizationError;

/// Maximum nesting depth of arrays and objects accepted by the writer.
pub const MAX_DEPTH: usize = 128;

/// Bytes produced exclusively by RFC 8785 canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object members are sorted by UTF-16 code units.
/// - Numbers are in ECMAScript shortest round-trip form.
/// - There is no insignificant whitespace.
/// - The bytes are valid UTF-8 and valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize a JSON value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. Two values that are
    /// semantically equal (same members, regardless of insertion order or the
    /// formatting of the text they were parsed from) produce identical bytes,
    /// and canonicalizing the parse of canonical output is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::NonFiniteNumber` for numbers with no
    /// finite double representation and `CanonicalizationError::DepthExceeded`
    /// when nesting exceeds [`MAX_DEPTH`].
    pub fn new(value: &Value) -> Result<Self, CanonicalizationError> {
        let mut out = Vec::with_capacity(256);
        write_value(&mut out, value, 0)?;
        Ok(Self(out))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Parse the canonical bytes back into a JSON value.
    pub fn to_value(&self) -> Result<Value, CanonicalizationError> {
        Ok(serde_json::from_slice(&self.0)?)
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn write_value(out: &mut Vec<u8>, value: &Value, depth: usize) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            let depth = enter(depth)?;
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item, depth)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let depth = enter(depth)?;
            let mut members: Vec<(&String, &Value)> = map.iter().collect();
            members.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
            out.push(b'{');
            for (i, (key, member)) in members.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(out, key);
                out.push(b':');
                write_value(out, member, depth)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn enter(depth: usize) -> Result<usize, CanonicalizationError> {
    let next = depth + 1;
    if next > MAX_DEPTH {
        return Err(CanonicalizationError::DepthExceeded { max: MAX_DEPTH });
    }
    Ok(next)
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{08}' => out.extend_from_slice(b"\\b"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\u{0C}' => out.extend_from_slice(b"\\f"),
            '\r' => out.extend_from_slice(b"\\r"),
            c if (c as u32) < 0x20 => {
                // Writing into a Vec cannot fail.
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}

fn write_number(out: &mut Vec<u8>, n: &Number) -> Result<(), CanonicalizationError> {
    let value = n
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| CanonicalizationError::NonFiniteNumber(n.to_string()))?;
    out.extend_from_slice(format_number(value).as_bytes());
    Ok(())
}

/// Render a finite double with the ECMAScript `Number::toString` algorithm.
///
/// Digit generation and tie-breaking come from `ryu-js`, which picks the
/// even digit when two shortest candidates are equally close.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    ryu_js::Buffer::new().format_finite(value).to_string()
}
