//! Fixed-length byte strings carried as hex text in documents.

use certsig_core::CryptoError;

/// Decode `text` as exactly `N` bytes of hex (either case).
///
/// `malformed` wraps the failure description in the caller's error variant.
pub(crate) fn decode_fixed<const N: usize>(
    text: &str,
    malformed: fn(String) -> CryptoError,
) -> Result<[u8; N], CryptoError> {
    let bytes = hex::decode(text).map_err(|e| malformed(format!("invalid hex: {e}")))?;
    let len = bytes.len();
    <[u8; N]>::try_from(bytes)
        .map_err(|_| malformed(format!("expected {N} bytes, got {len}")))
}

/// Declare a fixed-length byte newtype that reads and writes lowercase hex.
///
/// Generates `from_bytes`, `as_bytes`, `to_hex`, `from_hex`, `FromStr`,
/// hex-string serde, `Display` (full hex) and a `Debug` that shows only the
/// first four bytes.
macro_rules! hex_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $malformed:path) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Lowercase hex.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Parse hex text (either case, no surrounding whitespace).
            pub fn from_hex(text: &str) -> Result<Self, certsig_core::CryptoError> {
                $crate::encoding::decode_fixed::<{ $len }>(text, $malformed).map(Self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = certsig_core::CryptoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let text = <std::borrow::Cow<'de, str>>::deserialize(d)?;
                Self::from_hex(&text).map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({}..)"), hex::encode(&self.0[..4]))
            }
        }
    };
}

pub(crate) use hex_bytes;
