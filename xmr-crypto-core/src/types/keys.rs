//! Key, point and signature types
//!
//! Every value crossing the public API is a fixed-size byte newtype. Hex
//! conversion happens once, at the edge, through `from_hex`/`to_hex`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::{CryptoError, CryptoResult};

/// Length of a compressed point or canonical scalar in bytes
pub const KEY_LENGTH: usize = 32;

/// Length of a Schnorr signature (c ‖ r) in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// Decode exactly 32 bytes of hex.
#[doc(hidden)]
pub fn decode_hex32(hex_str: &str, field: &'static str) -> CryptoResult<[u8; KEY_LENGTH]> {
    if hex_str.len() != KEY_LENGTH * 2 {
        return Err(CryptoError::InvalidLength {
            field,
            expected: KEY_LENGTH * 2,
            actual: hex_str.len(),
        });
    }

    let mut bytes = [0u8; KEY_LENGTH];
    hex::decode_to_slice(hex_str, &mut bytes)
        .map_err(|e| CryptoError::HexDecodeFailed(e.to_string()))?;
    Ok(bytes)
}

/// Fixed 32-byte wire value with hex, serde and formatting impls.
macro_rules! point_newtype {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $crate::types::keys::KEY_LENGTH]);

        impl $name {
            /// Wrap raw bytes (no validation)
            #[must_use]
            pub const fn new(bytes: [u8; $crate::types::keys::KEY_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Create from a hex string
            pub fn from_hex(hex_str: &str) -> $crate::types::CryptoResult<Self> {
                $crate::types::keys::decode_hex32(hex_str, $field).map(Self)
            }

            /// Convert to hex string
            #[must_use]
            pub fn to_hex(&self) -> alloc::string::String {
                hex::encode(self.0)
            }

            /// Get the underlying bytes
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $crate::types::keys::KEY_LENGTH] {
                &self.0
            }

            /// Short hex prefix for log lines
            #[allow(dead_code)]
            pub(crate) fn prefix(&self) -> alloc::string::String {
                hex::encode(&self.0[..8])
            }
        }

        impl From<[u8; $crate::types::keys::KEY_LENGTH]> for $name {
            fn from(bytes: [u8; $crate::types::keys::KEY_LENGTH]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(self.0))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&hex::encode(self.0))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

point_newtype!(
    /// Compressed ed25519 public key
    PublicKey,
    "public key"
);

point_newtype!(
    /// Shared ECDH derivation `8·(a·R)`
    KeyDerivation,
    "key derivation"
);

point_newtype!(
    /// Linkable key image `x·Hp(P)`
    ///
    /// Two ring signatures carrying the same key image were produced with the
    /// same secret key.
    KeyImage,
    "key image"
);

point_newtype!(
    /// Pedersen commitment `mask·G + amount·H`
    Commitment,
    "commitment"
);

// =============================================================================
// Secret Key
// =============================================================================

/// Canonical secret scalar, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub [u8; KEY_LENGTH]);

impl SecretKey {
    /// Wrap raw bytes (no canonicity check)
    #[must_use]
    pub const fn new(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a hex string
    pub fn from_hex(hex_str: &str) -> CryptoResult<Self> {
        decode_hex32(hex_str, "secret key").map(Self)
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get the underlying bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A secret key together with its public key `sec·G`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Public key
    pub public: PublicKey,
    /// Secret key
    pub secret: SecretKey,
}

// =============================================================================
// Signatures
// =============================================================================

/// Schnorr signature, also one (c, r) slot of a ring signature
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Challenge scalar
    pub c: [u8; KEY_LENGTH],
    /// Response scalar
    pub r: [u8; KEY_LENGTH],
}

impl Signature {
    /// Split a 64-byte `c ‖ r` encoding
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        let mut c = [0u8; KEY_LENGTH];
        let mut r = [0u8; KEY_LENGTH];
        c.copy_from_slice(&bytes[..KEY_LENGTH]);
        r.copy_from_slice(&bytes[KEY_LENGTH..]);
        Self { c, r }
    }

    /// Parse from a slice that must be exactly 64 bytes
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let arr: &[u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                field: "signature",
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self::from_bytes(arr))
    }

    /// Encode as `c ‖ r`
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..KEY_LENGTH].copy_from_slice(&self.c);
        out[KEY_LENGTH..].copy_from_slice(&self.r);
        out
    }

    /// Create from a 128-character hex string
    pub fn from_hex(hex_str: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| CryptoError::HexDecodeFailed(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("c", &hex::encode(self.c))
            .field("r", &hex::encode(self.r))
            .finish()
    }
}

/// Ring signature: one (c, r) pair per ring member, in ring order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingSignature(pub Vec<Signature>);

impl RingSignature {
    /// Parse the `64·N` byte wire form
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.is_empty() || bytes.len() % SIGNATURE_LENGTH != 0 {
            return Err(CryptoError::InvalidLength {
                field: "ring signature",
                expected: (bytes.len() / SIGNATURE_LENGTH).max(1) * SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(
            bytes
                .chunks_exact(SIGNATURE_LENGTH)
                .map(Signature::from_slice)
                .collect::<CryptoResult<Vec<_>>>()?,
        ))
    }

    /// Concatenate all pairs
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(Signature::to_bytes).collect()
    }

    /// Create from hex
    pub fn from_hex(hex_str: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(hex_str).map_err(|e| CryptoError::HexDecodeFailed(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Ring size
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty signature
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-member pairs
    #[must_use]
    pub fn as_slice(&self) -> &[Signature] {
        &self.0
    }
}
