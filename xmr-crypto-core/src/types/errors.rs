//! Error types for cryptographic operations
//!
//! This module defines all error types used throughout xmr-crypto-core.
//! Errors are categorized by the operation that caused them.

use alloc::string::String;
use core::fmt;

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Comprehensive error type for all cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    // =========================================================================
    // Key Errors
    // =========================================================================
    /// Scalar is not canonical (not strictly below the group order)
    InvalidSecretKey,

    /// Public key fails to decode, re-encode identically, or lie on the curve
    InvalidPublicKey,

    /// Low-level point decode failure
    InvalidPoint,

    /// The supplied public key is not the one derived from the secret key
    IncorrectPublicKey,

    // =========================================================================
    // Ring Signature Errors
    // =========================================================================
    /// Key image is not a valid point
    InvalidKeyImage,

    /// A ring member's public key is not a valid point
    InvalidRingMember {
        /// Position of the offending key in the ring
        index: usize,
    },

    /// Secret index outside the ring
    BadIndex {
        /// The requested secret index
        index: usize,
        /// Ring size
        ring_size: usize,
    },

    // =========================================================================
    // RingCT Errors
    // =========================================================================
    /// Decoded amount and mask do not reproduce the output commitment
    MismatchedCommitments,

    /// RCT type byte is not a known protocol type
    UnknownRctType(u8),

    // =========================================================================
    // Transaction Codec Errors
    // =========================================================================
    /// Buffer ended before a field could be read
    TruncatedTransaction {
        /// Field being read
        field: &'static str,
        /// Byte offset where the read started
        offset: usize,
    },

    /// Varint does not fit in 64 bits
    VarintOverflow {
        /// Byte offset of the varint
        offset: usize,
    },

    /// Transaction input carries an unsupported tag
    UnknownInputType {
        /// The input tag byte
        tag: u8,
        /// Byte offset of the tag
        offset: usize,
    },

    /// Transaction output carries an unsupported target tag
    UnknownOutputType {
        /// The output tag
        tag: u64,
        /// Byte offset of the tag
        offset: usize,
    },

    /// Fee arithmetic exceeded the representable range
    FeeOverflow,

    // =========================================================================
    // General Errors
    // =========================================================================
    /// Hex decode failed
    HexDecodeFailed(String),

    /// Invalid input length
    InvalidLength {
        /// Name of the field
        field: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Keys
            CryptoError::InvalidSecretKey => write!(f, "Invalid secret key"),
            CryptoError::InvalidPublicKey => write!(f, "Invalid public key"),
            CryptoError::InvalidPoint => write!(f, "Invalid point"),
            CryptoError::IncorrectPublicKey => {
                write!(f, "Public key does not match secret key")
            }

            // Ring signatures
            CryptoError::InvalidKeyImage => write!(f, "Invalid key image"),
            CryptoError::InvalidRingMember { index } => {
                write!(f, "Invalid public key at ring position {index}")
            }
            CryptoError::BadIndex { index, ring_size } => {
                write!(
                    f,
                    "Secret index {index} out of bounds for ring size {ring_size}"
                )
            }

            // RingCT
            CryptoError::MismatchedCommitments => write!(f, "Mismatched commitments"),
            CryptoError::UnknownRctType(ty) => write!(f, "Unknown RCT type {ty}"),

            // Transaction codec
            CryptoError::TruncatedTransaction { field, offset } => {
                write!(f, "Transaction truncated reading {field} at offset {offset}")
            }
            CryptoError::VarintOverflow { offset } => {
                write!(f, "Varint at offset {offset} overflows 64 bits")
            }
            CryptoError::UnknownInputType { tag, offset } => {
                write!(f, "Unknown input type 0x{tag:02x} at offset {offset}")
            }
            CryptoError::UnknownOutputType { tag, offset } => {
                write!(f, "Unknown output type 0x{tag:02x} at offset {offset}")
            }
            CryptoError::FeeOverflow => write!(f, "Fee calculation overflowed"),

            // General
            CryptoError::HexDecodeFailed(msg) => write!(f, "Hex decode failed: {msg}"),
            CryptoError::InvalidLength {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid {field} length: expected {expected}, got {actual}"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CryptoError {}
