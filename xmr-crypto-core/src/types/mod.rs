//! Core type definitions for xmr-crypto-core
//!
//! This module contains:
//! - Error types for cryptographic operations
//! - Key, key image, commitment and signature newtypes
//! - Transaction identifier types

pub mod errors;
#[macro_use]
pub mod keys;
pub mod transaction;

// Re-export error types
pub use errors::{CryptoError, CryptoResult};

// Re-export key types
pub use keys::{
    Commitment, KeyDerivation, KeyImage, KeyPair, PublicKey, RingSignature, SecretKey, Signature,
    KEY_LENGTH, SIGNATURE_LENGTH,
};

// Re-export transaction types
pub use transaction::{TxHash, ENCRYPTED_PAYMENT_ID_LENGTH, PAYMENT_ID_LENGTH, TX_HASH_LENGTH};
