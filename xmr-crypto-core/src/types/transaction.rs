//! Transaction-related identifier types

point_newtype!(
    /// Transaction hash (32-byte Keccak-256 digest)
    TxHash,
    "transaction hash"
);

/// Length of a transaction hash in bytes
pub const TX_HASH_LENGTH: usize = 32;

/// Length of an encrypted (short) payment ID in bytes
pub const ENCRYPTED_PAYMENT_ID_LENGTH: usize = 8;

/// Length of a plain (long) payment ID in bytes
pub const PAYMENT_ID_LENGTH: usize = 32;
