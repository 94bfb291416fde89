//! Transaction identifiers
//!
//! For RingCT transactions the ID is
//! `Keccak(Keccak(prefix) || Keccak(base) || Keccak(prunable))`, with 32 zero
//! bytes standing in for the prunable hash when the RCT type is `Null`.
//! Version 1 transactions hash the whole blob.

use alloc::string::ToString;

use tracing::debug;

use crate::hash::{fast_hash, fast_hash_parts};
use crate::rct::RctType;
use crate::tx::reader::{parse_transaction, ParsedTransaction};
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::transaction::TxHash;

/// ID of an already parsed transaction.
#[must_use]
pub fn tx_id_from_parsed(blob: &[u8], parsed: &ParsedTransaction<'_>) -> TxHash {
    match parsed.rct_type() {
        None => TxHash(fast_hash(blob)),
        Some(rct_type) => {
            let prefix_hash = fast_hash(parsed.prefix);
            let base_hash = fast_hash(parsed.base);
            let prunable_hash = if rct_type == RctType::Null {
                [0u8; 32]
            } else {
                fast_hash(parsed.prunable)
            };
            TxHash(fast_hash_parts(&[&prefix_hash, &base_hash, &prunable_hash]))
        }
    }
}

/// Compute the transaction ID of a serialized transaction.
///
/// # Errors
/// Any parse error from [`parse_transaction`].
pub fn get_tx_id(blob: &[u8]) -> CryptoResult<TxHash> {
    let parsed = parse_transaction(blob)?;
    let id = tx_id_from_parsed(blob, &parsed);
    debug!(tx_id = %id.prefix(), version = parsed.version, "computed transaction id");
    Ok(id)
}

/// Compute the transaction ID of a hex-encoded transaction.
///
/// # Errors
/// `HexDecodeFailed` on bad hex, otherwise as [`get_tx_id`].
pub fn get_tx_id_from_hex(tx_hex: &str) -> CryptoResult<TxHash> {
    let blob = hex::decode(tx_hex).map_err(|e| CryptoError::HexDecodeFailed(e.to_string()))?;
    get_tx_id(&blob)
}

/// Keccak of the transaction prefix, the message signed by the ring
/// signatures.
///
/// # Errors
/// Any parse error from [`parse_transaction`].
pub fn get_tx_prefix_hash(blob: &[u8]) -> CryptoResult<[u8; 32]> {
    let parsed = parse_transaction(blob)?;
    Ok(fast_hash(parsed.prefix))
}
