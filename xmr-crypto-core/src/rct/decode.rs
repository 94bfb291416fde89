//! Output amount recovery (`decodeRct`)

use alloc::string::{String, ToString};

use num_bigint::BigUint;
use tracing::debug;

use crate::keys::derive::derivation_to_scalar;
use crate::rct::commitment::pedersen_commitment;
use crate::rct::ecdh::{ecdh_decode, EcdhTuple};
use crate::rct::types::RctType;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::keys::{Commitment, KeyDerivation};

/// A decoded and verified output amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAmount {
    /// Commitment mask
    pub mask: [u8; 32],
    /// Amount scalar bytes, little-endian
    pub amount_bytes: [u8; 32],
    /// Amount as a decimal string
    pub amount: String,
}

impl DecodedAmount {
    /// The amount as u64, or `None` if it does not fit
    #[must_use]
    pub fn amount_u64(&self) -> Option<u64> {
        if self.amount_bytes[8..].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.amount_bytes[..8]);
        Some(u64::from_le_bytes(low))
    }
}

/// Decimal string of a 256-bit little-endian integer.
#[must_use]
pub fn le_bytes_to_decimal(bytes: &[u8; 32]) -> String {
    BigUint::from_bytes_le(bytes).to_string()
}

/// Decode output `output_index` and check it against its on-chain commitment.
///
/// # Arguments
/// * `ecdh` - The output's masked ECDH tuple
/// * `out_commitment` - The output commitment from the transaction
/// * `rct_type` - RingCT type of the transaction
/// * `output_index` - Index of the output
/// * `derivation` - Shared derivation `8*a*R`
///
/// # Errors
/// `MismatchedCommitments` if the decoded amount and mask do not reproduce
/// `out_commitment`.
pub fn decode_rct(
    ecdh: &EcdhTuple,
    out_commitment: &Commitment,
    rct_type: RctType,
    output_index: u64,
    derivation: &KeyDerivation,
) -> CryptoResult<DecodedAmount> {
    let key = derivation_to_scalar(derivation, output_index).to_bytes();
    let plain = ecdh_decode(ecdh, &key, rct_type);

    let recomputed = pedersen_commitment(&plain.amount, &plain.mask);
    if recomputed != *out_commitment {
        debug!(
            output_index,
            %rct_type,
            commitment = %out_commitment.prefix(),
            "decoded amount does not match commitment"
        );
        return Err(CryptoError::MismatchedCommitments);
    }

    Ok(DecodedAmount {
        mask: plain.mask,
        amount_bytes: plain.amount,
        amount: le_bytes_to_decimal(&plain.amount),
    })
}
