//! Transaction size, weight and fee estimates
//!
//! Sizes are upper-bound estimates for a transaction of a given shape built
//! by a standard wallet, used before the transaction exists.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FeeParams;
use crate::types::errors::{CryptoError, CryptoResult};

/// Shape of a transaction to estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxShape {
    /// Number of inputs
    pub inputs: u64,
    /// Decoys per input (ring size minus one)
    pub mixin: u64,
    /// Number of outputs
    pub outputs: u64,
    /// Extra field size in bytes
    pub extra_size: u64,
    /// Aggregated bulletproof range proofs
    pub bulletproof: bool,
    /// CLSAG ring signatures
    pub clsag: bool,
}

impl TxShape {
    /// Shape with bulletproofs and CLSAG enabled.
    #[must_use]
    pub const fn new(inputs: u64, mixin: u64, outputs: u64, extra_size: u64) -> Self {
        Self {
            inputs,
            mixin,
            outputs,
            extra_size,
            bulletproof: true,
            clsag: true,
        }
    }

    /// Toggle aggregated bulletproofs.
    #[must_use]
    pub const fn with_bulletproof(mut self, bulletproof: bool) -> Self {
        self.bulletproof = bulletproof;
        self
    }

    /// Toggle CLSAG signatures.
    #[must_use]
    pub const fn with_clsag(mut self, clsag: bool) -> Self {
        self.clsag = clsag;
        self
    }
}

/// Smallest `log` with `2^log >= n`.
fn ceil_log2(n: u64) -> u32 {
    n.checked_next_power_of_two()
        .map_or(64, u64::trailing_zeros)
}

/// `total + count * each`, `None` on overflow.
fn add_items(total: u64, count: u64, each: u64) -> Option<u64> {
    count.checked_mul(each)?.checked_add(total)
}

fn checked_size(shape: &TxShape) -> Option<u64> {
    let TxShape {
        inputs,
        mixin,
        outputs,
        extra_size,
        ..
    } = *shape;
    let ring = mixin.checked_add(1)?;

    // version + unlock time
    let mut size = 1 + 6;
    // vin: type, amount, key offsets, key image
    size = add_items(size, inputs, ring.checked_mul(2)?.checked_add(1 + 6 + 32)?)?;
    // vout: amount, key
    size = add_items(size, outputs, 6 + 32)?;
    size = size.checked_add(extra_size)?;
    // rct type
    size += 1;

    if shape.bulletproof {
        let log = u64::from(ceil_log2(outputs));
        size = size.checked_add((2 * (6 + log) + 4 + 5) * 32 + 3)?;
    } else {
        size = add_items(size, outputs, 2 * 64 * 32 + 32 + 64 * 32)?;
    }

    let per_input = if shape.clsag {
        ring.checked_mul(32)?.checked_add(64)?
    } else {
        ring.checked_mul(64)?.checked_add(32)?
    };
    size = add_items(size, inputs, per_input)?;

    // pseudo outs
    size = add_items(size, inputs, 32)?;
    // ecdh info + out commitments
    size = add_items(size, outputs, 8 + 32)?;
    // fee
    size.checked_add(4)
}

/// Estimated serialized size in bytes.
///
/// # Errors
/// `FeeOverflow` if the size does not fit in a `u64`.
pub fn estimate_tx_size(shape: &TxShape) -> CryptoResult<u64> {
    checked_size(shape).ok_or(CryptoError::FeeOverflow)
}

/// Estimated weight.
///
/// Equal to the size except for bulletproof transactions with more than two
/// outputs, which pay a clawback for the proof aggregation discount.
///
/// # Errors
/// `FeeOverflow` if the weight does not fit in a `u64`.
pub fn estimate_tx_weight(shape: &TxShape) -> CryptoResult<u64> {
    let weight = estimate_tx_size(shape)?;
    if !shape.bulletproof || shape.outputs <= 2 {
        return Ok(weight);
    }
    let log = ceil_log2(shape.outputs).max(2);
    let clawback = 1u64
        .checked_shl(log)
        .and_then(|padded_outputs| padded_outputs.checked_mul(368))
        .and_then(|bp_base| {
            let nlr = 2 * (6 + u64::from(log));
            bp_base.checked_sub(32 * (9 + nlr))
        })
        .and_then(|discount| discount.checked_mul(4))
        .map(|discount| discount / 5);
    clawback
        .and_then(|clawback| weight.checked_add(clawback))
        .ok_or(CryptoError::FeeOverflow)
}

/// `ceil(base_fee * weight * multiplier / q) * q`.
///
/// A quantization of zero leaves the fee unrounded.
///
/// # Errors
/// `FeeOverflow` if the result does not fit in a `u64`.
pub fn calculate_fee_from_weight(weight: u64, params: &FeeParams) -> CryptoResult<u64> {
    let raw = u128::from(params.base_fee)
        .checked_mul(u128::from(weight))
        .and_then(|fee| fee.checked_mul(u128::from(params.fee_multiplier)))
        .ok_or(CryptoError::FeeOverflow)?;
    let quantized = match u128::from(params.fee_quantization) {
        0 => raw,
        q => raw
            .div_ceil(q)
            .checked_mul(q)
            .ok_or(CryptoError::FeeOverflow)?,
    };
    u64::try_from(quantized).map_err(|_| CryptoError::FeeOverflow)
}

/// Estimate the fee for a transaction of the given shape.
///
/// # Errors
/// `FeeOverflow` if the fee does not fit in a `u64`.
pub fn estimate_fee(shape: &TxShape, params: &FeeParams) -> CryptoResult<u64> {
    let weight = estimate_tx_weight(shape)?;
    let fee = calculate_fee_from_weight(weight, params)?;
    debug!(
        inputs = shape.inputs,
        outputs = shape.outputs,
        weight,
        fee,
        "estimated transaction fee"
    );
    Ok(fee)
}
