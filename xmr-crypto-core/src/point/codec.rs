//! Compressed point encoding with strict validation
//!
//! `CompressedEdwardsY::decompress` accepts y-coordinates at or above p and
//! a set sign bit on x = 0. Both are non-canonical encodings that Monero's
//! `ge_frombytes_vartime` rejects, so they are filtered here first.

use crypto_bigint::U256;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use dalek_ff_group::FieldElement;
use group::ff::{Field, PrimeField};
use tracing::debug;

use crate::types::errors::{CryptoError, CryptoResult};

/// Edwards curve constant d = -121665/121666
const EDWARDS_D: FieldElement = FieldElement::from_u256(&U256::from_be_hex(
    "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
));

/// Recover x from y for `-x^2 + y^2 = 1 + d·x^2·y^2`, choosing parity `sign`.
///
/// Returns `None` when y is not on the curve or when x = 0 with `sign` set.
fn recover_x(y: FieldElement, sign: bool) -> Option<FieldElement> {
    let y2 = y.square();
    let u = y2 - FieldElement::ONE;
    let v = EDWARDS_D * y2 + FieldElement::ONE;

    // even root of u/v
    let (is_square, x) = FieldElement::sqrt_ratio_i(u, v);
    if !bool::from(is_square) {
        return None;
    }
    if bool::from(x.is_zero()) {
        return (!sign).then_some(x);
    }
    Some(if sign { -x } else { x })
}

/// Field coordinates `(x, y)` of a compressed encoding, strictly validated.
fn decode_affine(bytes: &[u8; 32]) -> Option<(FieldElement, FieldElement)> {
    let mut y_bytes = *bytes;
    y_bytes[31] &= 0x7f;
    let y = Option::<FieldElement>::from(FieldElement::from_repr(y_bytes))?;
    let x = recover_x(y, bytes[31] >> 7 == 1)?;
    Some((x, y))
}

/// Affine curve equation `-x^2 + y^2 = 1 + d·x^2·y^2`.
fn on_curve(x: &FieldElement, y: &FieldElement) -> bool {
    let x2 = x.square();
    let y2 = y.square();
    y2 - x2 == FieldElement::ONE + EDWARDS_D * x2 * y2
}

/// Decode a compressed point.
///
/// # Errors
/// `InvalidPoint` if y >= p, if no x satisfies the curve equation, or if
/// x = 0 while the sign bit is set.
pub fn decode_point(bytes: &[u8; 32]) -> CryptoResult<EdwardsPoint> {
    decode_affine(bytes).ok_or(CryptoError::InvalidPoint)?;
    CompressedEdwardsY(*bytes)
        .decompress()
        .ok_or(CryptoError::InvalidPoint)
}

/// Compressed 32-byte encoding.
#[must_use]
pub fn encode_point(point: &EdwardsPoint) -> [u8; 32] {
    point.compress().to_bytes()
}

/// True iff `bytes` is a canonical encoding of a curve point.
///
/// The point must decode, re-encode to the identical bytes, and satisfy the
/// curve equation.
#[must_use]
pub fn key_check(bytes: &[u8; 32]) -> bool {
    let Ok(point) = decode_point(bytes) else {
        return false;
    };
    if encode_point(&point) != *bytes {
        return false;
    }
    decode_affine(bytes).is_some_and(|(x, y)| on_curve(&x, &y))
}

/// Decode a point that must pass [`key_check`], mapping failure to `err`.
pub(crate) fn checked_point(bytes: &[u8; 32], err: CryptoError) -> CryptoResult<EdwardsPoint> {
    if !key_check(bytes) {
        debug!(key_prefix = %hex::encode(&bytes[..8]), "rejecting invalid point");
        return Err(err);
    }
    decode_point(bytes).map_err(|_| err)
}
