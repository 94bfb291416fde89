//! Deterministic hash-to-curve (`ge_fromfe_frombytes_vartime`)
//!
//! Maps 32 bytes onto the curve through the Montgomery form (Elligator 2
//! variant). The result is not cofactor-cleared; [`hash_to_ec`] is the
//! variant used for key images and ring signatures.
//!
//! ```text
//! u = bytes mod p        (all 256 bits)
//! v = 2u^2, w = v + 1, x = w^2 - A^2·v
//! X = (w / x)^((p + 3) / 8)
//! ```
//! The four branches pick the right square-root multiplier, then the point
//! is assembled in projective `(X·Z : Y : Z)` form with `Z = z + w`,
//! `Y = z - w`.

use crypto_bigint::U256;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use dalek_ff_group::FieldElement;
use group::ff::{Field, PrimeField};
use tracing::debug;

use crate::hash::fast_hash;
use crate::types::errors::{CryptoError, CryptoResult};

const fn fe(hex: &str) -> FieldElement {
    FieldElement::from_u256(&U256::from_be_hex(hex))
}

/// sqrt(-1)
const SQRT_M1: FieldElement =
    fe("2b8324804fc1df0b2b4d00993dfbd7a72f431806ad2fe478c4ee1b274a0ea0b0");
/// -A for the Montgomery form, A = 486662
const MINUS_A: FieldElement =
    fe("7ffffffffffffffffffffffffffffffffffffffffffffffffffffffffff892e7");
/// -A^2
const MINUS_A_SQUARED: FieldElement =
    fe("7fffffffffffffffffffffffffffffffffffffffffffffffffffffc8db3de3c9");
/// sqrt(-2·A·(A + 2))
const FFFB1: FieldElement =
    fe("018e04102529e4e8df563ac8be04e61c2e6bfb5746d58c72dd58968acde3bdff");
/// sqrt(2·A·(A + 2))
const FFFB2: FieldElement =
    fe("32f9e1f5fba5d3096e2bae483fe9a041ae21fcb9fba908202d219b7c9f83650d");
/// sqrt(-sqrt(-1)·A·(A + 2))
const FFFB3: FieldElement =
    fe("674a110d14c208efb89546403f0da2ed4024ff4ea5964229581b7d8717302c66");
/// sqrt(sqrt(-1)·A·(A + 2))
const FFFB4: FieldElement =
    fe("65bc0cfcef982406d93f0b778108bcd111b903f75ec0b5b67ac2e6fc494c6e67");
/// (p - 5) / 8
const P58: FieldElement =
    fe("0ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffd");

/// All 256 bits of `bytes`, reduced mod p.
fn load_wide(bytes: &[u8; 32]) -> FieldElement {
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(bytes);
    FieldElement::wide_reduce(wide)
}

/// Candidate for (u/v)^((p + 3)/8), computed as u·v^3·(u·v^7)^((p - 5)/8).
fn div_pow_m1(u: FieldElement, v: FieldElement) -> FieldElement {
    let v3 = v.square() * v;
    let v7 = v3.square() * v;
    u * v3 * (u * v7).pow(P58)
}

fn is_negative(value: &FieldElement) -> bool {
    bool::from(value.is_odd())
}

/// Map 32 bytes to a curve point.
///
/// # Errors
/// `InvalidPoint` only if none of the four square-root branches apply,
/// which cannot happen for any input but is kept as a checked failure.
pub fn hash_to_point(bytes: &[u8; 32]) -> CryptoResult<EdwardsPoint> {
    let u = load_wide(bytes);
    let v = u.square().double();
    let w = v + FieldElement::ONE;
    let mut x = w.square() + MINUS_A_SQUARED * v;

    let mut r_x = div_pow_m1(w, x);
    x = r_x.square() * x;

    let mut z = MINUS_A;
    let sign;

    if w == x {
        r_x = r_x * FFFB2 * u;
        z *= v;
        sign = false;
    } else if w == -x {
        r_x = r_x * FFFB1 * u;
        z *= v;
        sign = false;
    } else {
        x *= SQRT_M1;
        if w == x {
            r_x *= FFFB4;
        } else if w == -x {
            r_x *= FFFB3;
        } else {
            debug!(input_prefix = %hex::encode(&bytes[..8]), "hash_to_point: no square root branch");
            return Err(CryptoError::InvalidPoint);
        }
        sign = true;
    }

    if is_negative(&r_x) != sign {
        r_x = -r_x;
    }

    let r_z = z + w;
    let r_y = z - w;
    let r_x = r_x * r_z;

    // affine and compress
    let z_inv = Option::<FieldElement>::from(r_z.invert()).ok_or(CryptoError::InvalidPoint)?;
    let x_aff = r_x * z_inv;
    let y_aff = r_y * z_inv;
    let mut compressed = y_aff.to_repr();
    compressed[31] |= u8::from(is_negative(&x_aff)) << 7;

    CompressedEdwardsY(compressed)
        .decompress()
        .ok_or(CryptoError::InvalidPoint)
}

/// `Hp(data)`: `8 · hash_to_point(keccak(data))`, a point in the prime-order
/// subgroup.
pub fn hash_to_ec(data: &[u8]) -> CryptoResult<EdwardsPoint> {
    Ok(hash_to_point(&fast_hash(data))?.mul_by_cofactor())
}
