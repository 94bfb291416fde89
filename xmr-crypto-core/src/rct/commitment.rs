//! Pedersen commitments `mask*G + amount*H`

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::Scalar;
use lazy_static::lazy_static;

use crate::point::encode_point;
use crate::types::keys::Commitment;

/// Compressed encoding of the second generator H
pub const H_BYTES: [u8; 32] = [
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0, 0xea,
    0x6c, 0x72, 0x51, 0xd5, 0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c, 0x1f, 0x94,
];

lazy_static! {
    /// Second generator `H = 8 * to_point(Keccak(G))`, with no known
    /// discrete log relative to G
    pub static ref H: EdwardsPoint = CompressedEdwardsY(H_BYTES)
        .decompress()
        .expect("H_BYTES is a valid compressed point");
}

/// Commit to `amount` with blinding factor `mask`. Both are read as
/// little-endian integers mod ℓ.
#[must_use]
pub fn pedersen_commitment(amount: &[u8; 32], mask: &[u8; 32]) -> Commitment {
    commit_scalars(
        &Scalar::from_bytes_mod_order(*amount),
        &Scalar::from_bytes_mod_order(*mask),
    )
}

/// Commit to a u64 amount.
#[must_use]
pub fn commit(amount: u64, mask: &Scalar) -> Commitment {
    commit_scalars(&Scalar::from(amount), mask)
}

/// Commitment with mask 1: `G + amount*H`. Used for coinbase outputs and
/// fees, whose amounts are public.
#[must_use]
pub fn zero_commit(amount: u64) -> Commitment {
    commit(amount, &Scalar::ONE)
}

fn commit_scalars(amount: &Scalar, mask: &Scalar) -> Commitment {
    Commitment(encode_point(
        &EdwardsPoint::vartime_double_scalar_mul_basepoint(amount, &H, mask),
    ))
}
