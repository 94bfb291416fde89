//! ECDH masking of output amounts and commitment masks
//!
//! Two encodings exist:
//!
//! - **v1** (Full, Simple, Bulletproof): both fields are full scalars,
//!   shifted by `Hs(key)` and `Hs(Hs(key))`.
//! - **v2** (Bulletproof2, CLSAG, BulletproofPlus): only the low 8 amount
//!   bytes are sent, XORed with `Keccak("amount" || key)`. The mask is not
//!   sent; the receiver recomputes it as `Hs("commitment_mask" || key)`.

use curve25519_dalek::Scalar;
use serde::{Deserialize, Serialize};

use crate::hash::{fast_hash_parts, hash_parts_to_scalar, hash_to_scalar};
use crate::rct::types::RctType;

const AMOUNT_DOMAIN: &[u8] = b"amount";
const MASK_DOMAIN: &[u8] = b"commitment_mask";

/// Per-output `(mask, amount)` pair, 32 bytes each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EcdhTuple {
    /// Commitment mask (blinding factor)
    #[serde(with = "hex32")]
    pub mask: [u8; 32],
    /// Amount as a little-endian scalar
    #[serde(with = "hex32")]
    pub amount: [u8; 32],
}

impl EcdhTuple {
    /// v2 tuple from the 8 on-chain amount bytes
    #[must_use]
    pub fn from_compact_amount(amount: [u8; 8]) -> Self {
        let mut full = [0u8; 32];
        full[..8].copy_from_slice(&amount);
        Self {
            mask: [0u8; 32],
            amount: full,
        }
    }

    /// Plaintext tuple for a u64 amount
    #[must_use]
    pub fn from_amount(amount: u64, mask: [u8; 32]) -> Self {
        let mut full = [0u8; 32];
        full[..8].copy_from_slice(&amount.to_le_bytes());
        Self { mask, amount: full }
    }
}

/// `Hs("commitment_mask" || key)`, the v2 deterministic mask.
#[must_use]
pub fn gen_commitment_mask(key: &[u8; 32]) -> Scalar {
    hash_parts_to_scalar(&[MASK_DOMAIN, key])
}

fn xor_amount(amount: &[u8; 32], key: &[u8; 32]) -> [u8; 32] {
    let pad = fast_hash_parts(&[AMOUNT_DOMAIN, key]);
    let mut out = [0u8; 32];
    for (o, (a, p)) in out.iter_mut().zip(amount.iter().zip(pad.iter())).take(8) {
        *o = a ^ p;
    }
    out
}

/// The two v1 shared secrets `Hs(key)` and `Hs(Hs(key))`.
fn v1_secrets(key: &[u8; 32]) -> (Scalar, Scalar) {
    let first = hash_to_scalar(key);
    let second = hash_to_scalar(first.as_bytes());
    (first, second)
}

/// Mask `plain` for the receiver holding `key`.
#[must_use]
pub fn ecdh_encode(plain: &EcdhTuple, key: &[u8; 32], rct_type: RctType) -> EcdhTuple {
    if rct_type.uses_compact_ecdh() {
        return EcdhTuple {
            mask: [0u8; 32],
            amount: xor_amount(&plain.amount, key),
        };
    }
    let (first, second) = v1_secrets(key);
    EcdhTuple {
        mask: (Scalar::from_bytes_mod_order(plain.mask) + first).to_bytes(),
        amount: (Scalar::from_bytes_mod_order(plain.amount) + second).to_bytes(),
    }
}

/// Inverse of [`ecdh_encode`]. For v2 types the mask is recomputed.
#[must_use]
pub fn ecdh_decode(masked: &EcdhTuple, key: &[u8; 32], rct_type: RctType) -> EcdhTuple {
    if rct_type.uses_compact_ecdh() {
        return EcdhTuple {
            mask: gen_commitment_mask(key).to_bytes(),
            amount: xor_amount(&masked.amount, key),
        };
    }
    let (first, second) = v1_secrets(key);
    EcdhTuple {
        mask: (Scalar::from_bytes_mod_order(masked.mask) - first).to_bytes(),
        amount: (Scalar::from_bytes_mod_order(masked.amount) - second).to_bytes(),
    }
}

mod hex32 {
    use alloc::string::String;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}
