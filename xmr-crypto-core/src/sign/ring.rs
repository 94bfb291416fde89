//! Linkable ring signatures (`generate_ring_signature`/`check_ring_signature`)
//!
//! The pre-CLSAG Monero ring signature. For ring keys `P_0..P_{n-1}`, key
//! image `I` and real index `s`:
//!
//! ```text
//! i != s:  a_i = c_i*P_i + r_i*G,   b_i = r_i*Hp(P_i) + c_i*I
//! i == s:  a_s = k*G,               b_s = k*Hp(P_s)
//! h   = Hs(prefix || a_0 || b_0 || ... || a_{n-1} || b_{n-1})
//! c_s = h - sum(c_i, i != s)
//! r_s = k - c_s*x
//! ```
//! Verification recomputes every `(a_i, b_i)` and accepts iff
//! `sum(c_i) == Hs(prefix || pairs)`.

use alloc::vec::Vec;

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::Scalar;
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Keccak256};
use tracing::debug;
use zeroize::Zeroize;

use crate::keys::derive::secret_scalar;
use crate::point::{checked_point, encode_point, hash_to_ec};
use crate::scalar::{canonical_scalar, random_scalar};
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::keys::{KeyImage, PublicKey, RingSignature, SecretKey, Signature};

/// Running `Hs(prefix || a_0 || b_0 || ...)` transcript
struct RingTranscript(Keccak256);

impl RingTranscript {
    fn new(prefix: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(prefix);
        Self(hasher)
    }

    fn push(&mut self, a: &EdwardsPoint, b: &EdwardsPoint) {
        self.0.update(encode_point(a));
        self.0.update(encode_point(b));
    }

    fn challenge(self) -> Scalar {
        Scalar::from_bytes_mod_order(self.0.finalize().into())
    }
}

/// Produce a ring signature over `prefix` for the key at `sec_index`.
///
/// Randomness is drawn in ring order: `(c_i, r_i)` for each decoy, `k` at
/// the real index.
///
/// # Errors
/// - `BadIndex` if `sec_index >= keys.len()`
/// - `InvalidKeyImage` if `image` fails `key_check`
/// - `InvalidSecretKey` if `sec` is not canonical
/// - `InvalidRingMember` if a decoy key fails `key_check`
pub fn generate_ring_signature<R: RngCore + CryptoRng>(
    rng: &mut R,
    prefix: &[u8],
    image: &KeyImage,
    keys: &[PublicKey],
    sec: &SecretKey,
    sec_index: usize,
) -> CryptoResult<RingSignature> {
    if sec_index >= keys.len() {
        return Err(CryptoError::BadIndex {
            index: sec_index,
            ring_size: keys.len(),
        });
    }
    let image_point = checked_point(image.as_bytes(), CryptoError::InvalidKeyImage)?;
    let x = secret_scalar(sec)?;

    let mut transcript = RingTranscript::new(prefix);
    let mut pairs: Vec<(Scalar, Scalar)> = Vec::with_capacity(keys.len());
    let mut sum = Scalar::ZERO;
    let mut k = Scalar::ZERO;

    for (i, key) in keys.iter().enumerate() {
        let hp = hash_to_ec(key.as_bytes())?;
        if i == sec_index {
            k = random_scalar(rng);
            let a = ED25519_BASEPOINT_TABLE * &k;
            let b = k * hp;
            transcript.push(&a, &b);
            pairs.push((Scalar::ZERO, Scalar::ZERO));
        } else {
            let c = random_scalar(rng);
            let r = random_scalar(rng);
            let point = checked_point(key.as_bytes(), CryptoError::InvalidRingMember { index: i })?;
            let a = EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &point, &r);
            let b = r * hp + c * image_point;
            transcript.push(&a, &b);
            sum += c;
            pairs.push((c, r));
        }
    }

    let h = transcript.challenge();
    let c_s = h - sum;
    let r_s = k - c_s * x;
    pairs[sec_index] = (c_s, r_s);
    k.zeroize();

    debug!(
        ring_size = keys.len(),
        ki_prefix = %image.prefix(),
        "generated ring signature"
    );

    Ok(RingSignature(
        pairs
            .into_iter()
            .map(|(c, r)| Signature {
                c: c.to_bytes(),
                r: r.to_bytes(),
            })
            .collect(),
    ))
}

/// Verify a ring signature. Never errors; malformed input is `false`.
///
/// A signature whose length differs from the ring size is rejected.
#[must_use]
pub fn check_ring_signature(
    prefix: &[u8],
    image: &KeyImage,
    keys: &[PublicKey],
    sig: &RingSignature,
) -> bool {
    if keys.is_empty() || sig.len() != keys.len() {
        debug!(
            ring_size = keys.len(),
            sig_len = sig.len(),
            "ring signature length mismatch"
        );
        return false;
    }
    let Ok(image_point) = checked_point(image.as_bytes(), CryptoError::InvalidKeyImage) else {
        return false;
    };

    let mut transcript = RingTranscript::new(prefix);
    let mut sum = Scalar::ZERO;

    for (i, (key, pair)) in keys.iter().zip(sig.as_slice()).enumerate() {
        let (Some(c), Some(r)) = (canonical_scalar(&pair.c), canonical_scalar(&pair.r)) else {
            debug!(index = i, "ring signature scalar not canonical");
            return false;
        };
        let Ok(point) = checked_point(key.as_bytes(), CryptoError::InvalidRingMember { index: i })
        else {
            return false;
        };
        let Ok(hp) = hash_to_ec(key.as_bytes()) else {
            return false;
        };
        let a = EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &point, &r);
        let b = r * hp + c * image_point;
        transcript.push(&a, &b);
        sum += c;
    }

    let ok = transcript.challenge() == sum;
    if !ok {
        debug!(ki_prefix = %image.prefix(), "ring signature does not close");
    }
    ok
}
