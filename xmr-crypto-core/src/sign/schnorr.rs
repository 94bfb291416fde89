//! Schnorr signatures over ed25519 (`generate_signature`/`check_signature`)
//!
//! ```text
//! k random, K = k*G
//! c = Hs(prefix || P || K)
//! r = k - c*x
//! ```
//! Verification recomputes `K' = c*P + r*G` and checks
//! `c == Hs(prefix || P || K')`.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::traits::IsIdentity;
use curve25519_dalek::Scalar;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::hash::hash_parts_to_scalar;
use crate::keys::derive::{constant_time_compare, secret_scalar};
use crate::point::{checked_point, encode_point};
use crate::scalar::{canonical_scalar, random_scalar};
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::keys::{PublicKey, SecretKey, Signature};

fn challenge(prefix: &[u8], key: &PublicKey, commitment: &[u8; 32]) -> Scalar {
    hash_parts_to_scalar(&[prefix, key.as_bytes(), commitment])
}

/// Sign `prefix` with `sec`, whose public key must be `key`.
///
/// # Errors
/// `InvalidSecretKey` if `sec` is not canonical, `IncorrectPublicKey` if
/// `sec*G != key`.
pub fn generate_signature<R: RngCore + CryptoRng>(
    rng: &mut R,
    prefix: &[u8],
    key: &PublicKey,
    sec: &SecretKey,
) -> CryptoResult<Signature> {
    let x = secret_scalar(sec)?;
    let derived = encode_point(&(ED25519_BASEPOINT_TABLE * &x));
    if !constant_time_compare(&derived, key.as_bytes()) {
        return Err(CryptoError::IncorrectPublicKey);
    }

    loop {
        let mut k = random_scalar(rng);
        let commitment = encode_point(&(ED25519_BASEPOINT_TABLE * &k));
        let c = challenge(prefix, key, &commitment);
        if c == Scalar::ZERO {
            trace!("signature challenge is zero, retrying");
            k.zeroize();
            continue;
        }
        let r = k - c * x;
        k.zeroize();
        if r == Scalar::ZERO {
            trace!("signature response is zero, retrying");
            continue;
        }
        return Ok(Signature {
            c: c.to_bytes(),
            r: r.to_bytes(),
        });
    }
}

/// Verify a Schnorr signature. Never errors; malformed input is `false`.
#[must_use]
pub fn check_signature(prefix: &[u8], key: &PublicKey, sig: &Signature) -> bool {
    let Ok(point) = checked_point(key.as_bytes(), CryptoError::InvalidPublicKey) else {
        return false;
    };
    let (Some(c), Some(r)) = (canonical_scalar(&sig.c), canonical_scalar(&sig.r)) else {
        debug!(key = %key.prefix(), "signature scalar not canonical");
        return false;
    };
    if c == Scalar::ZERO {
        return false;
    }

    let recomputed = EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &point, &r);
    if recomputed.is_identity() {
        debug!(key = %key.prefix(), "signature commitment is the identity");
        return false;
    }

    let expected = challenge(prefix, key, &encode_point(&recomputed));
    let ok = expected == c;
    if !ok {
        debug!(key = %key.prefix(), "signature challenge mismatch");
    }
    ok
}
