//! Key generation and output key derivation
//!
//! ## Output Keys
//!
//! A sender with tx secret `r` and a recipient with view key `a` share
//! ```text
//! D = 8·r·A = 8·a·R
//! ```
//! Output `i` then uses the one-time key
//! ```text
//! P = Hs(D || varint(i))·G + B        (public)
//! x = Hs(D || varint(i)) + b          (secret, only the recipient)
//! ```

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::Zeroize;

use crate::hash::{fast_hash, fast_hash_parts, hash_parts_to_scalar};
use crate::point::{checked_point, encode_point};
use crate::scalar::{canonical_scalar, random_scalar};
use crate::tx::varint::encode_varint;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::keys::{KeyDerivation, KeyPair, PublicKey, SecretKey};

// =============================================================================
// Helpers
// =============================================================================

/// Decode a secret key that must be canonical.
pub(crate) fn secret_scalar(sec: &SecretKey) -> CryptoResult<Scalar> {
    canonical_scalar(sec.as_bytes()).ok_or(CryptoError::InvalidSecretKey)
}

/// Decode a public key that must pass `key_check`.
pub(crate) fn public_point(key: &PublicKey) -> CryptoResult<EdwardsPoint> {
    checked_point(key.as_bytes(), CryptoError::InvalidPublicKey)
}

fn public_from_scalar(scalar: &Scalar) -> PublicKey {
    PublicKey(encode_point(&(ED25519_BASEPOINT_TABLE * scalar)))
}

/// Constant-time comparison of two 32-byte arrays
///
/// Returns true if arrays are equal, false otherwise.
/// Takes the same time regardless of where differences occur.
#[inline]
#[must_use]
pub fn constant_time_compare(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// =============================================================================
// Key Generation
// =============================================================================

/// `sec·G`.
///
/// # Errors
/// `InvalidSecretKey` if `sec` is not canonical.
pub fn secret_to_public(sec: &SecretKey) -> CryptoResult<PublicKey> {
    let scalar = secret_scalar(sec)?;
    Ok(public_from_scalar(&scalar))
}

/// Fresh key pair from a uniform non-zero scalar.
pub fn generate_keys<R: RngCore + CryptoRng>(rng: &mut R) -> KeyPair {
    let mut scalar = random_scalar(rng);
    let pair = KeyPair {
        public: public_from_scalar(&scalar),
        secret: SecretKey(scalar.to_bytes()),
    };
    scalar.zeroize();
    pair
}

/// Deterministic key pair: the secret is `seed mod ℓ`.
///
/// This is how a spend key is recovered from a 25-word mnemonic seed.
#[must_use]
pub fn generate_keys_from_seed(seed: &[u8; 32]) -> KeyPair {
    let mut scalar = Scalar::from_bytes_mod_order(*seed);
    let pair = KeyPair {
        public: public_from_scalar(&scalar),
        secret: SecretKey(scalar.to_bytes()),
    };
    scalar.zeroize();
    pair
}

/// Deterministic wallet view key: `Keccak(spend_secret) mod ℓ`.
#[must_use]
pub fn derive_view_key(spend: &SecretKey) -> KeyPair {
    let mut digest = fast_hash(spend.as_bytes());
    let pair = generate_keys_from_seed(&digest);
    digest.zeroize();
    pair
}

// =============================================================================
// Derivations
// =============================================================================

/// Shared derivation `8·(sec·key)`.
///
/// # Errors
/// `InvalidSecretKey` if `sec` is not canonical, `InvalidPublicKey` if `key`
/// fails `key_check`. The secret is checked first.
pub fn generate_key_derivation(key: &PublicKey, sec: &SecretKey) -> CryptoResult<KeyDerivation> {
    let scalar = secret_scalar(sec)?;
    let point = public_point(key)?;
    Ok(KeyDerivation(encode_point(&(scalar * point).mul_by_cofactor())))
}

/// `Hs(derivation || varint(output_index))`.
#[must_use]
pub fn derivation_to_scalar(derivation: &KeyDerivation, output_index: u64) -> Scalar {
    hash_parts_to_scalar(&[derivation.as_bytes(), &encode_varint(output_index)])
}

/// One-time output public key `Hs(D || i)·G + base`.
///
/// # Errors
/// `InvalidPublicKey` if `base` fails `key_check`.
pub fn derive_public_key(
    derivation: &KeyDerivation,
    output_index: u64,
    base: &PublicKey,
) -> CryptoResult<PublicKey> {
    let base_point = public_point(base)?;
    let scalar = derivation_to_scalar(derivation, output_index);
    Ok(PublicKey(encode_point(
        &(ED25519_BASEPOINT_TABLE * &scalar + base_point),
    )))
}

/// One-time output secret key `Hs(D || i) + base`.
///
/// # Errors
/// `InvalidSecretKey` if `base` is not canonical.
pub fn derive_secret_key(
    derivation: &KeyDerivation,
    output_index: u64,
    base: &SecretKey,
) -> CryptoResult<SecretKey> {
    let base_scalar = secret_scalar(base)?;
    let scalar = derivation_to_scalar(derivation, output_index);
    Ok(SecretKey((base_scalar + scalar).to_bytes()))
}

/// View tag: first byte of `Keccak("view_tag" || D || varint(i))`.
///
/// Lets a scanner discard most outputs after one hash instead of a point
/// multiplication.
#[must_use]
pub fn derive_view_tag(derivation: &KeyDerivation, output_index: u64) -> u8 {
    let tag = fast_hash_parts(&[b"view_tag", derivation.as_bytes(), &encode_varint(output_index)])[0];
    trace!(derivation = %derivation.prefix(), output_index, tag, "derived view tag");
    tag
}
