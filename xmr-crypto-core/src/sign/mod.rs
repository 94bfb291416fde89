//! Signature engine
//!
//! - [`schnorr`]: single-key Schnorr signatures
//! - [`ring`]: linkable ring signatures
//!
//! Signing consumes randomness. The free functions take an explicit RNG;
//! [`Signer`] binds one at construction so call sites stay short and tests
//! can swap in a deterministic source.

pub mod ring;
pub mod schnorr;

pub use ring::{check_ring_signature, generate_ring_signature};
pub use schnorr::{check_signature, generate_signature};

use curve25519_dalek::Scalar;
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::keys::derive::generate_keys;
use crate::scalar::random_scalar;
use crate::types::errors::CryptoResult;
use crate::types::keys::{KeyImage, KeyPair, PublicKey, RingSignature, SecretKey, Signature};

/// Signing context owning its entropy source
#[derive(Debug, Clone)]
pub struct Signer<R> {
    rng: R,
}

impl Default for Signer<OsRng> {
    fn default() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> Signer<R> {
    /// Bind `rng` as the entropy source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give back the RNG
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Uniform non-zero scalar
    pub fn random_scalar(&mut self) -> Scalar {
        random_scalar(&mut self.rng)
    }

    /// Fresh key pair
    pub fn generate_keys(&mut self) -> KeyPair {
        generate_keys(&mut self.rng)
    }

    /// See [`schnorr::generate_signature`]
    pub fn generate_signature(
        &mut self,
        prefix: &[u8],
        key: &PublicKey,
        sec: &SecretKey,
    ) -> CryptoResult<Signature> {
        generate_signature(&mut self.rng, prefix, key, sec)
    }

    /// See [`ring::generate_ring_signature`]
    pub fn generate_ring_signature(
        &mut self,
        prefix: &[u8],
        image: &KeyImage,
        keys: &[PublicKey],
        sec: &SecretKey,
        sec_index: usize,
    ) -> CryptoResult<RingSignature> {
        generate_ring_signature(&mut self.rng, prefix, image, keys, sec, sec_index)
    }
}
