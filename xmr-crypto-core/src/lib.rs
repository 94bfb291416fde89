//! # xmr-crypto-core
//!
//! Client-side CryptoNote / Monero cryptography.
//!
//! This crate provides the primitives a light wallet needs to scan, decode
//! and sign without a daemon-side wallet:
//!
//! - **Curve math**: strict point decoding and Monero's `hash_to_ec`, over
//!   `dalek-ff-group` field elements
//! - **Key derivation**: stealth output keys, view tags, subaddresses
//! - **Signatures**: Schnorr and linkable ring signatures with key images
//! - **RingCT**: ECDH amount masking (both encodings), Pedersen commitments,
//!   commitment-checked amount decoding
//! - **Transaction codec**: transaction IDs, `extra` parsing, size, weight
//!   and fee estimates
//!
//! ## Architecture
//!
//! 1. **`no_std` Compatible**: only `alloc` is required
//! 2. **Strict Decoding**: non-canonical points and scalars are rejected
//! 3. **Zeroize on Drop**: secret keys are cleared from memory
//! 4. **Type-Safe**: keys, images, derivations and commitments are distinct
//!    newtypes
//!
//! ## Modules
//!
//! - [`types`]: key newtypes and error types
//! - [`hash`]: Keccak-256 and hash-to-scalar
//! - [`scalar`]: scalar reduction, checks and sampling
//! - [`point`]: point codec and hash-to-point
//! - [`keys`]: key derivation, subaddresses and key images
//! - [`sign`]: Schnorr and ring signatures
//! - [`rct`]: RingCT amounts and commitments
//! - [`tx`]: transaction parsing, IDs and fee estimates
//! - [`config`]: fee priorities and parameters
//!
//! ## Example
//!
//! ```rust
//! use xmr_crypto_core::prelude::*;
//! use rand_core::OsRng;
//!
//! let wallet = generate_keys(&mut OsRng);
//! let tx_key = generate_keys(&mut OsRng);
//!
//! // Sender and receiver agree on the derivation
//! let sender = generate_key_derivation(&wallet.public, &tx_key.secret)?;
//! let receiver = generate_key_derivation(&tx_key.public, &wallet.secret)?;
//! assert_eq!(sender, receiver);
//!
//! let output_key = derive_public_key(&sender, 0, &wallet.public)?;
//! let output_secret = derive_secret_key(&receiver, 0, &wallet.secret)?;
//! assert_eq!(secret_to_public(&output_secret)?, output_key);
//! # Ok::<(), CryptoError>(())
//! ```
//!
//! ## Security Considerations
//!
//! This crate handles cryptographic secrets. Users should:
//!
//! - Never log or serialize secret keys
//! - Treat the deterministic RNG hooks as test-only

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(non_snake_case)]

extern crate alloc;

pub mod config;
pub mod hash;
pub mod keys;
pub mod point;
pub mod rct;
pub mod scalar;
pub mod sign;
pub mod tx;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{FeeParams, FeePriority};
    pub use crate::hash::{fast_hash, hash_to_scalar};
    pub use crate::keys::*;
    pub use crate::point::{decode_point, encode_point, hash_to_ec, hash_to_point, key_check};
    pub use crate::rct::*;
    pub use crate::scalar::{random_scalar, reduce, scalar_check};
    pub use crate::sign::*;
    pub use crate::tx::*;
    pub use crate::types::errors::*;
    pub use crate::types::*;
}

/// Re-export commonly used types at crate root
pub use types::errors::{CryptoError, CryptoResult};

// Re-export key types
pub use types::keys::{
    Commitment, KeyDerivation, KeyImage, KeyPair, PublicKey, RingSignature, SecretKey, Signature,
};
pub use types::transaction::TxHash;

// Re-export fee configuration
pub use config::{FeeParams, FeePriority};

// Re-export key derivation
pub use keys::{
    derivation_to_scalar, derive_public_key, derive_secret_key, derive_view_tag,
    generate_key_derivation, generate_key_image, generate_keys, secret_to_public,
};

// Re-export signatures
pub use sign::{
    check_ring_signature, check_signature, generate_ring_signature, generate_signature, Signer,
};

// Re-export RingCT
pub use rct::{decode_rct, ecdh_decode, ecdh_encode, zero_commit, DecodedAmount, RctType};

// Re-export transaction codec
pub use tx::{estimate_fee, get_tx_id, get_tx_id_from_hex, parse_tx_extra, TxExtra, TxShape};
