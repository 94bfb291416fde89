//! Key image generation for ring signatures.
//!
//! Key images prevent double-spending. Each output can only be spent once,
//! and the key image links spends without revealing which ring member was
//! spent.
//!
//! ```text
//! KI = x * Hp(P)
//! ```
//! Where `Hp` is [`hash_to_ec`](crate::point::hash_to_ec).
//!
//! ## Key Image with Output Derivation
//!
//! For a received output the spend key includes the derivation:
//! ```text
//! x = Hs(8*a*R || idx) + b
//! KI = x * Hp(P)
//! ```

use tracing::debug;

use crate::keys::derive::{
    derive_secret_key, generate_key_derivation, secret_scalar, secret_to_public,
};
use crate::point::{encode_point, hash_to_ec};
use crate::types::errors::CryptoResult;
use crate::types::keys::{KeyImage, PublicKey, SecretKey};

/// Result of key image computation for a received output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputKeyImage {
    /// The key image `x * Hp(P)`
    pub key_image: KeyImage,
    /// The one-time output public key `P = x*G`
    pub output_key: PublicKey,
}

/// Compute the key image `sec * Hp(key)`.
///
/// `key` is hashed as raw bytes and is not validated as a point.
///
/// # Errors
/// `InvalidSecretKey` if `sec` is not canonical.
pub fn generate_key_image(key: &PublicKey, sec: &SecretKey) -> CryptoResult<KeyImage> {
    let scalar = secret_scalar(sec)?;
    let hp = hash_to_ec(key.as_bytes())?;
    Ok(KeyImage(encode_point(&(scalar * hp))))
}

/// Compute the key image of output `output_index` of a transaction.
///
/// # Arguments
/// * `tx_pubkey` - The transaction public key R
/// * `view_secret` - Recipient's private view key a
/// * `spend_secret` - Recipient's private spend key b
/// * `output_index` - Index of the output in the transaction
///
/// # Returns
/// The key image together with the derived one-time public key, which the
/// caller should compare against the output's on-chain key.
pub fn compute_output_key_image(
    tx_pubkey: &PublicKey,
    view_secret: &SecretKey,
    spend_secret: &SecretKey,
    output_index: u64,
) -> CryptoResult<OutputKeyImage> {
    let derivation = generate_key_derivation(tx_pubkey, view_secret)?;
    let output_secret = derive_secret_key(&derivation, output_index, spend_secret)?;
    let output_key = secret_to_public(&output_secret)?;
    let key_image = generate_key_image(&output_key, &output_secret)?;

    debug!(
        ki_prefix = %key_image.prefix(),
        output_key = %output_key.prefix(),
        output_index,
        "computed output key image"
    );

    Ok(OutputKeyImage {
        key_image,
        output_key,
    })
}
