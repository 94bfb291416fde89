//! Key operations module
//!
//! This module provides:
//! - Key generation, secret-to-public and output key derivation
//! - Subaddress key derivation
//! - Key image generation for ring signatures

pub mod derive;
pub mod image;
pub mod subaddress;

// Re-export derivation functions
pub use derive::{
    constant_time_compare, derivation_to_scalar, derive_public_key, derive_secret_key,
    derive_view_key, derive_view_tag, generate_key_derivation, generate_keys,
    generate_keys_from_seed, secret_to_public,
};

// Re-export key image functions
pub use image::{compute_output_key_image, generate_key_image, OutputKeyImage};

// Re-export subaddress functions
pub use subaddress::{
    subaddress_keys, subaddress_secret, subaddress_spend_secret, SubaddressIndex, SubaddressKeys,
};
