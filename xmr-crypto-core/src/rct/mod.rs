//! RingCT amount handling
//!
//! - [`types`]: RCT signature types
//! - [`ecdh`]: amount/mask masking, both encodings
//! - [`commitment`]: Pedersen commitments and the H generator
//! - [`decode`]: receiver-side amount recovery with commitment check

pub mod commitment;
pub mod decode;
pub mod ecdh;
pub mod types;

pub use commitment::{commit, pedersen_commitment, zero_commit, H, H_BYTES};
pub use decode::{decode_rct, le_bytes_to_decimal, DecodedAmount};
pub use ecdh::{ecdh_decode, ecdh_encode, gen_commitment_mask, EcdhTuple};
pub use types::RctType;
