//! Point codec and hash-to-curve
//!
//! - [`codec`]: strict compressed-point decoding and `key_check`
//! - [`hash_to_point`]: `ge_fromfe_frombytes_vartime` and `hash_to_ec`

pub mod codec;
pub mod hash_to_point;

pub use codec::{decode_point, encode_point, key_check};
pub(crate) use codec::checked_point;
pub use hash_to_point::{hash_to_ec, hash_to_point};
