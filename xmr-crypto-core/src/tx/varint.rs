//! Unsigned LEB128 varints as used throughout the Monero wire format

use alloc::vec::Vec;

use crate::types::errors::{CryptoError, CryptoResult};

/// Append the varint encoding of `n` to `out`.
pub fn write_varint(out: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Encode `n` as a varint.
///
/// # Example
/// ```
/// use xmr_crypto_core::tx::varint::encode_varint;
/// assert_eq!(encode_varint(300), vec![0xac, 0x02]);
/// ```
#[must_use]
pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(10);
    write_varint(&mut result, n);
    result
}

/// Decode a varint starting at `offset`.
///
/// Returns the value and the number of bytes consumed. `field` names what is
/// being read for the truncation error.
///
/// # Errors
/// `TruncatedTransaction` if the buffer ends mid-varint, `VarintOverflow` if
/// the value needs more than 64 bits.
pub fn read_varint(bytes: &[u8], offset: usize, field: &'static str) -> CryptoResult<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut pos = offset;
    loop {
        let byte = *bytes
            .get(pos)
            .ok_or(CryptoError::TruncatedTransaction { field, offset })?;
        let low = u64::from(byte & 0x7f);
        if shift > 63 || (shift == 63 && low > 1) {
            return Err(CryptoError::VarintOverflow { offset });
        }
        result |= low << shift;
        pos += 1;
        if byte & 0x80 == 0 {
            return Ok((result, pos - offset));
        }
        shift += 7;
    }
}
