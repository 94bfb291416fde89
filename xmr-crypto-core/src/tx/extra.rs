//! Transaction `extra` field parsing
//!
//! The extra field is a sequence of tagged entries. Parsing is lenient: it
//! stops at the first unknown tag, at a repeated tag, or at an entry that
//! runs past the end of the buffer, keeping whatever was read before that.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tx::varint::read_varint;
use crate::types::keys::{PublicKey, KEY_LENGTH};
use crate::types::transaction::{ENCRYPTED_PAYMENT_ID_LENGTH, PAYMENT_ID_LENGTH};

/// Zero padding
pub const TX_EXTRA_TAG_PADDING: u8 = 0x00;
/// Transaction public key `R`
pub const TX_EXTRA_TAG_PUBKEY: u8 = 0x01;
/// Free-form nonce, usually a payment ID
pub const TX_EXTRA_NONCE: u8 = 0x02;
/// Merge mining commitment
pub const TX_EXTRA_MERGE_MINING_TAG: u8 = 0x03;
/// Per-output public keys for subaddress destinations
pub const TX_EXTRA_TAG_ADDITIONAL_PUBKEYS: u8 = 0x04;
/// MinerGate pool tag
pub const TX_EXTRA_MYSTERIOUS_MINERGATE_TAG: u8 = 0xde;

/// Nonce prefix for a cleartext 32-byte payment ID
pub const TX_EXTRA_NONCE_PAYMENT_ID: u8 = 0x00;
/// Nonce prefix for an encrypted 8-byte payment ID
pub const TX_EXTRA_NONCE_ENCRYPTED_PAYMENT_ID: u8 = 0x01;

/// Padding is at most this many bytes, tag included
pub const TX_EXTRA_PADDING_MAX_COUNT: usize = 255;

/// Fields recovered from a transaction's extra
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxExtra {
    /// Transaction public key `R`
    pub tx_pub_key: Option<PublicKey>,
    /// Encrypted short payment ID
    pub encrypted_payment_id: Option<[u8; ENCRYPTED_PAYMENT_ID_LENGTH]>,
    /// Legacy cleartext payment ID
    pub payment_id: Option<[u8; PAYMENT_ID_LENGTH]>,
    /// Additional per-output public keys
    pub additional_pub_keys: Vec<PublicKey>,
}

impl TxExtra {
    /// True when nothing was recovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx_pub_key.is_none()
            && self.encrypted_payment_id.is_none()
            && self.payment_id.is_none()
            && self.additional_pub_keys.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Tag {
    Padding,
    PubKey,
    Nonce,
    MergeMining,
    AdditionalPubKeys,
    MinerGate,
}

impl Tag {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TX_EXTRA_TAG_PADDING => Some(Tag::Padding),
            TX_EXTRA_TAG_PUBKEY => Some(Tag::PubKey),
            TX_EXTRA_NONCE => Some(Tag::Nonce),
            TX_EXTRA_MERGE_MINING_TAG => Some(Tag::MergeMining),
            TX_EXTRA_TAG_ADDITIONAL_PUBKEYS => Some(Tag::AdditionalPubKeys),
            TX_EXTRA_MYSTERIOUS_MINERGATE_TAG => Some(Tag::MinerGate),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Read a varint length at `pos` and borrow that many bytes after it.
/// Returns the slice and the offset just past it.
fn length_prefixed(bytes: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let (len, used) = read_varint(bytes, pos, "extra length").ok()?;
    let start = pos + used;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    Some((bytes.get(start..end)?, end))
}

fn key_at(bytes: &[u8], pos: usize) -> Option<PublicKey> {
    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(bytes.get(pos..pos.checked_add(KEY_LENGTH)?)?);
    Some(PublicKey(key))
}

fn parse_nonce(nonce: &[u8], out: &mut TxExtra) {
    match nonce.split_first() {
        Some((&TX_EXTRA_NONCE_ENCRYPTED_PAYMENT_ID, id))
            if id.len() == ENCRYPTED_PAYMENT_ID_LENGTH =>
        {
            let mut pid = [0u8; ENCRYPTED_PAYMENT_ID_LENGTH];
            pid.copy_from_slice(id);
            out.encrypted_payment_id = Some(pid);
        }
        Some((&TX_EXTRA_NONCE_PAYMENT_ID, id)) if id.len() == PAYMENT_ID_LENGTH => {
            let mut pid = [0u8; PAYMENT_ID_LENGTH];
            pid.copy_from_slice(id);
            out.payment_id = Some(pid);
        }
        _ => trace!(len = nonce.len(), "extra nonce carries no payment id"),
    }
}

/// Parse the extra field of a transaction.
///
/// Each tag is honoured at most once; the first public key wins. Padding
/// consumes a run of zero bytes up to [`TX_EXTRA_PADDING_MAX_COUNT`] long.
#[must_use]
pub fn parse_tx_extra(bytes: &[u8]) -> TxExtra {
    let mut out = TxExtra::default();
    let mut seen = 0u8;
    let mut pos = 0usize;

    while let Some(&byte) = bytes.get(pos) {
        let Some(tag) = Tag::from_byte(byte) else {
            trace!(tag = byte, offset = pos, "unknown extra tag, stopping");
            break;
        };
        if seen & tag.bit() != 0 {
            trace!(tag = byte, offset = pos, "repeated extra tag, stopping");
            break;
        }
        seen |= tag.bit();
        pos += 1;

        match tag {
            Tag::Padding => {
                pos += bytes[pos..]
                    .iter()
                    .take(TX_EXTRA_PADDING_MAX_COUNT - 1)
                    .take_while(|b| **b == 0)
                    .count();
            }
            Tag::PubKey => {
                let Some(key) = key_at(bytes, pos) else { break };
                out.tx_pub_key = Some(key);
                pos += KEY_LENGTH;
            }
            Tag::Nonce => {
                let Some((nonce, end)) = length_prefixed(bytes, pos) else { break };
                parse_nonce(nonce, &mut out);
                pos = end;
            }
            Tag::MergeMining | Tag::MinerGate => {
                let Some((_, end)) = length_prefixed(bytes, pos) else { break };
                pos = end;
            }
            Tag::AdditionalPubKeys => {
                let Ok((count, used)) = read_varint(bytes, pos, "additional pubkey count") else {
                    break;
                };
                let start = pos + used;
                let Some(end) = usize::try_from(count)
                    .ok()
                    .and_then(|n| n.checked_mul(KEY_LENGTH))
                    .and_then(|len| start.checked_add(len))
                    .filter(|end| *end <= bytes.len())
                else {
                    break;
                };
                out.additional_pub_keys = bytes[start..end]
                    .chunks_exact(KEY_LENGTH)
                    .map(|chunk| {
                        let mut key = [0u8; KEY_LENGTH];
                        key.copy_from_slice(chunk);
                        PublicKey(key)
                    })
                    .collect();
                pos = end;
            }
        }
    }

    out
}
