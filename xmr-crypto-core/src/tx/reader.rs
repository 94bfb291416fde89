//! Binary transaction reader
//!
//! Walks a serialized transaction far enough to split it into the three
//! regions hashed by the transaction ID:
//!
//! - **prefix**: version, unlock time, inputs, outputs, extra
//! - **base**: RCT type, fee, pseudo-outs (Simple only), ECDH info, output
//!   commitments
//! - **prunable**: everything after the base (range proofs, ring signatures)
//!
//! Version 1 transactions carry no RCT section; the bytes after the prefix
//! are the ring signatures.

use alloc::vec::Vec;

use tracing::trace;

use crate::rct::{EcdhTuple, RctType};
use crate::tx::varint::read_varint;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::keys::{Commitment, KeyImage, PublicKey, KEY_LENGTH};

/// Input tag for coinbase (`txin_gen`)
pub const TXIN_GEN: u8 = 0xff;
/// Input tag for spends (`txin_to_key`)
pub const TXIN_TO_KEY: u8 = 0x02;
/// Output tag for plain one-time keys (`txout_to_key`)
pub const TXOUT_TO_KEY: u64 = 0x02;
/// Output tag for one-time keys with a view tag (`txout_to_tagged_key`)
pub const TXOUT_TO_TAGGED_KEY: u64 = 0x03;

/// Bounds-checked cursor over a transaction blob.
pub struct TxReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TxReader<'a> {
    /// Start reading at offset 0.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read one varint.
    ///
    /// # Errors
    /// `TruncatedTransaction` or `VarintOverflow`.
    pub fn read_varint(&mut self, field: &'static str) -> CryptoResult<u64> {
        let (value, used) = read_varint(self.bytes, self.pos, field)?;
        self.pos += used;
        Ok(value)
    }

    /// Read one varint that is used as a count or length.
    ///
    /// # Errors
    /// As [`TxReader::read_varint`], or `TruncatedTransaction` if the value
    /// does not fit in `usize`.
    pub fn read_count(&mut self, field: &'static str) -> CryptoResult<usize> {
        let offset = self.pos;
        let value = self.read_varint(field)?;
        usize::try_from(value).map_err(|_| CryptoError::TruncatedTransaction { field, offset })
    }

    /// Read a single byte.
    ///
    /// # Errors
    /// `TruncatedTransaction` at end of buffer.
    pub fn read_u8(&mut self, field: &'static str) -> CryptoResult<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(CryptoError::TruncatedTransaction {
                field,
                offset: self.pos,
            })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `len` bytes.
    ///
    /// # Errors
    /// `TruncatedTransaction` if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> CryptoResult<&'a [u8]> {
        let slice = self
            .pos
            .checked_add(len)
            .and_then(|end| self.bytes.get(self.pos..end))
            .ok_or(CryptoError::TruncatedTransaction {
                field,
                offset: self.pos,
            })?;
        self.pos += len;
        Ok(slice)
    }

    /// Borrow `count` consecutive items of `item_len` bytes.
    ///
    /// # Errors
    /// `TruncatedTransaction` if the product overflows or the buffer is short.
    pub fn read_items(
        &mut self,
        count: usize,
        item_len: usize,
        field: &'static str,
    ) -> CryptoResult<&'a [u8]> {
        let len = count
            .checked_mul(item_len)
            .ok_or(CryptoError::TruncatedTransaction {
                field,
                offset: self.pos,
            })?;
        self.read_bytes(len, field)
    }

    /// Read a 32-byte key.
    ///
    /// # Errors
    /// `TruncatedTransaction` if fewer than 32 bytes remain.
    pub fn read_key(&mut self, field: &'static str) -> CryptoResult<[u8; KEY_LENGTH]> {
        let slice = self.read_bytes(KEY_LENGTH, field)?;
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(slice);
        Ok(key)
    }
}

/// One transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxInput {
    /// Coinbase input
    Gen {
        /// Block height
        height: u64,
    },
    /// Spend of a previous output
    ToKey {
        /// Cleartext amount, zero for RingCT
        amount: u64,
        /// Ring member offsets, each relative to the previous one
        key_offsets: Vec<u64>,
        /// Key image of the real spend
        key_image: KeyImage,
    },
}

impl TxInput {
    /// Number of ring members, zero for coinbase
    #[must_use]
    pub fn ring_size(&self) -> usize {
        match self {
            TxInput::Gen { .. } => 0,
            TxInput::ToKey { key_offsets, .. } => key_offsets.len(),
        }
    }
}

/// One transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Cleartext amount, zero for RingCT
    pub amount: u64,
    /// One-time output key
    pub key: PublicKey,
    /// First byte of the view tag hash, when the output carries one
    pub view_tag: Option<u8>,
}

/// The RCT base region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RctBase {
    /// Signature type
    pub rct_type: RctType,
    /// Fee in atomic units, zero for `Null`
    pub fee: u64,
    /// Pseudo-output commitments (only present for `Simple`)
    pub pseudo_outs: Vec<Commitment>,
    /// Per-output masked amounts
    pub ecdh_info: Vec<EcdhTuple>,
    /// Per-output amount commitments
    pub out_commitments: Vec<Commitment>,
}

/// A transaction split into its hashed regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction<'a> {
    /// Transaction format version
    pub version: u64,
    /// Unlock time (block height or timestamp)
    pub unlock_time: u64,
    /// Inputs in wire order
    pub inputs: Vec<TxInput>,
    /// Outputs in wire order
    pub outputs: Vec<TxOutput>,
    /// Raw extra field
    pub extra: &'a [u8],
    /// RCT base, `None` for version 1
    pub rct: Option<RctBase>,
    /// Prefix bytes
    pub prefix: &'a [u8],
    /// Base bytes (`[0x00]` for `Null`, empty for version 1)
    pub base: &'a [u8],
    /// Everything after the base
    pub prunable: &'a [u8],
}

impl ParsedTransaction<'_> {
    /// RCT type, `None` for version 1
    #[must_use]
    pub fn rct_type(&self) -> Option<RctType> {
        self.rct.as_ref().map(|rct| rct.rct_type)
    }

    /// True for coinbase transactions
    #[must_use]
    pub fn is_coinbase(&self) -> bool {
        matches!(self.inputs.as_slice(), [TxInput::Gen { .. }])
    }
}

fn read_input(reader: &mut TxReader<'_>) -> CryptoResult<TxInput> {
    let offset = reader.position();
    let tag = reader.read_u8("input type")?;
    match tag {
        TXIN_GEN => Ok(TxInput::Gen {
            height: reader.read_varint("coinbase height")?,
        }),
        TXIN_TO_KEY => {
            let amount = reader.read_varint("input amount")?;
            let count = reader.read_count("key offset count")?;
            let mut key_offsets = Vec::new();
            for _ in 0..count {
                key_offsets.push(reader.read_varint("key offset")?);
            }
            let key_image = KeyImage(reader.read_key("key image")?);
            Ok(TxInput::ToKey {
                amount,
                key_offsets,
                key_image,
            })
        }
        other => Err(CryptoError::UnknownInputType { tag: other, offset }),
    }
}

fn read_output(reader: &mut TxReader<'_>) -> CryptoResult<TxOutput> {
    let amount = reader.read_varint("output amount")?;
    let offset = reader.position();
    let tag = reader.read_varint("output type")?;
    if tag != TXOUT_TO_KEY && tag != TXOUT_TO_TAGGED_KEY {
        return Err(CryptoError::UnknownOutputType { tag, offset });
    }
    let key = PublicKey(reader.read_key("output key")?);
    let view_tag = if tag == TXOUT_TO_TAGGED_KEY {
        Some(reader.read_u8("view tag")?)
    } else {
        None
    };
    Ok(TxOutput {
        amount,
        key,
        view_tag,
    })
}

fn read_commitments(
    reader: &mut TxReader<'_>,
    count: usize,
    field: &'static str,
) -> CryptoResult<Vec<Commitment>> {
    let raw = reader.read_items(count, KEY_LENGTH, field)?;
    Ok(raw
        .chunks_exact(KEY_LENGTH)
        .map(|chunk| {
            let mut key = [0u8; KEY_LENGTH];
            key.copy_from_slice(chunk);
            Commitment(key)
        })
        .collect())
}

fn read_ecdh_info(
    reader: &mut TxReader<'_>,
    count: usize,
    rct_type: RctType,
) -> CryptoResult<Vec<EcdhTuple>> {
    let raw = reader.read_items(count, rct_type.ecdh_entry_size(), "ecdh info")?;
    Ok(raw
        .chunks_exact(rct_type.ecdh_entry_size())
        .map(|chunk| {
            if rct_type.uses_compact_ecdh() {
                let mut amount = [0u8; 8];
                amount.copy_from_slice(chunk);
                EcdhTuple::from_compact_amount(amount)
            } else {
                let mut mask = [0u8; 32];
                let mut amount = [0u8; 32];
                mask.copy_from_slice(&chunk[..32]);
                amount.copy_from_slice(&chunk[32..]);
                EcdhTuple { mask, amount }
            }
        })
        .collect())
}

fn read_rct_base(reader: &mut TxReader<'_>, inputs: usize, outputs: usize) -> CryptoResult<RctBase> {
    let rct_type = RctType::try_from(reader.read_u8("rct type")?)?;
    if rct_type == RctType::Null {
        return Ok(RctBase {
            rct_type,
            fee: 0,
            pseudo_outs: Vec::new(),
            ecdh_info: Vec::new(),
            out_commitments: Vec::new(),
        });
    }

    let fee = reader.read_varint("fee")?;
    let pseudo_outs = if rct_type.has_base_pseudo_outs() {
        read_commitments(reader, inputs, "pseudo outputs")?
    } else {
        Vec::new()
    };
    let ecdh_info = read_ecdh_info(reader, outputs, rct_type)?;
    let out_commitments = read_commitments(reader, outputs, "output commitments")?;

    Ok(RctBase {
        rct_type,
        fee,
        pseudo_outs,
        ecdh_info,
        out_commitments,
    })
}

/// Split a serialized transaction into prefix, base and prunable regions.
///
/// # Errors
/// `TruncatedTransaction` when the blob ends early, `VarintOverflow` on a
/// malformed varint, `UnknownInputType`/`UnknownOutputType` on unsupported
/// tags and `UnknownRctType` on an unknown RCT type byte.
pub fn parse_transaction(bytes: &[u8]) -> CryptoResult<ParsedTransaction<'_>> {
    let mut reader = TxReader::new(bytes);

    let version = reader.read_varint("version")?;
    let unlock_time = reader.read_varint("unlock time")?;

    let input_count = reader.read_count("input count")?;
    let mut inputs = Vec::new();
    for _ in 0..input_count {
        inputs.push(read_input(&mut reader)?);
    }

    let output_count = reader.read_count("output count")?;
    let mut outputs = Vec::new();
    for _ in 0..output_count {
        outputs.push(read_output(&mut reader)?);
    }

    let extra_len = reader.read_count("extra length")?;
    let extra = reader.read_bytes(extra_len, "extra")?;

    let prefix_end = reader.position();
    let prefix = &bytes[..prefix_end];

    let rct = if version == 1 {
        None
    } else {
        Some(read_rct_base(&mut reader, input_count, output_count)?)
    };

    let base_end = reader.position();
    trace!(
        version,
        inputs = input_count,
        outputs = output_count,
        prefix_len = prefix_end,
        base_len = base_end - prefix_end,
        "parsed transaction regions"
    );

    Ok(ParsedTransaction {
        version,
        unlock_time,
        inputs,
        outputs,
        extra,
        rct,
        prefix,
        base: &bytes[prefix_end..base_end],
        prunable: &bytes[base_end..],
    })
}

/// Convert relative ring offsets to absolute global output indexes.
///
/// Each offset is relative to the previous member; the first is absolute.
/// Returns `None` if the running sum overflows.
#[must_use]
pub fn global_indexes_from_key_offsets(offsets: &[u64]) -> Option<Vec<u64>> {
    let mut acc = 0u64;
    offsets
        .iter()
        .map(|offset| {
            acc = acc.checked_add(*offset)?;
            Some(acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::varint::write_varint;
    use alloc::vec;

    fn coinbase_v2() -> Vec<u8> {
        let mut tx = Vec::new();
        write_varint(&mut tx, 2); // version
        write_varint(&mut tx, 60); // unlock
        tx.extend_from_slice(&[1, TXIN_GEN]);
        write_varint(&mut tx, 1000);
        tx.push(1); // outputs
        write_varint(&mut tx, 600_000_000_000);
        tx.push(0x03);
        tx.extend_from_slice(&[0x11; 32]);
        tx.push(0xab);
        tx.extend_from_slice(&[33, 0x01]);
        tx.extend_from_slice(&[0x22; 32]);
        tx.push(0x00); // rct type
        tx
    }

    #[test]
    fn test_parse_coinbase() {
        let tx = coinbase_v2();
        let parsed = parse_transaction(&tx).unwrap();
        assert_eq!(parsed.version, 2);
        assert_eq!(parsed.unlock_time, 60);
        assert!(parsed.is_coinbase());
        assert_eq!(parsed.inputs, vec![TxInput::Gen { height: 1000 }]);
        assert_eq!(parsed.outputs.len(), 1);
        assert_eq!(parsed.outputs[0].amount, 600_000_000_000);
        assert_eq!(parsed.outputs[0].key, PublicKey([0x11; 32]));
        assert_eq!(parsed.outputs[0].view_tag, Some(0xab));
        assert_eq!(parsed.extra.len(), 33);
        assert_eq!(parsed.rct_type(), Some(RctType::Null));
        assert_eq!(parsed.base, &[0x00]);
        assert!(parsed.prunable.is_empty());
        assert_eq!(parsed.prefix.len(), tx.len() - 1);
    }

    #[test]
    fn test_parse_spend_regions() {
        let mut tx = Vec::new();
        tx.extend_from_slice(&[2, 0, 1, TXIN_TO_KEY, 0, 3, 10, 5, 7]);
        tx.extend_from_slice(&[0x33; 32]);
        tx.extend_from_slice(&[2]);
        for key in [0x44u8, 0x55] {
            tx.push(0);
            tx.push(0x02);
            tx.extend_from_slice(&[key; 32]);
        }
        tx.push(0); // extra length
        let prefix_len = tx.len();
        tx.push(RctType::Clsag as u8);
        write_varint(&mut tx, 30_000_000);
        tx.extend_from_slice(&[0x66; 16]); // two compact ecdh amounts
        tx.extend_from_slice(&[0x77; 64]); // two commitments
        let base_len = tx.len() - prefix_len;
        tx.extend_from_slice(&[0x88; 100]);

        let parsed = parse_transaction(&tx).unwrap();
        assert_eq!(parsed.prefix.len(), prefix_len);
        assert_eq!(parsed.base.len(), base_len);
        assert_eq!(parsed.prunable, &[0x88; 100][..]);

        let rct = parsed.rct.as_ref().unwrap();
        assert_eq!(rct.fee, 30_000_000);
        assert!(rct.pseudo_outs.is_empty());
        assert_eq!(rct.ecdh_info.len(), 2);
        assert_eq!(rct.ecdh_info[1].amount[..8], [0x66; 8]);
        assert_eq!(rct.out_commitments, vec![Commitment([0x77; 32]); 2]);

        match &parsed.inputs[0] {
            TxInput::ToKey {
                key_offsets,
                key_image,
                ..
            } => {
                assert_eq!(key_offsets, &vec![10, 5, 7]);
                assert_eq!(key_image, &KeyImage([0x33; 32]));
            }
            TxInput::Gen { .. } => panic!("expected a spend"),
        }
        assert_eq!(parsed.inputs[0].ring_size(), 3);
        assert!(!parsed.is_coinbase());
    }

    #[test]
    fn test_version_one_has_no_base() {
        let mut tx = vec![1, 0, 1, TXIN_GEN, 5, 0, 0];
        let prefix_len = tx.len();
        tx.extend_from_slice(&[0x99; 10]);
        let parsed = parse_transaction(&tx).unwrap();
        assert_eq!(parsed.rct, None);
        assert_eq!(parsed.prefix.len(), prefix_len);
        assert!(parsed.base.is_empty());
        assert_eq!(parsed.prunable.len(), 10);
    }

    #[test]
    fn test_truncated_reports_field() {
        let tx = coinbase_v2();
        let err = parse_transaction(&tx[..10]).unwrap_err();
        assert!(matches!(err, CryptoError::TruncatedTransaction { .. }));
        assert_eq!(
            parse_transaction(&[]).unwrap_err(),
            CryptoError::TruncatedTransaction {
                field: "version",
                offset: 0
            }
        );
    }

    #[test]
    fn test_unknown_input_tag() {
        let err = parse_transaction(&[2, 0, 1, 0x01]).unwrap_err();
        assert_eq!(err, CryptoError::UnknownInputType { tag: 1, offset: 3 });
    }

    #[test]
    fn test_unknown_output_tag() {
        let err = parse_transaction(&[2, 0, 0, 1, 0, 0x07]).unwrap_err();
        assert_eq!(err, CryptoError::UnknownOutputType { tag: 7, offset: 5 });
    }

    #[test]
    fn test_unknown_rct_type() {
        let err = parse_transaction(&[2, 0, 0, 0, 0, 9]).unwrap_err();
        assert_eq!(err, CryptoError::UnknownRctType(9));
    }

    #[test]
    fn test_huge_counts_do_not_allocate() {
        // Claims u64::MAX inputs with nothing behind it
        let mut tx = vec![2, 0];
        write_varint(&mut tx, u64::MAX);
        assert!(parse_transaction(&tx).is_err());
    }

    #[test]
    fn test_global_indexes() {
        assert_eq!(
            global_indexes_from_key_offsets(&[100, 5, 20]),
            Some(vec![100, 105, 125])
        );
        assert_eq!(global_indexes_from_key_offsets(&[]), Some(vec![]));
        assert_eq!(global_indexes_from_key_offsets(&[u64::MAX, 1]), None);
    }
}
