//! Transaction codec
//!
//! - [`varint`]: LEB128 varints
//! - [`reader`]: split a blob into prefix, base and prunable regions
//! - [`id`]: transaction IDs
//! - [`extra`]: lenient `extra` field parsing
//! - [`estimate`]: size, weight and fee estimates

pub mod estimate;
pub mod extra;
pub mod id;
pub mod reader;
pub mod varint;

pub use estimate::{
    calculate_fee_from_weight, estimate_fee, estimate_tx_size, estimate_tx_weight, TxShape,
};
pub use extra::{parse_tx_extra, TxExtra};
pub use id::{get_tx_id, get_tx_id_from_hex, get_tx_prefix_hash, tx_id_from_parsed};
pub use reader::{
    global_indexes_from_key_offsets, parse_transaction, ParsedTransaction, RctBase, TxInput,
    TxOutput, TxReader,
};
pub use varint::{encode_varint, read_varint, write_varint};
