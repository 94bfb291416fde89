//! RingCT signature types

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::errors::CryptoError;

/// RingCT signature type, the first byte of the RCT base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum RctType {
    /// No RingCT (coinbase or pre-RingCT)
    Null = 0,
    /// Full Borromean signature
    Full = 1,
    /// Simple Borromean signature
    Simple = 2,
    /// Bulletproof with 64-byte ECDH entries
    Bulletproof = 3,
    /// Bulletproof with compact 8-byte ECDH amounts
    Bulletproof2 = 4,
    /// CLSAG ring signatures
    Clsag = 5,
    /// CLSAG with Bulletproofs+
    BulletproofPlus = 6,
}

impl RctType {
    /// True for types whose ECDH info is an 8-byte XOR-masked amount with a
    /// deterministic commitment mask
    #[must_use]
    pub const fn uses_compact_ecdh(&self) -> bool {
        matches!(
            self,
            RctType::Bulletproof2 | RctType::Clsag | RctType::BulletproofPlus
        )
    }

    /// Bytes per output in the serialized `ecdhInfo`
    #[must_use]
    pub const fn ecdh_entry_size(&self) -> usize {
        if self.uses_compact_ecdh() {
            8
        } else {
            64
        }
    }

    /// True when pseudo-output commitments live in the base region
    #[must_use]
    pub const fn has_base_pseudo_outs(&self) -> bool {
        matches!(self, RctType::Simple)
    }
}

impl TryFrom<u8> for RctType {
    type Error = CryptoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RctType::Null),
            1 => Ok(RctType::Full),
            2 => Ok(RctType::Simple),
            3 => Ok(RctType::Bulletproof),
            4 => Ok(RctType::Bulletproof2),
            5 => Ok(RctType::Clsag),
            6 => Ok(RctType::BulletproofPlus),
            other => Err(CryptoError::UnknownRctType(other)),
        }
    }
}

impl From<RctType> for u8 {
    fn from(value: RctType) -> Self {
        value as u8
    }
}

impl fmt::Display for RctType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RctType::Null => write!(f, "Null"),
            RctType::Full => write!(f, "Full"),
            RctType::Simple => write!(f, "Simple"),
            RctType::Bulletproof => write!(f, "Bulletproof"),
            RctType::Bulletproof2 => write!(f, "Bulletproof2"),
            RctType::Clsag => write!(f, "CLSAG"),
            RctType::BulletproofPlus => write!(f, "BulletproofPlus"),
        }
    }
}
