//! Fee configuration
//!
//! The daemon's `get_fee_estimate` supplies the per-byte base fee and the
//! quantization mask; the wallet picks a priority multiplier.

use core::fmt;
use core::str::FromStr;

use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Fee priority levels matching Monero wallet priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeePriority {
    /// 1x multiplier
    Unimportant,
    /// 4x multiplier
    #[default]
    Normal,
    /// 20x multiplier
    Elevated,
    /// 166x multiplier
    Priority,
}

impl FeePriority {
    /// Fee multiplier for this priority level, as in `wallet2`
    #[must_use]
    pub const fn multiplier(&self) -> u64 {
        match self {
            FeePriority::Unimportant => 1,
            FeePriority::Normal => 4,
            FeePriority::Elevated => 20,
            FeePriority::Priority => 166,
        }
    }
}

impl FromStr for FeePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unimportant" | "low" => Ok(FeePriority::Unimportant),
            "normal" | "default" | "medium" => Ok(FeePriority::Normal),
            "elevated" | "high" => Ok(FeePriority::Elevated),
            "priority" | "urgent" => Ok(FeePriority::Priority),
            _ => Err(format!(
                "Unknown priority: {s}. Valid: unimportant, normal, elevated, priority"
            )),
        }
    }
}

impl fmt::Display for FeePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeePriority::Unimportant => "unimportant",
            FeePriority::Normal => "normal",
            FeePriority::Elevated => "elevated",
            FeePriority::Priority => "priority",
        };
        f.write_str(name)
    }
}

/// Inputs to the fee formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeParams {
    /// Base fee per weight unit, in atomic units
    pub base_fee: u64,
    /// Priority multiplier
    #[serde(default = "default_multiplier")]
    pub fee_multiplier: u64,
    /// Fees are rounded up to a multiple of this
    pub fee_quantization: u64,
}

const fn default_multiplier() -> u64 {
    1
}

impl FeeParams {
    /// Params with a multiplier of 1.
    #[must_use]
    pub const fn new(base_fee: u64, fee_quantization: u64) -> Self {
        Self {
            base_fee,
            fee_multiplier: 1,
            fee_quantization,
        }
    }

    /// Replace the multiplier with the one for `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: FeePriority) -> Self {
        self.fee_multiplier = priority.multiplier();
        self
    }
}
