// ops/src/utils.rs

// --- Imports ---
use ethers::types::U256;
use ethers::utils::{format_units, parse_units};
use eyre::{eyre, Result};
use std::fmt;

pub const ETHER_DECIMALS: u32 = 18;

// --- Unit Conversion Helpers ---

/// Formats a raw base-unit amount with `decimals` fractional digits.
pub fn format_amount(value: U256, decimals: u32) -> Result<String> {
    format_units(value, decimals).map_err(|e| eyre!("Failed to format units: {}", e))
}

/// Parses a human-readable amount ("1000", "0.5") into base units.
pub fn parse_amount(amount: &str, decimals: u32) -> Result<U256> {
    let parsed = parse_units(amount.trim(), decimals)
        .map_err(|e| eyre!("Failed to parse amount {:?} with {} decimals: {}", amount, decimals, e))?;
    Ok(parsed.into())
}

pub fn format_ether(value: U256) -> String {
    format_amount(value, ETHER_DECIMALS).unwrap_or_else(|_| value.to_string())
}

/// A raw token amount tagged with the decimals of the token it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    pub raw: U256,
    pub decimals: u32,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u32) -> Self {
        Self { raw, decimals }
    }

    pub fn parse(amount: &str, decimals: u32) -> Result<Self> {
        Ok(Self::new(parse_amount(amount, decimals)?, decimals))
    }

    /// Difference `self - other`, or zero if `other` is larger.
    pub fn saturating_sub(self, other: U256) -> Self {
        Self::new(self.raw.saturating_sub(other), self.decimals)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_amount(self.raw, self.decimals) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{} (raw)", self.raw),
        }
    }
}

// END OF FILE: ops/src/utils.rs
