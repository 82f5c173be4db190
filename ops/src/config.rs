// ops/src/config.rs

use crate::addresses;
use dotenv::dotenv;
use ethers::types::Address;
use eyre::{Result, WrapErr};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_VERIFY_DELAY_SECS: u64 = 30;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct Config {
    // Network & Keys
    pub rpc_url: String,
    pub private_key: String,
    pub etherscan_api_key: Option<String>,

    // Build output & timing
    pub artifacts_dir: PathBuf,
    pub verify_delay: Duration,
    pub confirmation_timeout: Duration,

    // Contract Addresses
    pub addresses: AddressBook,
}

// Hand-written so the key never reaches a log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("etherscan_api_key", &self.etherscan_api_key.as_ref().map(|_| "<redacted>"))
            .field("artifacts_dir", &self.artifacts_dir)
            .field("verify_delay", &self.verify_delay)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .field("addresses", &self.addresses)
            .finish()
    }
}

/// Contract addresses the commands fall back to when no flag is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBook {
    pub token_x: Address,
    pub recipient: Address,
    pub amm_token_a: Address,
    pub amm_token_b: Address,
    pub amm_pool: Address,
    pub swap_pool: Address,
    pub strategy_token_a: Address,
    pub strategy_token_b: Address,
    pub strategy_pool_1: Address,
    pub strategy_pool_2: Address,
    pub price_feed: Address,
    pub strategy: Address,
    pub pyth: Option<Address>,
    pub oracle: Option<Address>,
}

pub fn load_config() -> Result<Config> {
    dotenv().ok();
    let config = config_from_env(|name| env::var(name).ok())?;
    debug!(rpc_url = %config.rpc_url, artifacts = ?config.artifacts_dir, "Configuration loaded");
    Ok(config)
}

/// Builds a [`Config`] from an arbitrary variable lookup.
pub fn config_from_env<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let required = |name: &str| -> Result<String> {
        var(name).ok_or_else(|| eyre::eyre!("{} must be set in the environment or .env", name))
    };
    let parse_u64 = |name: &str, default: u64| -> Result<u64> {
        match var(name) {
            Some(s) => s.trim().parse::<u64>().wrap_err_with(|| format!("{} is not a valid integer", name)),
            None => Ok(default),
        }
    };
    let parse_address = |name: &str, default: &str| -> Result<Address> {
        let raw = var(name).unwrap_or_else(|| default.to_string());
        raw.trim().parse::<Address>().wrap_err_with(|| format!("{} is not a valid address: {}", name, raw))
    };
    let parse_optional_address = |name: &str| -> Result<Option<Address>> {
        match var(name) {
            Some(raw) => Ok(Some(
                raw.trim().parse::<Address>().wrap_err_with(|| format!("{} is not a valid address: {}", name, raw))?,
            )),
            None => Ok(None),
        }
    };

    let addresses = AddressBook {
        token_x: parse_address("TOKEN_X_ADDRESS", addresses::TOKEN_X)?,
        recipient: parse_address("RECIPIENT_ADDRESS", addresses::TOKEN_RECIPIENT)?,
        amm_token_a: parse_address("AMM_TOKEN_A", addresses::AMM_TOKEN_A)?,
        amm_token_b: parse_address("AMM_TOKEN_B", addresses::AMM_TOKEN_B)?,
        amm_pool: parse_address("AMM_ADDRESS", addresses::AMM_POOL)?,
        swap_pool: parse_address("SWAP_POOL_ADDRESS", addresses::SWAP_POOL)?,
        strategy_token_a: parse_address("STRATEGY_TOKEN_A", addresses::STRATEGY_TOKEN_A)?,
        strategy_token_b: parse_address("STRATEGY_TOKEN_B", addresses::STRATEGY_TOKEN_B)?,
        strategy_pool_1: parse_address("POOL1_ADDRESS", addresses::STRATEGY_POOL_1)?,
        strategy_pool_2: parse_address("POOL2_ADDRESS", addresses::STRATEGY_POOL_2)?,
        price_feed: parse_address("PRICE_FEED_ADDRESS", addresses::STRATEGY_PRICE_FEED)?,
        strategy: parse_address("STRATEGY_ADDRESS", addresses::STRATEGY)?,
        pyth: parse_optional_address("PYTH_ADDRESS")?,
        oracle: parse_optional_address("ORACLE_ADDRESS")?,
    };

    Ok(Config {
        rpc_url: required("RPC_URL")?,
        private_key: required("PRIVATE_KEY")?,
        etherscan_api_key: var("ETHERSCAN_API_KEY"),
        artifacts_dir: var("ARTIFACTS_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR)),
        verify_delay: Duration::from_secs(parse_u64("VERIFY_DELAY_SECS", DEFAULT_VERIFY_DELAY_SECS)?),
        confirmation_timeout: Duration::from_secs(parse_u64(
            "TX_CONFIRMATION_TIMEOUT_SECS",
            DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        )?),
        addresses,
    })
}

// END OF FILE: ops/src/config.rs
