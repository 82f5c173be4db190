// ops/src/addresses.rs
// Deployed contract addresses the operator scripts target by default.
// Every entry can be overridden through the environment (see config.rs).

use ethers::types::{Address, Chain};
use lazy_static::lazy_static;
use std::collections::HashMap;

// Tokens
pub const TOKEN_X: &str = "0x6aFfCBF27435C6Ad9326d1baD60E14eC373deEC2";
pub const TOKEN_RECIPIENT: &str = "0x09B7b2b2a7C398a3Be0700213ba2B9b247aF68Df";

// AMM deployment / liquidity (BTC / USDT on Sepolia)
pub const AMM_TOKEN_A: &str = "0x5a71e67147a3ea5ee9A491773Bf6001915475ff4";
pub const AMM_TOKEN_B: &str = "0x487B596960548292A67D2f2a872B45C131ccE2f8";
pub const AMM_POOL: &str = "0x86B21bEe7fF5a5bB3264Ae9fABbf436ba47D8E04";

// WPOL / USDT pool used by the swap command
pub const SWAP_POOL: &str = "0xd2875Df6EB0B0672cA977ac64A2b4A1C04EF1a4a";

// Arbitrage strategy
pub const STRATEGY_TOKEN_A: &str = "0x487B596960548292A67D2f2a872B45C131ccE2f8";
pub const STRATEGY_TOKEN_B: &str = "0x5a71e67147a3ea5ee9A491773Bf6001915475ff4";
pub const STRATEGY_POOL_1: &str = "0xbD2a3F7DF4333E4A3DF02Af985d437D533E60539";
pub const STRATEGY_POOL_2: &str = "0x86B21bEe7fF5a5bB3264Ae9fABbf436ba47D8E04";
pub const STRATEGY_PRICE_FEED: &str = "0x1b44F3514812d835EB1BDB0acB33d3fA3351Ee43";
pub const STRATEGY: &str = "0x49Fc851A04Ea73FF35822cd11e71FBD5cFE815B4";

lazy_static! {
    /// Pyth entrypoint contract per chain.
    pub static ref PYTH_ADDRESSES: HashMap<Chain, Address> = {
        let mut m = HashMap::new();
        m.insert(Chain::Mainnet, parse_static("0x4305FB66699C3B2702D4d05CF36551390A4c69C6"));
        m.insert(Chain::Sepolia, parse_static("0x2880aB155794e7179c9eE2e38200202908C17B43"));
        m
    };
}

fn parse_static(addr: &str) -> Address {
    addr.parse().unwrap_or_else(|_| panic!("invalid built-in address {addr}"))
}

/// Pyth contract for `chain`, if one is known.
pub fn pyth_address(chain: Chain) -> Option<Address> {
    PYTH_ADDRESSES.get(&chain).copied()
}

// END OF FILE: ops/src/addresses.rs
