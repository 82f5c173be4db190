// ops/src/token.rs

use crate::bindings::IERC20;
use crate::utils::{parse_amount, TokenAmount};
use ethers::{providers::Middleware, types::{Address, U256}};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::{instrument, warn};

pub const UNKNOWN_SYMBOL: &str = "?";

/// An ERC-20 contract handle with its symbol and declared decimals resolved.
#[derive(Debug, Clone)]
pub struct TokenHandle<M> {
    pub contract: IERC20<M>,
    pub symbol: String,
    pub decimals: u32,
}

impl<M: Middleware + 'static> TokenHandle<M> {
    pub fn new(contract: IERC20<M>, symbol: impl Into<String>, decimals: u32) -> Self {
        Self { contract, symbol: symbol.into(), decimals }
    }

    /// Binds `address` and reads `symbol()` / `decimals()` from the contract.
    /// A missing symbol only warns; decimals are required to format amounts.
    #[instrument(skip(client), level = "debug")]
    pub async fn resolve(address: Address, client: Arc<M>) -> Result<Self> {
        let contract = IERC20::new(address, client);
        let symbol = match contract.symbol().call().await {
            Ok(s) => s,
            Err(e) => {
                warn!(token = ?address, error = %e, "Could not fetch token symbol");
                UNKNOWN_SYMBOL.to_string()
            }
        };
        let decimals = contract
            .decimals()
            .call()
            .await
            .wrap_err_with(|| format!("Failed to read decimals() of token {:?}", address))?;
        Ok(Self::new(contract, symbol, u32::from(decimals)))
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn amount(&self, raw: U256) -> TokenAmount {
        TokenAmount::new(raw, self.decimals)
    }

    pub fn parse(&self, amount: &str) -> Result<U256> {
        parse_amount(amount, self.decimals)
    }

    pub async fn balance_of(&self, owner: Address) -> Result<TokenAmount> {
        let raw = self
            .contract
            .balance_of(owner)
            .call()
            .await
            .wrap_err_with(|| format!("Failed to read {} balance of {:?}", self.symbol, owner))?;
        Ok(self.amount(raw))
    }
}

// END OF FILE: ops/src/token.rs
