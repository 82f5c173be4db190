// ops/src/amm.rs
//! Constant-product (x * y = k) quote math for the project's AMM pool, which
//! charges a 0.3% fee on the input side. Used to size swaps before they are
//! submitted; the pool contract itself remains the source of truth.

use crate::bindings::ConstantProductPool;
use ethers::{providers::Middleware, types::{Address, U256}};
use eyre::{Result, WrapErr};
use thiserror::Error;
use tracing::{debug, instrument};

pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("pool has an empty reserve")]
    EmptyReserves,
    #[error("insufficient liquidity: wanted {desired} out of a reserve of {available}")]
    InsufficientLiquidity { desired: U256, available: U256 },
    #[error("arithmetic overflow while quoting")]
    Overflow,
}

/// Pool balances at a point in time, in pool order (A, B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reserves {
    pub reserve_a: U256,
    pub reserve_b: U256,
}

impl Reserves {
    pub fn new(reserve_a: U256, reserve_b: U256) -> Self {
        Self { reserve_a, reserve_b }
    }

    /// Input amount of A needed to receive exactly `amount_b_out` of B.
    pub fn quote_a_for_exact_b(&self, amount_b_out: U256) -> Result<U256, QuoteError> {
        amount_in_for_exact_out(amount_b_out, self.reserve_a, self.reserve_b)
    }

    /// Output amount of B received for `amount_a_in` of A.
    pub fn quote_b_for_exact_a(&self, amount_a_in: U256) -> Result<U256, QuoteError> {
        amount_out_for_exact_in(amount_a_in, self.reserve_a, self.reserve_b)
    }
}

/// Input required so that the pool pays out at least `amount_out`.
///
/// `amount_out * 1000 * reserve_in / ((reserve_out - amount_out) * 997) + 1`.
/// The trailing `+ 1` absorbs the floor of the integer division.
pub fn amount_in_for_exact_out(amount_out: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, QuoteError> {
    if amount_out.is_zero() {
        return Err(QuoteError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::EmptyReserves);
    }
    if amount_out >= reserve_out {
        return Err(QuoteError::InsufficientLiquidity { desired: amount_out, available: reserve_out });
    }
    let numerator = amount_out
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|v| v.checked_mul(reserve_in))
        .ok_or(QuoteError::Overflow)?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(U256::from(FEE_NUMERATOR))
        .ok_or(QuoteError::Overflow)?;
    Ok(numerator / denominator + U256::one())
}

/// Output the pool pays for `amount_in`.
pub fn amount_out_for_exact_in(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, QuoteError> {
    if amount_in.is_zero() {
        return Err(QuoteError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(QuoteError::EmptyReserves);
    }
    let amount_in_with_fee = amount_in.checked_mul(U256::from(FEE_NUMERATOR)).ok_or(QuoteError::Overflow)?;
    let numerator = amount_in_with_fee.checked_mul(reserve_out).ok_or(QuoteError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|v| v.checked_add(amount_in_with_fee))
        .ok_or(QuoteError::Overflow)?;
    Ok(numerator / denominator)
}

/// Reads the current reserves of `pool`.
#[instrument(skip(pool), level = "debug", fields(pool = %pool.address()))]
pub async fn fetch_reserves<M: Middleware + 'static>(pool: &ConstantProductPool<M>) -> Result<Reserves> {
    let (reserve_a, reserve_b) = pool
        .get_reserves()
        .call()
        .await
        .wrap_err_with(|| format!("Failed to read reserves of pool {:?}", pool.address()))?;
    debug!(%reserve_a, %reserve_b, "Reserves fetched");
    Ok(Reserves::new(reserve_a, reserve_b))
}

/// Reads the (token A, token B) pair configured on `pool`.
pub async fn fetch_token_pair<M: Middleware + 'static>(pool: &ConstantProductPool<M>) -> Result<(Address, Address)> {
    pool.get_token_addresses()
        .call()
        .await
        .wrap_err_with(|| format!("Failed to read token addresses of pool {:?}", pool.address()))
}

// END OF FILE: ops/src/amm.rs
