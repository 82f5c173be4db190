// ops/src/strategy.rs
//! Read-side view of a deployed arbitrage strategy: its parameters, its
//! cached per-pool market prices, its trade statistics and the events an
//! execution emits.

use crate::bindings::{
    ArbitrageStrategy, ArbitrageStrategyEvents, OpportunityFoundFilter, StrategyParametersUpdatedFilter,
    TradeExecutedFilter, TradeFailedFilter,
};
use crate::utils::TokenAmount;
use chrono::{DateTime, SecondsFormat};
use ethers::{
    abi::RawLog,
    contract::EthLogDecode,
    providers::Middleware,
    types::{Log, U256},
};
use eyre::{Result, WrapErr};
use std::fmt;
use tracing::{debug, instrument};

/// Parameters are stored in basis points: 100 bps = 1%.
pub const BPS_PER_PERCENT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyParams {
    pub profit_threshold_bps: U256,
    pub max_slippage_bps: U256,
    pub max_trade_size: U256,
    pub cooldown_period: U256,
    pub last_execution_time: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyStats {
    pub total_trades: U256,
    pub profitable_trades: U256,
    pub total_profit: U256,
    pub total_loss: U256,
}

/// A pool price snapshot cached by the strategy. A zero timestamp means the
/// strategy has not observed the pool yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketPrice {
    pub timestamp: U256,
    pub price: U256,
    pub liquidity: U256,
}

impl MarketPrice {
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_zero()
    }

    /// UTC timestamp in ISO-8601 with milliseconds (`2024-05-01T12:00:00.000Z`).
    pub fn iso_timestamp(&self) -> Option<String> {
        if self.is_empty() || self.timestamp > U256::from(i64::MAX as u64) {
            return None;
        }
        DateTime::from_timestamp(self.timestamp.as_u64() as i64, 0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl fmt::Display for MarketPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.iso_timestamp() {
            Some(ts) => write!(f, "{{ timestamp: {}, price: {}, liquidity: {} }}", ts, self.price, self.liquidity),
            None => f.write_str("No price data available"),
        }
    }
}

/// Formats a basis-point value as a percentage ("150 bps (1.50%)").
pub fn format_bps(bps: U256) -> String {
    let whole = bps / U256::from(BPS_PER_PERCENT);
    let frac = bps % U256::from(BPS_PER_PERCENT);
    format!("{} bps ({}.{:02}%)", bps, whole, frac.as_u64())
}

#[instrument(skip(strategy), level = "debug", fields(strategy = ?strategy.address()))]
pub async fn fetch_params<M: Middleware + 'static>(strategy: &ArbitrageStrategy<M>) -> Result<StrategyParams> {
    let params = StrategyParams {
        profit_threshold_bps: strategy.profit_threshold().call().await.wrap_err("Failed to read profitThreshold()")?,
        max_slippage_bps: strategy.max_slippage().call().await.wrap_err("Failed to read maxSlippage()")?,
        max_trade_size: strategy.max_trade_size().call().await.wrap_err("Failed to read maxTradeSize()")?,
        cooldown_period: strategy.cooldown_period().call().await.wrap_err("Failed to read cooldownPeriod()")?,
        last_execution_time: strategy
            .last_execution_time()
            .call()
            .await
            .wrap_err("Failed to read lastExecutionTime()")?,
    };
    debug!(?params, "Strategy parameters fetched");
    Ok(params)
}

pub async fn fetch_stats<M: Middleware + 'static>(strategy: &ArbitrageStrategy<M>) -> Result<StrategyStats> {
    let (total_trades, profitable_trades, total_profit, total_loss) =
        strategy.stats().call().await.wrap_err("Failed to read stats()")?;
    Ok(StrategyStats { total_trades, profitable_trades, total_profit, total_loss })
}

/// Cached market prices for (pool 1, pool 2).
pub async fn fetch_market_prices<M: Middleware + 'static>(
    strategy: &ArbitrageStrategy<M>,
) -> Result<(MarketPrice, MarketPrice)> {
    let (timestamp, price, liquidity) =
        strategy.pool_1_market_price().call().await.wrap_err("Failed to read pool1MarketPrice()")?;
    let first = MarketPrice { timestamp, price, liquidity };
    let (timestamp, price, liquidity) =
        strategy.pool_2_market_price().call().await.wrap_err("Failed to read pool2MarketPrice()")?;
    let second = MarketPrice { timestamp, price, liquidity };
    Ok((first, second))
}

/// Decodes the strategy events in `logs`, skipping anything else.
pub fn decode_events(logs: &[Log]) -> Vec<ArbitrageStrategyEvents> {
    logs.iter()
        .filter_map(|log| ArbitrageStrategyEvents::decode_log(&RawLog::from(log.clone())).ok())
        .collect()
}

/// Event name plus its fields, one per line. Token-denominated fields are
/// formatted with `decimals`.
pub fn describe_event(event: &ArbitrageStrategyEvents, decimals: u32) -> String {
    let amount = |raw: U256| TokenAmount::new(raw, decimals).to_string();
    match event {
        ArbitrageStrategyEvents::OpportunityFoundFilter(OpportunityFoundFilter {
            first_pool_price,
            second_pool_price,
            profit_percent,
        }) => format!(
            "Event: OpportunityFound\nfirstPoolPrice: {}\nsecondPoolPrice: {}\nprofitPercent: {}",
            first_pool_price, second_pool_price, profit_percent
        ),
        ArbitrageStrategyEvents::TradeFailedFilter(TradeFailedFilter { reason }) => {
            format!("Event: TradeFailed\nreason: {}", reason)
        }
        ArbitrageStrategyEvents::TradeExecutedFilter(TradeExecutedFilter { profit, timestamp }) => {
            format!("Event: TradeExecuted\nprofit: {}\ntimestamp: {}", amount(*profit), timestamp)
        }
        ArbitrageStrategyEvents::StrategyParametersUpdatedFilter(StrategyParametersUpdatedFilter {
            profit_threshold,
            max_slippage,
            max_trade_size,
        }) => format!(
            "Event: StrategyParametersUpdated\nprofitThreshold: {}\nmaxSlippage: {}\nmaxTradeSize: {}",
            format_bps(*profit_threshold),
            format_bps(*max_slippage),
            amount(*max_trade_size)
        ),
    }
}

// END OF FILE: ops/src/strategy.rs
