// ops/src/commands/strategy.rs

use crate::amm::{fetch_reserves, fetch_token_pair};
use crate::bindings::{ArbitrageStrategy, ConstantProductPool, IOwnable};
use crate::cli::{StrategyDeployArgs, StrategyInspectArgs, StrategyRunArgs};
use crate::deploy::{deploy_contract, load_artifact};
use crate::diagnostics::{benign_match, STRATEGY_BENIGN_REASONS};
use crate::state::{AppState, OpsClient};
use crate::strategy::{
    decode_events, describe_event, fetch_market_prices, fetch_params, fetch_stats, format_bps, StrategyParams,
    StrategyStats,
};
use crate::token::TokenHandle;
use crate::transaction::send_and_confirm;
use crate::verify::verify_deployment;
use ethers::{
    abi::Token,
    providers::Middleware,
    types::{Address, TransactionReceipt},
};
use eyre::{bail, Result, WrapErr};
use std::fmt;
use tracing::{info, warn};

pub const STRATEGY_CONTRACT: &str = "ArbitrageStrategy";
const STRATEGY_CONSTRUCTOR: &str =
    "constructor(address tokenA, address tokenB, address uniswapPool1, address uniswapPool2, address priceFeed)";
const DEPLOY_GAS: u64 = 5_000_000;
const EXECUTE_GAS: u64 = 1_000_000;

/// Logs the pool's token pair. Any failure is only a warning.
async fn check_pool(state: &AppState, pool: Address, token_a: Address, token_b: Address) -> bool {
    let contract = ConstantProductPool::new(pool, state.client.clone());
    match fetch_token_pair(&contract).await {
        Ok((a, b)) => {
            println!("Pool {:?} tokens: {{ tokenA: {:?}, tokenB: {:?} }}", pool, a, b);
            let same_pair = (a == token_a && b == token_b) || (a == token_b && b == token_a);
            if !same_pair {
                warn!(?pool, "Pool does not trade the configured token pair");
            }
            true
        }
        Err(e) => {
            println!("Failed to verify pool {:?}: {:#}", pool, e);
            false
        }
    }
}

pub async fn deploy(state: &AppState, args: &StrategyDeployArgs) -> Result<()> {
    let book = &state.config.addresses;
    let token_a = args.token_a.unwrap_or(book.strategy_token_a);
    let token_b = args.token_b.unwrap_or(book.strategy_token_b);
    let pool1 = args.pool1.unwrap_or(book.strategy_pool_1);
    let pool2 = args.pool2.unwrap_or(book.strategy_pool_2);
    let price_feed = args.price_feed.unwrap_or(book.price_feed);
    println!("Starting deployment of {}...", STRATEGY_CONTRACT);

    println!("\nVerifying tokens...");
    for (label, address) in [("Token A", token_a), ("Token B", token_b)] {
        match TokenHandle::resolve(address, state.client.clone()).await {
            Ok(token) => println!("{} Symbol: {}", label, token.symbol),
            Err(e) => println!("Warning: Could not fetch token symbols: {:#}", e),
        }
    }

    println!("\nVerifying pools...");
    let pool1_ok = check_pool(state, pool1, token_a, token_b).await;
    let pool2_ok = check_pool(state, pool2, token_a, token_b).await;
    if !pool1_ok || !pool2_ok {
        println!("Warning: Pool verification failed. Proceeding anyway...");
    }

    let artifact = load_artifact(
        &state.config.artifacts_dir,
        STRATEGY_CONTRACT,
        args.deploy.bytecode.as_deref(),
        STRATEGY_CONSTRUCTOR,
    )?;
    println!("\nDeploying contract...");
    let constructor_args = [token_a, token_b, pool1, pool2, price_feed].into_iter().map(Token::Address).collect();
    let deployment = deploy_contract(state.client.clone(), &artifact, constructor_args, Some(DEPLOY_GAS)).await?;
    println!("{} deployed to: {:?}", STRATEGY_CONTRACT, deployment.address);

    if !args.deploy.no_verify {
        verify_deployment(&state.config, state.chain, &artifact, &deployment).await;
    }

    let strategy = ArbitrageStrategy::new(deployment.address, state.client.clone());
    match (strategy.token_a().call().await, strategy.token_b().call().await) {
        (Ok(a), Ok(b)) => {
            println!("\nContract state verification:");
            println!("Configured Token A: {:?}", a);
            println!("Configured Token B: {:?}", b);
        }
        (Err(e), _) | (_, Err(e)) => println!("Warning: Could not verify contract state: {}", e),
    }

    println!("\nDeployment Summary:");
    println!("===================");
    println!("Network: {}", state.network_name());
    println!("{}: {:?}", STRATEGY_CONTRACT, deployment.address);
    println!("Token A: {:?}", token_a);
    println!("Token B: {:?}", token_b);
    println!("Uniswap Pool 1: {:?}", pool1);
    println!("Uniswap Pool 2: {:?}", pool2);
    println!("Price Feed: {:?}", price_feed);
    Ok(())
}

fn print_params(params: &StrategyParams, token_a: &TokenHandle<OpsClient>) {
    println!("Profit Threshold: {}", format_bps(params.profit_threshold_bps));
    println!("Max Slippage: {}", format_bps(params.max_slippage_bps));
    println!("Max Trade Size: {} {}", token_a.amount(params.max_trade_size), token_a.symbol);
}

fn print_stats(stats: &StrategyStats, token_a: &TokenHandle<OpsClient>) {
    println!("\nStrategy Statistics:");
    println!("Total Trades: {}", stats.total_trades);
    println!("Profitable Trades: {}", stats.profitable_trades);
    println!("Total Profit: {}", token_a.amount(stats.total_profit));
    println!("Total Loss: {}", token_a.amount(stats.total_loss));
}

async fn strategy_tokens(
    state: &AppState,
    strategy: &ArbitrageStrategy<OpsClient>,
) -> Result<(TokenHandle<OpsClient>, TokenHandle<OpsClient>)> {
    let token_a = strategy.token_a().call().await.wrap_err("Failed to read tokenA()")?;
    let token_b = strategy.token_b().call().await.wrap_err("Failed to read tokenB()")?;
    Ok((
        TokenHandle::resolve(token_a, state.client.clone()).await?,
        TokenHandle::resolve(token_b, state.client.clone()).await?,
    ))
}

/// Tops the strategy up to `required` of `token` when it holds less.
async fn fund_if_short(state: &AppState, strategy: Address, token: &TokenHandle<OpsClient>, required: &str) -> Result<()> {
    let required = token.parse(required)?;
    let balance = token.balance_of(strategy).await?;
    if balance.raw >= required {
        return Ok(());
    }
    println!("\nFunding strategy with {} {}...", token.amount(required), token.symbol);
    let call = token.contract.transfer(strategy, required);
    send_and_confirm("fund strategy", call, state.config.confirmation_timeout).await?;
    println!("{} transferred to strategy", token.symbol);
    Ok(())
}

/// Funds, executes and reports. A revert for one of the strategy's
/// "nothing to do" reasons is reported and the command still succeeds.
pub async fn run(state: &AppState, args: &StrategyRunArgs) -> Result<()> {
    let address = args.strategy.unwrap_or(state.config.addresses.strategy);
    println!("Testing with account: {:?}", state.signer_address());
    let strategy = ArbitrageStrategy::new(address, state.client.clone());
    let (token_a, token_b) = strategy_tokens(state, &strategy).await?;

    println!("\nChecking strategy parameters...");
    let params = fetch_params(&strategy).await?;
    print_params(&params, &token_a);

    let pool1 = strategy.uniswap_pool_1().call().await.wrap_err("Failed to read uniswapPool1()")?;
    let pool2 = strategy.uniswap_pool_2().call().await.wrap_err("Failed to read uniswapPool2()")?;
    println!("\nPool addresses:");
    println!("Pool 1: {:?}", pool1);
    println!("Pool 2: {:?}", pool2);

    println!("\nChecking pool reserves...");
    for (label, pool) in [("Pool 1", pool1), ("Pool 2", pool2)] {
        let reserves = fetch_reserves(&ConstantProductPool::new(pool, state.client.clone())).await?;
        println!("{} Reserves:", label);
        println!("Token A: {}", token_a.amount(reserves.reserve_a));
        println!("Token B: {}", token_b.amount(reserves.reserve_b));
    }

    println!("\nStrategy Contract Balances:");
    println!("{}: {}", token_a.symbol, token_a.balance_of(address).await?);
    println!("{}: {}", token_b.symbol, token_b.balance_of(address).await?);

    fund_if_short(state, address, &token_a, &args.fund_amount).await?;
    fund_if_short(state, address, &token_b, &args.fund_amount).await?;

    println!("\nExecuting strategy...");
    let call = strategy.execute_strategy().gas(EXECUTE_GAS);
    let result = send_and_confirm("executeStrategy", call, state.config.confirmation_timeout).await;
    match classify_execution(result)? {
        Execution::Completed(receipt) => {
            println!(
                "Strategy execution completed in block: {}",
                receipt.block_number.map(|b| b.to_string()).unwrap_or_else(|| "-".into())
            );
            for event in decode_events(&receipt.logs) {
                println!("\n{}", describe_event(&event, token_a.decimals));
            }
        }
        Execution::Declined(reason) => println!("Strategy execution response: {}", reason),
    }

    let stats = fetch_stats(&strategy).await?;
    print_stats(&stats, &token_a);
    Ok(())
}

/// What an `executeStrategy` submission came to.
#[derive(Debug)]
pub enum Execution {
    Completed(TransactionReceipt),
    /// Reverted with one of the strategy's "nothing to do" reasons.
    Declined(&'static str),
}

/// Turns the expected "nothing to do" reverts into [`Execution::Declined`];
/// any other failure is passed through.
pub fn classify_execution(result: Result<TransactionReceipt>) -> Result<Execution> {
    match result {
        Ok(receipt) => Ok(Execution::Completed(receipt)),
        Err(e) => match benign_match(&e, STRATEGY_BENIGN_REASONS) {
            Some(reason) => {
                info!(%reason, "Strategy declined to trade");
                Ok(Execution::Declined(reason))
            }
            None => Err(e),
        },
    }
}

/// Prints `label: <shown value>` or `Failed to read label: <error>` and
/// carries on either way.
pub fn report_read<T, E: fmt::Display>(label: &str, read: Result<T, E>, show: impl FnOnce(&T) -> String) -> Option<T> {
    match read {
        Ok(value) => {
            println!("{}: {}", label, show(&value));
            Some(value)
        }
        Err(e) => {
            println!("Failed to read {}: {:#}", label, e);
            None
        }
    }
}

/// Read-only health check; never sends a transaction. Only a missing
/// contract stops it; every other unreadable value is reported and skipped.
pub async fn inspect(state: &AppState, args: &StrategyInspectArgs) -> Result<()> {
    let address = args.strategy.unwrap_or(state.config.addresses.strategy);
    let code = state.client.get_code(address, None).await.wrap_err("Failed to fetch contract code")?;
    println!("Contract code exists: {}", !code.is_empty());
    if code.is_empty() {
        bail!("No contract deployed at {:?}", address);
    }

    report_read("Contract owner", IOwnable::new(address, state.client.clone()).owner().call().await, |o| {
        format!("{:?}", o)
    });

    let strategy = ArbitrageStrategy::new(address, state.client.clone());
    println!("\nReading contract variables:");
    let mut tokens = Vec::new();
    for (label, read) in [("Token A", strategy.token_a().call().await), ("Token B", strategy.token_b().call().await)] {
        let Some(token) = report_read(label, read, |a| format!("{:?}", a)) else {
            tokens.push(None);
            continue;
        };
        let handle = TokenHandle::resolve(token, state.client.clone()).await;
        tokens.push(report_read(&format!("{} metadata", label), handle, |t| {
            format!("{} ({} decimals)", t.symbol, t.decimals)
        }));
    }
    let mut tokens = tokens.into_iter();
    let token_a = tokens.next().flatten();
    let token_b = tokens.next().flatten();

    report_read("Profit Threshold", strategy.profit_threshold().call().await, |v| format_bps(*v));
    report_read("Max Slippage", strategy.max_slippage().call().await, |v| format_bps(*v));
    report_read("Max Trade Size", strategy.max_trade_size().call().await, |v| match &token_a {
        Some(t) => format!("{} {}", t.amount(*v), t.symbol),
        None => v.to_string(),
    });
    report_read("Cooldown Period", strategy.cooldown_period().call().await, |v| format!("{} seconds", v));
    report_read("Last Execution Time", strategy.last_execution_time().call().await, |v| v.to_string());

    let signer = state.signer_address();
    println!("\nSigner balances:");
    for token in [&token_a, &token_b].into_iter().flatten() {
        report_read(&token.symbol, token.balance_of(signer).await, |b| b.to_string());
    }

    match fetch_market_prices(&strategy).await {
        Ok((first, second)) => {
            println!("\nPool 1 Market Price: {}", first);
            println!("Pool 2 Market Price: {}", second);
        }
        // Prices stay uninitialised until the first execution.
        Err(e) => println!("Error getting market prices: {:#}", e),
    }

    match (fetch_stats(&strategy).await, &token_a) {
        (Ok(stats), Some(token_a)) => print_stats(&stats, token_a),
        (Ok(stats), None) => println!("\nStrategy Statistics: {:?}", stats),
        (Err(e), _) => println!("Failed to read stats: {:#}", e),
    }
    Ok(())
}

// END OF FILE: ops/src/commands/strategy.rs
