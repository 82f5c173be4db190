// ops/src/commands/amm.rs

use crate::amm::{fetch_reserves, fetch_token_pair, Reserves};
use crate::bindings::{ConstantProductPool, IWrappedNative};
use crate::cli::{AddLiquidityArgs, AmmDeployArgs, SwapArgs};
use crate::deploy::{deploy_contract, load_artifact};
use crate::state::{AppState, OpsClient};
use crate::token::TokenHandle;
use crate::transaction::{describe_receipt, send_and_confirm};
use crate::utils::format_ether;
use crate::verify::verify_deployment;
use ethers::{abi::Token, providers::Middleware, types::{Address, U256}};
use eyre::{bail, Result, WrapErr};
use tracing::{info, warn};

pub const POOL_CONTRACT: &str = "Uniswap";
const POOL_CONSTRUCTOR: &str = "constructor(address tokenA, address tokenB)";
const ADD_LIQUIDITY_GAS: u64 = 500_000;
const SWAP_GAS: u64 = 300_000;

fn print_reserves(title: &str, reserves: &Reserves, token_a: &TokenHandle<OpsClient>, token_b: &TokenHandle<OpsClient>) {
    println!("\n{}:", title);
    println!("{}: {}", token_a.symbol, token_a.amount(reserves.reserve_a));
    println!("{}: {}", token_b.symbol, token_b.amount(reserves.reserve_b));
}

async fn pool_tokens(
    state: &AppState,
    pool: &ConstantProductPool<OpsClient>,
) -> Result<(TokenHandle<OpsClient>, TokenHandle<OpsClient>)> {
    let (token_a, token_b) = fetch_token_pair(pool).await?;
    let token_a = TokenHandle::resolve(token_a, state.client.clone()).await?;
    let token_b = TokenHandle::resolve(token_b, state.client.clone()).await?;
    Ok((token_a, token_b))
}

pub async fn deploy(state: &AppState, args: &AmmDeployArgs) -> Result<()> {
    let token_a = args.token_a.unwrap_or(state.config.addresses.amm_token_a);
    let token_b = args.token_b.unwrap_or(state.config.addresses.amm_token_b);
    println!("Deploying {} pool with:", POOL_CONTRACT);
    println!("Token A: {:?}", token_a);
    println!("Token B: {:?}", token_b);

    let artifact = load_artifact(
        &state.config.artifacts_dir,
        POOL_CONTRACT,
        args.deploy.bytecode.as_deref(),
        POOL_CONSTRUCTOR,
    )?;
    let deployment = deploy_contract(
        state.client.clone(),
        &artifact,
        vec![Token::Address(token_a), Token::Address(token_b)],
        None,
    )
    .await?;
    println!("{} deployed to: {:?}", POOL_CONTRACT, deployment.address);

    if !args.deploy.no_verify {
        verify_deployment(&state.config, state.chain, &artifact, &deployment).await;
    }

    println!("\nVerifying token addresses...");
    let pool = ConstantProductPool::new(deployment.address, state.client.clone());
    let (stored_a, stored_b) = fetch_token_pair(&pool).await?;
    println!("Token A: {:?}", stored_a);
    println!("Token B: {:?}", stored_b);
    if stored_a == token_a && stored_b == token_b {
        println!("Token addresses verified correctly!");
    } else {
        warn!(?stored_a, ?stored_b, "Pool token addresses do not match the deployment arguments");
        println!("Warning: token addresses don't match the expected values!");
    }

    println!("\nDeployment Summary:");
    println!("--------------------");
    println!("Network: {}", state.network_name());
    println!("{} Address: {:?}", POOL_CONTRACT, deployment.address);
    println!("Token A Address: {:?}", token_a);
    println!("Token B Address: {:?}", token_b);
    println!("Transaction Hash: {:?}", deployment.tx_hash);
    Ok(())
}

pub async fn add_liquidity(state: &AppState, args: &AddLiquidityArgs) -> Result<()> {
    let wait = state.config.confirmation_timeout;
    let owner = state.signer_address();
    let pool_address = args.pool.unwrap_or(state.config.addresses.amm_pool);
    println!("Adding liquidity with account: {:?}", owner);
    println!("Pool: {:?}", pool_address);

    let pool = ConstantProductPool::new(pool_address, state.client.clone());
    let (token_a, token_b) = pool_tokens(state, &pool).await?;

    let reserves = fetch_reserves(&pool).await?;
    print_reserves("Current pool reserves", &reserves, &token_a, &token_b);

    let balance_a = token_a.balance_of(owner).await?;
    let balance_b = token_b.balance_of(owner).await?;
    println!("\nYour balances:");
    println!("{}: {}", token_a.symbol, balance_a);
    println!("{}: {}", token_b.symbol, balance_b);

    let amount_a = token_a.parse(&args.amount_a)?;
    let amount_b = token_b.parse(&args.amount_b)?;
    println!("\nAdding liquidity:");
    println!("{}: {}", token_a.symbol, token_a.amount(amount_a));
    println!("{}: {}", token_b.symbol, token_b.amount(amount_b));

    if balance_a.raw < amount_a {
        bail!("Insufficient {} balance. Have: {}, Need: {}", token_a.symbol, balance_a, token_a.amount(amount_a));
    }
    if balance_b.raw < amount_b {
        bail!("Insufficient {} balance. Have: {}, Need: {}", token_b.symbol, balance_b, token_b.amount(amount_b));
    }

    println!("\nApproving tokens...");
    send_and_confirm("approve token A", token_a.contract.approve(pool_address, amount_a), wait).await?;
    println!("{} approved", token_a.symbol);
    send_and_confirm("approve token B", token_b.contract.approve(pool_address, amount_b), wait).await?;
    println!("{} approved", token_b.symbol);

    println!("\nAdding liquidity...");
    let call = pool.add_initial_liquidity(amount_a, amount_b).gas(ADD_LIQUIDITY_GAS);
    let receipt = send_and_confirm("addInitialLiquidity", call, wait).await?;
    println!("Liquidity added successfully! {}", describe_receipt(&receipt));

    let reserves = fetch_reserves(&pool).await?;
    print_reserves("New pool reserves", &reserves, &token_a, &token_b);
    Ok(())
}

/// Buys exactly `amount_out` of token B, wrapping native coin into token A
/// first when the signer's token A balance falls short.
pub async fn swap(state: &AppState, args: &SwapArgs) -> Result<()> {
    let wait = state.config.confirmation_timeout;
    let owner = state.signer_address();
    let pool_address = args.pool.unwrap_or(state.config.addresses.swap_pool);
    println!("Swapping with account: {:?}", owner);

    let pool = ConstantProductPool::new(pool_address, state.client.clone());
    let (token_a, token_b) = pool_tokens(state, &pool).await?;

    let reserves = fetch_reserves(&pool).await?;
    print_reserves("Current pool reserves", &reserves, &token_a, &token_b);

    let amount_out = token_b.parse(&args.amount_out)?;
    let amount_in = reserves
        .quote_a_for_exact_b(amount_out)
        .wrap_err_with(|| format!("Cannot quote {} {}", token_b.amount(amount_out), token_b.symbol))?;
    println!("\nTo receive {} {}", token_b.amount(amount_out), token_b.symbol);
    println!("Need to spend {} {}", token_a.amount(amount_in), token_a.symbol);
    info!(%amount_in, %amount_out, "Swap quoted");

    let balance_a = token_a.balance_of(owner).await?;
    if balance_a.raw < amount_in {
        let shortfall = amount_in - balance_a.raw;
        if args.no_wrap {
            bail!(
                "Insufficient {} balance. Have: {}, Need: {}",
                token_a.symbol,
                balance_a,
                token_a.amount(amount_in)
            );
        }
        wrap_native(state, token_a.address(), shortfall).await?;
        println!("Wrapped {} native coin into {}", format_ether(shortfall), token_a.symbol);
    }

    println!("\nApproving {}...", token_a.symbol);
    send_and_confirm("approve", token_a.contract.approve(pool_address, amount_in), wait).await?;

    let before_a = token_a.balance_of(owner).await?;
    let before_b = token_b.balance_of(owner).await?;
    println!("\nBalances before swap:");
    println!("{}: {}", token_a.symbol, before_a);
    println!("{}: {}", token_b.symbol, before_b);

    println!("\nExecuting swap...");
    let receipt = send_and_confirm("swapAForB", pool.swap_a_for_b(amount_in).gas(SWAP_GAS), wait).await?;
    println!("Swap completed! {}", describe_receipt(&receipt));

    let after_a = token_a.balance_of(owner).await?;
    let after_b = token_b.balance_of(owner).await?;
    println!("\nBalances after swap:");
    println!("{}: {}", token_a.symbol, after_a);
    println!("{}: {}", token_b.symbol, after_b);

    println!("\nSwap summary:");
    println!("{} spent: {}", token_a.symbol, before_a.saturating_sub(after_a.raw));
    println!("{} received: {}", token_b.symbol, after_b.saturating_sub(before_b.raw));

    let reserves = fetch_reserves(&pool).await?;
    print_reserves("New pool reserves", &reserves, &token_a, &token_b);
    Ok(())
}

async fn wrap_native(state: &AppState, wrapped: Address, amount: U256) -> Result<()> {
    let native = state
        .client
        .get_balance(state.signer_address(), None)
        .await
        .wrap_err("Failed to fetch native balance")?;
    if native < amount {
        bail!("Insufficient native balance to wrap. Have: {}, Need: {}", format_ether(native), format_ether(amount));
    }
    println!("\nWrapping {} native coin...", format_ether(amount));
    let call = IWrappedNative::new(wrapped, state.client.clone()).deposit().value(amount);
    send_and_confirm("deposit", call, state.config.confirmation_timeout).await?;
    Ok(())
}

// END OF FILE: ops/src/commands/amm.rs
