// ops/src/cli.rs

use clap::{Args, Parser, Subcommand};
use ethers::types::Address;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chainops", author, version, about = "Deploy and drive the token / AMM / strategy / oracle contracts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the connected network and the signer's native balance
    Network,

    /// ERC-20 token deployment and transfers
    #[command(subcommand)]
    Token(TokenCommand),

    /// Constant-product AMM deployment, liquidity and swaps
    #[command(subcommand)]
    Amm(AmmCommand),

    /// Arbitrage strategy deployment and execution
    #[command(subcommand)]
    Strategy(StrategyCommand),

    /// Pyth price oracle consumer
    #[command(subcommand)]
    Oracle(OracleCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeployArgs {
    /// Raw hex bytecode file to deploy instead of the Hardhat artifact
    #[arg(long, value_name = "PATH")]
    pub bytecode: Option<PathBuf>,

    /// Skip block-explorer verification
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Deploy the TokenX ERC-20
    Deploy(DeployArgs),

    /// Check balances, transfer to a recipient, then mint
    Interact(TokenInteractArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TokenInteractArgs {
    /// Token address (defaults to TOKEN_X_ADDRESS)
    #[arg(long)]
    pub token: Option<Address>,

    /// Transfer recipient (defaults to RECIPIENT_ADDRESS)
    #[arg(long)]
    pub recipient: Option<Address>,

    /// Amount to transfer, in whole tokens
    #[arg(long, default_value = "1000")]
    pub transfer: String,

    /// Amount to mint, in whole tokens
    #[arg(long, default_value = "5000")]
    pub mint: String,

    /// Mint to the signer instead of the recipient
    #[arg(long)]
    pub mint_to_self: bool,
}

#[derive(Subcommand, Debug)]
pub enum AmmCommand {
    /// Deploy the pool for a token pair and verify it
    Deploy(AmmDeployArgs),

    /// Approve both tokens and seed the pool
    AddLiquidity(AddLiquidityArgs),

    /// Buy an exact amount of token B with token A
    Swap(SwapArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AmmDeployArgs {
    /// Token A (defaults to AMM_TOKEN_A)
    #[arg(long)]
    pub token_a: Option<Address>,

    /// Token B (defaults to AMM_TOKEN_B)
    #[arg(long)]
    pub token_b: Option<Address>,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AddLiquidityArgs {
    /// Pool address (defaults to AMM_ADDRESS)
    #[arg(long)]
    pub pool: Option<Address>,

    /// Token A amount, in whole tokens
    #[arg(long, default_value = "1000")]
    pub amount_a: String,

    /// Token B amount, in whole tokens
    #[arg(long, default_value = "10000")]
    pub amount_b: String,
}

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
    /// Pool address (defaults to SWAP_POOL_ADDRESS)
    #[arg(long)]
    pub pool: Option<Address>,

    /// Exact amount of token B to receive, in whole tokens
    #[arg(long, default_value = "50")]
    pub amount_out: String,

    /// Fail instead of wrapping native coin when token A balance is short
    #[arg(long)]
    pub no_wrap: bool,
}

#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// Check tokens and pools, deploy the strategy and verify it
    Deploy(StrategyDeployArgs),

    /// Fund the strategy if needed, execute it and print its stats
    Run(StrategyRunArgs),

    /// Read-only health check of a deployed strategy
    Inspect(StrategyInspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StrategyDeployArgs {
    #[arg(long)]
    pub token_a: Option<Address>,

    #[arg(long)]
    pub token_b: Option<Address>,

    #[arg(long)]
    pub pool1: Option<Address>,

    #[arg(long)]
    pub pool2: Option<Address>,

    #[arg(long)]
    pub price_feed: Option<Address>,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

#[derive(Args, Debug, Clone)]
pub struct StrategyRunArgs {
    /// Strategy address (defaults to STRATEGY_ADDRESS)
    #[arg(long)]
    pub strategy: Option<Address>,

    /// Minimum balance of each token the strategy should hold, in whole tokens
    #[arg(long, default_value = "1000")]
    pub fund_amount: String,
}

#[derive(Args, Debug, Clone)]
pub struct StrategyInspectArgs {
    /// Strategy address (defaults to STRATEGY_ADDRESS)
    #[arg(long)]
    pub strategy: Option<Address>,
}

#[derive(Subcommand, Debug)]
pub enum OracleCommand {
    /// Deploy the oracle against this chain's Pyth contract
    Deploy(OracleDeployArgs),

    /// Read the current human-readable price
    Price(OraclePriceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OracleDeployArgs {
    /// Pyth contract (defaults to PYTH_ADDRESS, then the per-chain table)
    #[arg(long)]
    pub pyth: Option<Address>,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OraclePriceArgs {
    /// Oracle address (defaults to ORACLE_ADDRESS)
    #[arg(long)]
    pub oracle: Option<Address>,
}

// END OF FILE: ops/src/cli.rs
