// ops/src/commands/mod.rs
//! One handler per subcommand. Handlers print their progress to stdout and
//! return any failure to `main`, which reports it and exits non-zero.

pub mod amm;
pub mod network;
pub mod oracle;
pub mod strategy;
pub mod token;

use crate::cli::{AmmCommand, Commands, OracleCommand, StrategyCommand, TokenCommand};
use crate::state::AppState;
use eyre::Result;
use tracing::info;

pub async fn dispatch(state: &AppState, command: &Commands) -> Result<()> {
    info!(?command, network = %state.network_name(), "Running command");
    match command {
        Commands::Network => network::run(state).await,
        Commands::Token(cmd) => match cmd {
            TokenCommand::Deploy(args) => token::deploy(state, args).await,
            TokenCommand::Interact(args) => token::interact(state, args).await,
        },
        Commands::Amm(cmd) => match cmd {
            AmmCommand::Deploy(args) => amm::deploy(state, args).await,
            AmmCommand::AddLiquidity(args) => amm::add_liquidity(state, args).await,
            AmmCommand::Swap(args) => amm::swap(state, args).await,
        },
        Commands::Strategy(cmd) => match cmd {
            StrategyCommand::Deploy(args) => strategy::deploy(state, args).await,
            StrategyCommand::Run(args) => strategy::run(state, args).await,
            StrategyCommand::Inspect(args) => strategy::inspect(state, args).await,
        },
        Commands::Oracle(cmd) => match cmd {
            OracleCommand::Deploy(args) => oracle::deploy(state, args).await,
            OracleCommand::Price(args) => oracle::price(state, args).await,
        },
    }
}

// END OF FILE: ops/src/commands/mod.rs
