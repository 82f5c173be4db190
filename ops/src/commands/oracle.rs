// ops/src/commands/oracle.rs

use crate::addresses::pyth_address;
use crate::bindings::PythPriceOracle;
use crate::cli::{OracleDeployArgs, OraclePriceArgs};
use crate::deploy::{deploy_contract, load_artifact};
use crate::state::AppState;
use crate::verify::verify_deployment;
use ethers::{abi::Token, types::Address};
use eyre::{eyre, Result, WrapErr};
use tracing::warn;

pub const ORACLE_CONTRACT: &str = "PythPriceOracle";
const ORACLE_CONSTRUCTOR: &str = "constructor(address pyth)";

/// Flag, then `PYTH_ADDRESS`, then the built-in table for the connected chain.
fn resolve_pyth(state: &AppState, flag: Option<Address>) -> Result<Address> {
    flag.or(state.config.addresses.pyth)
        .or_else(|| state.chain.and_then(pyth_address))
        .ok_or_else(|| eyre!("No Pyth address configured for network: {}", state.network_name()))
}

pub async fn deploy(state: &AppState, args: &OracleDeployArgs) -> Result<()> {
    let pyth = resolve_pyth(state, args.pyth)?;
    println!("\nDeployment Started...");
    println!("Network: {}", state.network_name());
    println!("Pyth Address: {:?}", pyth);

    let artifact = load_artifact(
        &state.config.artifacts_dir,
        ORACLE_CONTRACT,
        args.deploy.bytecode.as_deref(),
        ORACLE_CONSTRUCTOR,
    )?;
    let deployment = deploy_contract(state.client.clone(), &artifact, vec![Token::Address(pyth)], None).await?;
    println!("\n{} deployed to: {:?}", ORACLE_CONTRACT, deployment.address);

    if !args.deploy.no_verify {
        verify_deployment(&state.config, state.chain, &artifact, &deployment).await;
    }

    println!("\nFetching initial price...");
    let oracle = PythPriceOracle::new(deployment.address, state.client.clone());
    match oracle.get_human_readable_price().call().await {
        Ok(price) => println!("Current BTC/USD Price: {}", price),
        Err(e) => {
            warn!(error = %e, "Initial price read failed");
            println!("Note: Price needs to be updated first using updatePriceFeeds()");
        }
    }

    println!("\nDeployment completed successfully!");
    Ok(())
}

pub async fn price(state: &AppState, args: &OraclePriceArgs) -> Result<()> {
    let address = args
        .oracle
        .or(state.config.addresses.oracle)
        .ok_or_else(|| eyre!("No oracle address given: pass --oracle or set ORACLE_ADDRESS"))?;
    let oracle = PythPriceOracle::new(address, state.client.clone());
    let price = oracle
        .get_human_readable_price()
        .call()
        .await
        .wrap_err("Failed to read price (it may need an updatePriceFeeds() first)")?;
    println!("Current BTC/USD Price: {}", price);
    Ok(())
}

// END OF FILE: ops/src/commands/oracle.rs
