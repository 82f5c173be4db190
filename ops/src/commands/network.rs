// ops/src/commands/network.rs

use crate::state::AppState;
use crate::utils::format_ether;
use ethers::providers::Middleware;
use eyre::{Result, WrapErr};

pub async fn run(state: &AppState) -> Result<()> {
    println!("Current network: {{ name: {}, chainId: {} }}", state.network_name(), state.chain_id);

    let signer = state.signer_address();
    let balance = state
        .client
        .get_balance(signer, None)
        .await
        .wrap_err("Failed to fetch signer balance")?;

    println!("Deploying contract with account: {:?}", signer);
    println!("Account balance: {} ETH", format_ether(balance));
    Ok(())
}

// END OF FILE: ops/src/commands/network.rs
