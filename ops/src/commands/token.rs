// ops/src/commands/token.rs

use crate::bindings::IMintable;
use crate::cli::{DeployArgs, TokenInteractArgs};
use crate::deploy::{deploy_contract, load_artifact};
use crate::diagnostics;
use crate::state::AppState;
use crate::token::TokenHandle;
use crate::transaction::{describe_receipt, send_and_confirm};
use crate::verify::verify_deployment;
use ethers::types::TransactionReceipt;
use eyre::Result;
use tracing::warn;

pub const TOKEN_CONTRACT: &str = "TokenX";

pub async fn deploy(state: &AppState, args: &DeployArgs) -> Result<()> {
    let artifact = load_artifact(&state.config.artifacts_dir, TOKEN_CONTRACT, args.bytecode.as_deref(), "")?;
    let deployment = deploy_contract(state.client.clone(), &artifact, Vec::new(), None).await?;
    println!("{} deployed to: {:?}", TOKEN_CONTRACT, deployment.address);
    if !args.no_verify {
        verify_deployment(&state.config, state.chain, &artifact, &deployment).await;
    }
    Ok(())
}

/// Balance check, transfer, balances, mint, final balance.
pub async fn interact(state: &AppState, args: &TokenInteractArgs) -> Result<()> {
    let wait = state.config.confirmation_timeout;
    let owner = state.signer_address();
    let token_address = args.token.unwrap_or(state.config.addresses.token_x);
    let recipient = args.recipient.unwrap_or(state.config.addresses.recipient);
    println!("Interacting using account: {:?}", owner);

    let token = TokenHandle::resolve(token_address, state.client.clone()).await?;

    println!("\nInitial balances:");
    println!("Owner balance: {} {}", token.balance_of(owner).await?, token.symbol);

    let transfer_amount = token.parse(&args.transfer)?;
    println!("\nTransferring {} tokens to: {:?}", token.amount(transfer_amount), recipient);
    let receipt = send_and_confirm("transfer", token.contract.transfer(recipient, transfer_amount), wait).await?;
    println!("Transfer completed! {}", describe_receipt(&receipt));

    println!("\nBalances after transfer:");
    println!("Owner balance: {} {}", token.balance_of(owner).await?, token.symbol);
    println!("Recipient balance: {} {}", token.balance_of(recipient).await?, token.symbol);

    let mint_to = if args.mint_to_self { owner } else { recipient };
    let mint_amount = token.parse(&args.mint)?;
    println!("\nMinting {} new tokens to {:?}", token.amount(mint_amount), mint_to);
    let mintable = IMintable::new(token_address, state.client.clone());
    // Only the token owner may mint; a refusal ends the run without failing it.
    let result = send_and_confirm("mint", mintable.mint(mint_to, mint_amount), wait).await;
    match classify_mint(result) {
        MintOutcome::Minted(receipt) => {
            println!("Minted {} new tokens! {}", token.amount(mint_amount), describe_receipt(&receipt));
            println!("\nFinal balances:");
            println!("Mint recipient balance: {} {}", token.balance_of(mint_to).await?, token.symbol);
        }
        MintOutcome::Rejected(why) => println!("\nError: mint failed: {}", why),
    }
    Ok(())
}

#[derive(Debug)]
pub enum MintOutcome {
    Minted(TransactionReceipt),
    /// Refused by the token, with the revert reason when one was recovered.
    Rejected(String),
}

/// Any mint failure becomes [`MintOutcome::Rejected`].
pub fn classify_mint(result: Result<TransactionReceipt>) -> MintOutcome {
    match result {
        Ok(receipt) => MintOutcome::Minted(receipt),
        Err(e) => {
            let diag = diagnostics::collect(&e);
            warn!(error = %diag.message, reason = ?diag.reason, "Mint rejected");
            MintOutcome::Rejected(diag.reason.unwrap_or(diag.message))
        }
    }
}

// END OF FILE: ops/src/commands/token.rs
