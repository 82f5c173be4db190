// ops/src/verify.rs
//! Explorer source verification. Always best-effort: every failure is logged
//! and reported back as a [`VerifyOutcome`], never as an error.

use crate::artifact::ContractArtifact;
use crate::config::Config;
use crate::deploy::Deployment;
use crate::diagnostics::{message_matches, ALREADY_VERIFIED};
use ethers::{
    etherscan::{verify::{CodeFormat, VerifyContract}, Client},
    types::Chain,
};
use eyre::{eyre, Result, WrapErr};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);
const STATUS_POLL_ATTEMPTS: u32 = 6;
const PENDING_MARKER: &str = "pending in queue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
    Skipped(String),
    Failed(String),
}

/// Waits for confirmations, then submits `deployment` for verification.
#[instrument(skip_all, fields(contract = %deployment.contract_name, address = ?deployment.address))]
pub async fn verify_deployment(
    config: &Config,
    chain: Option<Chain>,
    artifact: &ContractArtifact,
    deployment: &Deployment,
) -> VerifyOutcome {
    let outcome = match (config.etherscan_api_key.clone(), chain) {
        (None, _) => VerifyOutcome::Skipped("no ETHERSCAN_API_KEY configured".into()),
        (Some(_), None) => VerifyOutcome::Skipped("chain has no known block explorer".into()),
        (Some(api_key), Some(chain)) => {
            println!("\nWaiting for block confirmations...");
            sleep(config.verify_delay).await;

            println!("\nVerifying contract...");
            match submit(chain, api_key, artifact, deployment).await {
                Ok(outcome) => outcome,
                Err(e) => match message_matches(&format!("{:#}", e), ALREADY_VERIFIED) {
                    Some(_) => VerifyOutcome::AlreadyVerified,
                    None => VerifyOutcome::Failed(format!("{:#}", e)),
                },
            }
        }
    };

    match &outcome {
        VerifyOutcome::Verified => println!("Contract verified successfully!"),
        VerifyOutcome::AlreadyVerified => println!("Contract is already verified!"),
        VerifyOutcome::Skipped(why) => {
            warn!(reason = %why, "Skipping verification");
            println!("Verification skipped: {}", why);
        }
        VerifyOutcome::Failed(why) => {
            warn!(error = %why, "Verification failed");
            println!("Verification error: {}", why);
            if let Some(chain) = chain {
                print_manual_instructions(chain, artifact, deployment);
            }
        }
    }
    outcome
}

async fn submit(
    chain: Chain,
    api_key: String,
    artifact: &ContractArtifact,
    deployment: &Deployment,
) -> Result<VerifyOutcome> {
    let client = Client::new(chain, api_key).wrap_err("Failed to build explorer client")?;
    let build_info = artifact.build_info().wrap_err("Failed to locate build-info for verification")?;

    let encoded_args = deployment.encoded_constructor_args();
    let request = VerifyContract::new(
        deployment.address,
        artifact.fully_qualified_name(),
        build_info.standard_json_input(),
        build_info.compiler_version(),
    )
    .code_format(CodeFormat::StandardJsonInput)
    .constructor_arguments((!encoded_args.is_empty()).then_some(encoded_args));

    let response = client
        .submit_contract_verification(&request)
        .await
        .wrap_err("Verification submission rejected")?;
    if message_matches(&response.result, ALREADY_VERIFIED).is_some() {
        return Ok(VerifyOutcome::AlreadyVerified);
    }
    if response.status != "1" {
        return Err(eyre!("{}: {}", response.message, response.result));
    }

    let guid = response.result;
    info!(%guid, "Verification submitted, polling status");
    for _ in 0..STATUS_POLL_ATTEMPTS {
        sleep(STATUS_POLL_INTERVAL).await;
        let status = client
            .check_contract_verification_status(&guid)
            .await
            .wrap_err("Failed to query verification status")?;
        if status.result.to_lowercase().contains(PENDING_MARKER) {
            continue;
        }
        if message_matches(&status.result, ALREADY_VERIFIED).is_some() {
            return Ok(VerifyOutcome::AlreadyVerified);
        }
        if status.status == "1" {
            return Ok(VerifyOutcome::Verified);
        }
        return Err(eyre!("{}", status.result));
    }
    Ok(VerifyOutcome::Failed(format!("still pending after {} checks (guid {})", STATUS_POLL_ATTEMPTS, guid)))
}

fn explorer_url(chain: Chain) -> Option<String> {
    chain.etherscan_urls().map(|(_, browser)| browser.to_string())
}

fn print_manual_instructions(chain: Chain, artifact: &ContractArtifact, deployment: &Deployment) {
    println!("\nTo verify manually:");
    match explorer_url(chain) {
        Some(url) => println!("1. Go to: {}/address/{:?}#code", url.trim_end_matches('/'), deployment.address),
        None => println!("1. Open the block explorer for {} at {:?}", chain, deployment.address),
    }
    println!("2. Select 'Verify & Publish'");
    println!("3. Use the following parameters:");
    println!("   - Contract Name: {}", artifact.fully_qualified_name());
    let args = deployment.encoded_constructor_args();
    println!("   - Constructor Arguments: {}", if args.is_empty() { "(none)" } else { args.as_str() });
}

// END OF FILE: ops/src/verify.rs
