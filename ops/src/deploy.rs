// ops/src/deploy.rs

use crate::artifact::ContractArtifact;
use crate::diagnostics::rpc_revert_reason;
use crate::transaction::{check_receipt, TxEcho, TxError};
use ethers::{
    abi::{parse_abi, Abi, Token},
    prelude::{ContractFactory, Middleware, MiddlewareError},
    types::{transaction::eip2718::TypedTransaction, Address, BlockId, TxHash, U256, U64},
};
use eyre::{eyre, Result, WrapErr};
use std::{path::Path, sync::Arc};
use tracing::{error, info, instrument};

/// Outcome of a confirmed deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<U64>,
    pub gas_used: Option<U256>,
    pub constructor_args: Vec<Token>,
}

impl Deployment {
    /// ABI-encoded constructor arguments, hex without `0x`, as explorers want them.
    pub fn encoded_constructor_args(&self) -> String {
        hex::encode(ethers::abi::encode(&self.constructor_args))
    }
}

/// Resolves what to deploy: a raw bytecode file if one is given (its ABI is
/// just `constructor`), otherwise the Hardhat artifact for `contract_name`.
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
    bytecode_path: Option<&Path>,
    constructor: &str,
) -> Result<ContractArtifact> {
    match bytecode_path {
        Some(path) => {
            let abi: Abi = if constructor.is_empty() {
                Abi::default()
            } else {
                parse_abi(&[constructor]).map_err(|e| eyre!("Invalid constructor signature {:?}: {}", constructor, e))?
            };
            ContractArtifact::from_bytecode_file(path, contract_name, abi)
                .wrap_err_with(|| format!("Failed to load {} bytecode", contract_name))
        }
        None => ContractArtifact::load_named(artifacts_dir, contract_name)
            .wrap_err_with(|| format!("Failed to load {} artifact (did you compile?)", contract_name)),
    }
}

/// Replays a reverted deployment as `eth_call` on the state before `mined_in`.
async fn replay_reason<M: Middleware>(client: &M, request: &TypedTransaction, mined_in: Option<U64>) -> Option<String> {
    let block = mined_in.map(|b| BlockId::from(b.saturating_sub(U64::one())));
    match client.call(request, block).await {
        Ok(_) => None,
        Err(e) => e.as_error_response().and_then(rpc_revert_reason),
    }
}

/// Deploys `artifact` with `constructor_args` and waits for the receipt.
#[instrument(skip_all, fields(contract = %artifact.contract_name))]
pub async fn deploy_contract<M: Middleware + 'static>(
    client: Arc<M>,
    artifact: &ContractArtifact,
    constructor_args: Vec<Token>,
    gas_limit: Option<u64>,
) -> Result<Deployment> {
    info!(args = constructor_args.len(), "Deploying contract");
    println!("Deploying {} from {:?}", artifact.contract_name, artifact.path);

    let factory = ContractFactory::new(artifact.abi.clone(), artifact.bytecode.clone(), client.clone());
    let mut deployer = factory
        .deploy(Token::Tuple(constructor_args.clone()))
        .map_err(|e| eyre!("Failed to construct deployment call for {}: {}", artifact.contract_name, e))?;
    if let Some(gas) = gas_limit {
        deployer.tx.set_gas(gas);
    }

    let request = deployer.tx.clone();
    println!("Sending deployment transaction...");
    let (contract, receipt) = deployer
        .send_with_receipt()
        .await
        .wrap_err_with(|| format!("Deployment of {} failed", artifact.contract_name))?;
    if let Err(mut err) = check_receipt(&artifact.contract_name, TxEcho::from_request(&request), &receipt) {
        if let TxError::Reverted { reason, .. } = &mut err {
            *reason = replay_reason(client.as_ref(), &request, receipt.block_number).await;
        }
        error!(contract = %artifact.contract_name, reason = ?err.reason(), "Deployment reverted");
        return Err(err.into());
    }

    let deployment = Deployment {
        contract_name: artifact.contract_name.clone(),
        address: contract.address(),
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        constructor_args,
    };
    info!(
        address = ?deployment.address,
        tx_hash = ?deployment.tx_hash,
        block = ?deployment.block_number,
        "Contract deployed"
    );
    Ok(deployment)
}

// END OF FILE: ops/src/deploy.rs
