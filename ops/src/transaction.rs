// ops/src/transaction.rs

use crate::diagnostics::contract_revert_reason;
use crate::utils::format_ether;
use ethers::{
    abi::Detokenize,
    contract::ContractCall,
    core::types::{
        transaction::eip2718::TypedTransaction, Address, BlockId, Bytes, NameOrAddress, TransactionReceipt, TxHash,
        U256, U64,
    },
    providers::{Middleware, ProviderError},
};
use eyre::Result;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

const TX_SUCCESS_STATUS: U64 = U64([1]);

/// The request fields echoed back when a transaction fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEcho {
    pub to: Option<Address>,
    pub from: Option<Address>,
    pub data: Option<Bytes>,
    pub value: Option<U256>,
}

impl TxEcho {
    pub fn from_request(tx: &TypedTransaction) -> Self {
        let to = match tx.to() {
            Some(NameOrAddress::Address(addr)) => Some(*addr),
            _ => None,
        };
        Self { to, from: tx.from().copied(), data: tx.data().cloned(), value: tx.value().copied() }
    }
}

impl fmt::Display for TxEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To: {}", self.to.map(|a| format!("{:?}", a)).unwrap_or_else(|| "-".into()))?;
        writeln!(f, "From: {}", self.from.map(|a| format!("{:?}", a)).unwrap_or_else(|| "-".into()))?;
        writeln!(f, "Data: {}", self.data.as_ref().map(|d| d.to_string()).unwrap_or_else(|| "-".into()))?;
        write!(f, "Value: {}", self.value.map(|v| v.to_string()).unwrap_or_else(|| "0".into()))
    }
}

/// The receipt fields reported for a failed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptEcho {
    pub status: Option<U64>,
    pub gas_used: Option<U256>,
    pub block_number: Option<U64>,
}

impl From<&TransactionReceipt> for ReceiptEcho {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self { status: receipt.status, gas_used: receipt.gas_used, block_number: receipt.block_number }
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {}", r)).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum TxError {
    #[error("{label}: failed to send transaction")]
    Send {
        label: String,
        tx: TxEcho,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
    #[error("{label}: transaction {tx_hash:?} reverted{}", reason_suffix(.reason))]
    Reverted { label: String, tx_hash: TxHash, tx: TxEcho, receipt: ReceiptEcho, reason: Option<String> },
    #[error("{label}: transaction {tx_hash:?} was dropped before confirmation")]
    Dropped { label: String, tx_hash: TxHash, tx: TxEcho },
    #[error("{label}: no receipt for {tx_hash:?} after {waited:?}")]
    Timeout { label: String, tx_hash: TxHash, waited: Duration, tx: TxEcho },
    #[error("{label}: error while waiting for receipt of {tx_hash:?}")]
    Provider {
        label: String,
        tx_hash: TxHash,
        #[source]
        source: ProviderError,
    },
}

impl TxError {
    pub fn echo(&self) -> Option<&TxEcho> {
        match self {
            TxError::Send { tx, .. }
            | TxError::Reverted { tx, .. }
            | TxError::Dropped { tx, .. }
            | TxError::Timeout { tx, .. } => Some(tx),
            TxError::Provider { .. } => None,
        }
    }

    /// Revert reason recovered for a mined transaction that failed.
    pub fn reason(&self) -> Option<&str> {
        match self {
            TxError::Reverted { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    pub fn receipt(&self) -> Option<&ReceiptEcho> {
        match self {
            TxError::Reverted { receipt, .. } => Some(receipt),
            _ => None,
        }
    }
}

/// Submits `call`, waits (bounded by `wait`) for its receipt and requires a
/// success status.
#[instrument(skip(call, wait), fields(to = ?call.tx.to()))]
pub async fn send_and_confirm<M, D>(label: &str, call: ContractCall<M, D>, wait: Duration) -> Result<TransactionReceipt>
where
    M: Middleware + 'static,
    D: Detokenize,
{
    let echo = TxEcho::from_request(&call.tx);
    debug!(%label, to = ?echo.to, from = ?echo.from, value = ?echo.value, "Submitting transaction");
    let pending = match call.send().await {
        Ok(pending) => pending,
        Err(e) => {
            error!(%label, error = %e, "Error sending transaction");
            return Err(TxError::Send { label: label.to_string(), tx: echo, source: Box::new(e) }.into());
        }
    };
    let tx_hash = pending.tx_hash();
    println!("Transaction hash: {:?}", tx_hash);
    info!(%label, ?tx_hash, "Transaction sent, waiting for receipt");

    let receipt = match timeout(wait, pending).await {
        Ok(Ok(Some(receipt))) => receipt,
        Ok(Ok(None)) => return Err(TxError::Dropped { label: label.to_string(), tx_hash, tx: echo }.into()),
        Ok(Err(e)) => return Err(TxError::Provider { label: label.to_string(), tx_hash, source: e }.into()),
        Err(_) => {
            return Err(TxError::Timeout { label: label.to_string(), tx_hash, waited: wait, tx: echo }.into());
        }
    };

    if let Err(mut err) = check_receipt(label, echo, &receipt) {
        // A preset gas limit skips estimation, so the revert reason only
        // surfaces by replaying the call.
        if let TxError::Reverted { reason, .. } = &mut err {
            *reason = revert_reason(call, receipt.block_number).await;
        }
        error!(%label, ?tx_hash, status = ?receipt.status, reason = ?err.reason(), "Transaction reverted on-chain");
        return Err(err.into());
    }
    info!(
        %label,
        ?tx_hash,
        block = %receipt.block_number.unwrap_or_default(),
        gas_used = %receipt.gas_used.unwrap_or_default(),
        "Transaction confirmed"
    );
    Ok(receipt)
}

/// Requires a success status on `receipt`.
pub fn check_receipt(label: &str, tx: TxEcho, receipt: &TransactionReceipt) -> Result<(), TxError> {
    if receipt.status == Some(TX_SUCCESS_STATUS) {
        return Ok(());
    }
    Err(TxError::Reverted {
        label: label.to_string(),
        tx_hash: receipt.transaction_hash,
        tx,
        receipt: receipt.into(),
        reason: None,
    })
}

/// Replays `call` with `eth_call` against the state its transaction saw
/// (the block before `mined_in`) and returns the revert reason, if any.
pub async fn revert_reason<M, D>(call: ContractCall<M, D>, mined_in: Option<U64>) -> Option<String>
where
    M: Middleware + 'static,
    D: Detokenize,
{
    let replay = match mined_in {
        Some(block) => call.block(BlockId::from(block.saturating_sub(U64::one()))),
        None => call,
    };
    match replay.call().await {
        Ok(_) => None,
        Err(e) => {
            let reason = contract_revert_reason(&e);
            debug!(error = %e, ?reason, "Replayed reverted call");
            reason
        }
    }
}

/// One-line receipt summary: block, gas used and what the gas cost.
pub fn describe_receipt(receipt: &TransactionReceipt) -> String {
    let gas_used = receipt.gas_used.unwrap_or_default();
    let mut line = format!("Block #{} | Gas Used: {}", receipt.block_number.unwrap_or_default(), gas_used);
    if let Some(price) = receipt.effective_gas_price {
        line.push_str(&format!(" | Cost: {} ETH", format_ether(gas_used.saturating_mul(price))));
    }
    line
}

// END OF FILE: ops/src/transaction.rs
