// ops/src/diagnostics.rs
//! Top-level failure reporting. Every command funnels its error through
//! [`report`] before the process exits with status 1.

use crate::state::OpsClient;
use crate::transaction::TxError;
use ethers::{
    contract::ContractError,
    providers::{JsonRpcError, Middleware, MiddlewareError, ProviderError, RpcError},
};
use ethers::abi::AbiDecode;
use std::error::Error as StdError;
use tracing::error;

/// Revert reasons the strategy contract uses for "nothing to do".
pub const STRATEGY_BENIGN_REASONS: &[&str] =
    &["No profitable opportunity found", "Invalid market conditions", "Cooldown period active"];

/// Explorer responses meaning the source is already published.
pub const ALREADY_VERIFIED: &[&str] = &["Already Verified"];

/// Fields pulled out of the error chain for display.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub message: String,
    pub reason: Option<String>,
    pub code: Option<i64>,
    pub rpc_message: Option<String>,
    pub data: Option<String>,
    pub transaction: Option<String>,
    pub receipt: Option<String>,
}

/// Decodes an `Error(string)` revert payload.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    // Error(string) selector
    const SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
    if data.len() < 4 || data[..4] != SELECTOR {
        return None;
    }
    String::decode(&data[4..]).ok()
}

const REVERT_PREFIX: &str = "execution reverted:";

/// Reason carried by a JSON-RPC error: the decoded revert data, or failing
/// that the text after `execution reverted:` in the message.
pub fn rpc_revert_reason(rpc: &JsonRpcError) -> Option<String> {
    rpc.as_revert_data()
        .and_then(|data| decode_revert_reason(&data))
        .or_else(|| {
            let lower = rpc.message.to_ascii_lowercase();
            let at = lower.find(REVERT_PREFIX)? + REVERT_PREFIX.len();
            let reason = rpc.message[at..].trim();
            (!reason.is_empty()).then(|| reason.to_string())
        })
}

/// Revert reason of a failed contract call, from either the decoded revert
/// bytes or the middleware's JSON-RPC error.
pub fn contract_revert_reason<M: Middleware>(err: &ContractError<M>) -> Option<String> {
    err.as_revert().and_then(|bytes| decode_revert_reason(bytes)).or_else(|| {
        err.as_middleware_error()
            .and_then(|e| e.as_error_response())
            .and_then(rpc_revert_reason)
    })
}

fn rpc_fields(rpc: &JsonRpcError, diag: &mut Diagnostics) {
    diag.code = diag.code.or(Some(rpc.code));
    diag.rpc_message = diag.rpc_message.take().or_else(|| Some(rpc.message.clone()));
    if let Some(data) = &rpc.data {
        diag.data = diag.data.take().or_else(|| Some(data.to_string()));
    }
    diag.reason = diag.reason.take().or_else(|| rpc_revert_reason(rpc));
}

fn contract_error_fields(err: &ContractError<OpsClient>, diag: &mut Diagnostics) {
    if let Some(bytes) = err.as_revert() {
        diag.reason = diag.reason.take().or_else(|| decode_revert_reason(bytes));
        diag.data = diag.data.take().or_else(|| Some(bytes.to_string()));
    }
    if let Some(rpc) = err.as_middleware_error().and_then(|e| e.as_error_response()) {
        rpc_fields(rpc, diag);
    }
}

fn provider_error_fields(err: &ProviderError, diag: &mut Diagnostics) {
    if let Some(rpc) = RpcError::as_error_response(err) {
        rpc_fields(rpc, diag);
    }
}

/// Collects diagnostic fields from every error in the chain.
pub fn collect(report: &eyre::Report) -> Diagnostics {
    let mut diag = Diagnostics { message: format!("{:#}", report), ..Default::default() };
    for cause in report.chain() {
        inspect_cause(cause, &mut diag);
    }
    diag
}

fn inspect_cause(cause: &(dyn StdError + 'static), diag: &mut Diagnostics) {
    if let Some(err) = cause.downcast_ref::<ContractError<OpsClient>>() {
        contract_error_fields(err, diag);
    } else if let Some(err) = cause.downcast_ref::<ProviderError>() {
        provider_error_fields(err, diag);
    } else if let Some(err) = cause.downcast_ref::<TxError>() {
        if let Some(reason) = err.reason() {
            diag.reason.get_or_insert_with(|| reason.to_string());
        }
        if let Some(echo) = err.echo() {
            diag.transaction.get_or_insert_with(|| echo.to_string());
        }
        if let Some(receipt) = err.receipt() {
            diag.receipt.get_or_insert_with(|| {
                format!(
                    "Status: {}\nGas used: {}\nBlock number: {}",
                    receipt.status.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                    receipt.gas_used.unwrap_or_default(),
                    receipt.block_number.map(|b| b.to_string()).unwrap_or_else(|| "-".into()),
                )
            });
        }
    }
}

/// Returns the first of `patterns` found (case-insensitively) in the error
/// chain or its decoded revert reason.
pub fn benign_match(report: &eyre::Report, patterns: &[&'static str]) -> Option<&'static str> {
    let diag = collect(report);
    let mut haystack: Vec<String> = report.chain().map(|c| c.to_string().to_lowercase()).collect();
    haystack.extend(diag.reason.map(|r| r.to_lowercase()));
    haystack.extend(diag.rpc_message.map(|m| m.to_lowercase()));
    patterns
        .iter()
        .copied()
        .find(|p| haystack.iter().any(|h| h.contains(&p.to_lowercase())))
}

/// Same matching for a bare message (explorer responses, for example).
pub fn message_matches(message: &str, patterns: &[&'static str]) -> Option<&'static str> {
    let message = message.to_lowercase();
    patterns.iter().copied().find(|p| message.contains(&p.to_lowercase()))
}

/// Prints everything we know about `report` to stderr.
pub fn report(report: &eyre::Report) {
    let diag = collect(report);
    error!(error = %diag.message, reason = ?diag.reason, code = ?diag.code, "Command failed");

    eprintln!("\nError Details:");
    eprintln!("-------------");
    eprintln!("Error message: {}", diag.message);
    if let Some(reason) = &diag.reason {
        eprintln!("Error reason: {}", reason);
    }
    if let Some(code) = diag.code {
        eprintln!("Error code: {}", code);
    }
    if let Some(msg) = &diag.rpc_message {
        eprintln!("RPC message: {}", msg);
    }
    if let Some(data) = &diag.data {
        eprintln!("Error data: {}", data);
    }
    if let Some(tx) = &diag.transaction {
        eprintln!("\nTransaction details:\n{}", tx);
    }
    if let Some(receipt) = &diag.receipt {
        eprintln!("\nTransaction receipt:\n{}", receipt);
    }
}

// END OF FILE: ops/src/diagnostics.rs
