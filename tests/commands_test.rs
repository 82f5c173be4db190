// tests/commands_test.rs
// Outcome handling shared by the command handlers, without a network.

use chainops::commands::strategy::{classify_execution, report_read, Execution};
use chainops::commands::token::{classify_mint, MintOutcome};
use chainops::transaction::{check_receipt, ReceiptEcho, TxEcho, TxError};
use ethers::types::{Address, TransactionReceipt, TxHash, U64};
use eyre::{eyre, WrapErr};

fn receipt(status: Option<u64>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: TxHash::from_low_u64_be(0x42),
        block_number: Some(U64::from(12u64)),
        status: status.map(U64::from),
        ..Default::default()
    }
}

fn reverted(reason: Option<&str>) -> eyre::Report {
    let err = TxError::Reverted {
        label: "executeStrategy".into(),
        tx_hash: TxHash::from_low_u64_be(0x42),
        tx: TxEcho { to: Some(Address::from_low_u64_be(0x20)), ..Default::default() },
        receipt: ReceiptEcho { status: Some(U64::zero()), ..Default::default() },
        reason: reason.map(str::to_string),
    };
    Err::<(), _>(err).wrap_err("Strategy execution failed").unwrap_err()
}

#[test]
fn receipt_status_decides_success() {
    assert!(check_receipt("transfer", TxEcho::default(), &receipt(Some(1))).is_ok());

    let err = check_receipt("transfer", TxEcho::default(), &receipt(Some(0))).unwrap_err();
    match &err {
        TxError::Reverted { tx_hash, receipt, reason, .. } => {
            assert_eq!(*tx_hash, TxHash::from_low_u64_be(0x42));
            assert_eq!(receipt.block_number, Some(U64::from(12u64)));
            assert!(reason.is_none());
        }
        other => panic!("unexpected {other}"),
    }

    // Pre-Byzantium receipts carry no status at all.
    assert!(check_receipt("transfer", TxEcho::default(), &receipt(None)).is_err());
}

#[test]
fn benign_strategy_revert_is_declined_not_failed() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    match classify_execution(Err(reverted(Some("Cooldown period active")))).unwrap() {
        Execution::Declined(reason) => assert_eq!(reason, "Cooldown period active"),
        other => panic!("expected a declined run, got {other:?}"),
    }
}

#[test]
fn unexplained_strategy_revert_still_fails() {
    let err = classify_execution(Err(reverted(None))).unwrap_err();
    assert!(err.to_string().contains("Strategy execution failed"));

    let err = classify_execution(Err(reverted(Some("Insufficient liquidity")))).unwrap_err();
    assert!(format!("{err:#}").contains("Insufficient liquidity"));
}

#[test]
fn completed_strategy_run_keeps_receipt() {
    match classify_execution(Ok(receipt(Some(1)))).unwrap() {
        Execution::Completed(r) => assert_eq!(r.transaction_hash, TxHash::from_low_u64_be(0x42)),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn refused_mint_is_reported_with_reason() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut err = reverted(Some("Ownable: caller is not the owner"));
    err = err.wrap_err("mint");
    match classify_mint(Err(err)) {
        MintOutcome::Rejected(why) => assert_eq!(why, "Ownable: caller is not the owner"),
        other => panic!("expected a rejection, got {other:?}"),
    }

    match classify_mint(Err(eyre!("insufficient funds for gas"))) {
        MintOutcome::Rejected(why) => assert_eq!(why, "insufficient funds for gas"),
        other => panic!("expected a rejection, got {other:?}"),
    }

    assert!(matches!(classify_mint(Ok(receipt(Some(1)))), MintOutcome::Minted(_)));
}

#[test]
fn unreadable_values_are_skipped() {
    let owner = report_read("Owner", Ok::<_, eyre::Report>(Address::from_low_u64_be(7)), |a| format!("{a:?}"));
    assert_eq!(owner, Some(Address::from_low_u64_be(7)));

    let threshold = report_read::<u64, _>("Profit Threshold", Err(eyre!("call reverted")), |v| v.to_string());
    assert_eq!(threshold, None);
}

// END OF FILE: tests/commands_test.rs
