// tests/mock_provider_test.rs
// Contract reads against a mocked JSON-RPC transport. Each provider is given a
// single queued response so the order the mock serves them never matters.

use chainops::amm::{fetch_reserves, fetch_token_pair, Reserves};
use chainops::bindings::{ArbitrageStrategy, ArbitrageStrategyEvents, ConstantProductPool, TradeExecutedFilter};
use chainops::strategy::{decode_events, describe_event, fetch_stats, StrategyStats};
use ethers::abi::{self, Token};
use ethers::contract::EthEvent;
use chainops::transaction::{revert_reason, send_and_confirm, TxError};
use ethers::providers::{JsonRpcError, MockProvider, MockResponse, Provider};
use ethers::types::{Address, Bytes, Log, U256, U64};
use std::sync::Arc;
use std::time::Duration;

fn mocked(response: Vec<Token>) -> Arc<Provider<MockProvider>> {
    let (provider, mock) = Provider::mocked();
    mock.push::<Bytes, _>(Bytes::from(abi::encode(&response))).unwrap();
    Arc::new(provider)
}

#[tokio::test]
async fn reads_pool_reserves() {
    let client = mocked(vec![Token::Uint(U256::from(1_000_000u64)), Token::Uint(U256::from(10_000_000u64))]);
    let pool = ConstantProductPool::new(Address::from_low_u64_be(0x10), client);

    let reserves = fetch_reserves(&pool).await.unwrap();
    assert_eq!(reserves, Reserves::new(U256::from(1_000_000u64), U256::from(10_000_000u64)));
}

#[tokio::test]
async fn reads_pool_token_pair() {
    let (a, b) = (Address::from_low_u64_be(0xa), Address::from_low_u64_be(0xb));
    let client = mocked(vec![Token::Address(a), Token::Address(b)]);
    let pool = ConstantProductPool::new(Address::from_low_u64_be(0x10), client);

    assert_eq!(fetch_token_pair(&pool).await.unwrap(), (a, b));
}

#[tokio::test]
async fn reads_strategy_stats() {
    let client = mocked(vec![
        Token::Uint(U256::from(4u64)),
        Token::Uint(U256::from(3u64)),
        Token::Uint(U256::from(2_500_000u64)),
        Token::Uint(U256::from(100_000u64)),
    ]);
    let strategy = ArbitrageStrategy::new(Address::from_low_u64_be(0x20), client);

    let stats = fetch_stats(&strategy).await.unwrap();
    assert_eq!(
        stats,
        StrategyStats {
            total_trades: U256::from(4u64),
            profitable_trades: U256::from(3u64),
            total_profit: U256::from(2_500_000u64),
            total_loss: U256::from(100_000u64),
        }
    );
}

#[tokio::test]
async fn failed_read_surfaces_as_error() {
    // Nothing queued: the mock has no response to give.
    let (provider, _mock) = Provider::mocked();
    let pool = ConstantProductPool::new(Address::from_low_u64_be(0x10), Arc::new(provider));
    let err = fetch_reserves(&pool).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read reserves"), "{err}");
}

#[test]
fn decodes_strategy_events_from_receipt_logs() {
    let strategy = Address::from_low_u64_be(0x20);
    let executed = Log {
        address: strategy,
        topics: vec![TradeExecutedFilter::signature()],
        data: abi::encode(&[Token::Uint(U256::from(1_500_000u64)), Token::Uint(U256::from(1_700_000_000u64))]).into(),
        ..Default::default()
    };
    let unrelated = Log { address: Address::from_low_u64_be(0x99), ..Default::default() };

    let events = decode_events(&[unrelated, executed]);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], ArbitrageStrategyEvents::TradeExecutedFilter(e) if e.profit == U256::from(1_500_000u64)));
    assert_eq!(describe_event(&events[0], 6), "Event: TradeExecuted\nprofit: 1.500000\ntimestamp: 1700000000");
}

#[tokio::test]
async fn replayed_call_recovers_revert_reason() {
    let (provider, mock) = Provider::mocked();
    mock.push_response(MockResponse::Error(JsonRpcError {
        code: 3,
        message: "execution reverted: Cooldown period active".to_string(),
        data: None,
    }));
    let strategy = ArbitrageStrategy::new(Address::from_low_u64_be(0x20), Arc::new(provider));

    let reason = revert_reason(strategy.execute_strategy().gas(U256::from(500_000u64)), Some(U64::from(10u64))).await;
    assert_eq!(reason.as_deref(), Some("Cooldown period active"));
}

#[tokio::test]
async fn replay_that_succeeds_has_no_reason() {
    let (provider, mock) = Provider::mocked();
    mock.push::<Bytes, _>(Bytes::new()).unwrap();
    let strategy = ArbitrageStrategy::new(Address::from_low_u64_be(0x20), Arc::new(provider));

    assert_eq!(revert_reason(strategy.execute_strategy(), None).await, None);
}

#[tokio::test]
async fn send_failure_echoes_the_request() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (provider, _mock) = Provider::mocked();
    let address = Address::from_low_u64_be(0x20);
    let strategy = ArbitrageStrategy::new(address, Arc::new(provider));
    let call = strategy.execute_strategy().gas(U256::from(500_000u64));

    let err = send_and_confirm("executeStrategy", call, Duration::from_secs(1)).await.unwrap_err();
    let tx_err = err.downcast_ref::<TxError>().expect("TxError in chain");
    assert!(matches!(tx_err, TxError::Send { .. }), "{tx_err}");
    assert_eq!(tx_err.echo().and_then(|tx| tx.to), Some(address));
    assert!(err.to_string().contains("executeStrategy: failed to send transaction"));
}

// END OF FILE: tests/mock_provider_test.rs
