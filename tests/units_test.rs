// tests/units_test.rs

use chainops::strategy::{format_bps, MarketPrice};
use chainops::utils::{format_amount, format_ether, parse_amount, TokenAmount};
use ethers::types::U256;

#[test]
fn formats_six_decimal_amounts() {
    assert_eq!(format_amount(U256::from(1_500_000u64), 6).unwrap(), "1.500000");
    assert_eq!(TokenAmount::new(U256::from(1_000_000_000u64), 6).to_string(), "1000.000000");
}

#[test]
fn parses_whole_and_fractional_amounts() {
    assert_eq!(parse_amount("1000", 6).unwrap(), U256::from(1_000_000_000u64));
    assert_eq!(parse_amount(" 0.5 ", 6).unwrap(), U256::from(500_000u64));
    assert_eq!(parse_amount("50", 18).unwrap(), U256::exp10(18) * 50);
    assert!(parse_amount("not-a-number", 6).is_err());
}

#[test]
fn token_amount_difference_saturates() {
    let have = TokenAmount::parse("10", 6).unwrap();
    assert_eq!(have.saturating_sub(U256::from(4_000_000u64)).raw, U256::from(6_000_000u64));
    assert!(have.saturating_sub(U256::MAX).raw.is_zero());
    assert_eq!(have.saturating_sub(U256::zero()).decimals, 6);
}

#[test]
fn ether_formatting() {
    assert_eq!(format_ether(U256::exp10(18)), "1.000000000000000000");
}

#[test]
fn basis_points_render_as_percent() {
    assert_eq!(format_bps(U256::from(150u64)), "150 bps (1.50%)");
    assert_eq!(format_bps(U256::from(5u64)), "5 bps (0.05%)");
    assert_eq!(format_bps(U256::from(1_000u64)), "1000 bps (10.00%)");
}

#[test]
fn market_price_timestamps_are_iso_utc() {
    let price = MarketPrice {
        timestamp: U256::from(1_700_000_000u64),
        price: U256::from(42u64),
        liquidity: U256::from(7u64),
    };
    assert_eq!(price.iso_timestamp().as_deref(), Some("2023-11-14T22:13:20.000Z"));
    assert_eq!(price.to_string(), "{ timestamp: 2023-11-14T22:13:20.000Z, price: 42, liquidity: 7 }");
}

#[test]
fn empty_market_price_has_no_data() {
    let price = MarketPrice::default();
    assert!(price.is_empty());
    assert_eq!(price.iso_timestamp(), None);
    assert_eq!(price.to_string(), "No price data available");
}

// END OF FILE: tests/units_test.rs
