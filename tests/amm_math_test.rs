// tests/amm_math_test.rs
#![allow(clippy::all)]

use chainops::amm::{amount_in_for_exact_out, amount_out_for_exact_in, QuoteError, Reserves};
use ethers::types::U256;

fn u(v: u64) -> U256 {
    U256::from(v)
}

#[test]
fn exact_out_quote_matches_formula() {
    // 50 out of a 10_000 / 1_000 pool: 50*1000*10000 / (950*997) + 1
    let quote = amount_in_for_exact_out(u(50), u(10_000), u(1_000)).unwrap();
    assert_eq!(quote, u(500_000_000 / 947_150 + 1));
    assert_eq!(quote, u(528));
}

#[test]
fn exact_in_quote_matches_formula() {
    // 1000*997*5000 / (10000*1000 + 1000*997)
    let out = amount_out_for_exact_in(u(1_000), u(10_000), u(5_000)).unwrap();
    assert_eq!(out, u(4_985_000_000 / 10_997_000));
    assert_eq!(out, u(453));
}

#[test]
fn quoted_input_always_buys_the_requested_output() {
    let pools = [(u(1_000_000_000), u(10_000_000_000)), (u(7), u(13)), (u(123_456_789), u(987_654))];
    for (reserve_in, reserve_out) in pools {
        let mut desired = U256::one();
        while desired < reserve_out {
            let amount_in = amount_in_for_exact_out(desired, reserve_in, reserve_out).unwrap();
            let received = amount_out_for_exact_in(amount_in, reserve_in, reserve_out).unwrap();
            assert!(received >= desired, "in={} gave {} < {}", amount_in, received, desired);
            desired = desired * 3 + 1;
        }
    }
}

#[test]
fn output_grows_with_input() {
    let (rin, rout) = (u(1_000_000), u(2_000_000));
    let mut previous = U256::zero();
    for amount in [1u64, 10, 100, 1_000, 10_000, 100_000] {
        let out = amount_out_for_exact_in(u(amount), rin, rout).unwrap();
        assert!(out >= previous);
        previous = out;
    }
    assert!(previous < rout);
}

#[test]
fn rejects_degenerate_inputs() {
    assert_eq!(amount_in_for_exact_out(U256::zero(), u(10), u(10)), Err(QuoteError::ZeroAmount));
    assert_eq!(amount_out_for_exact_in(U256::zero(), u(10), u(10)), Err(QuoteError::ZeroAmount));
    assert_eq!(amount_in_for_exact_out(u(1), U256::zero(), u(10)), Err(QuoteError::EmptyReserves));
    assert_eq!(amount_out_for_exact_in(u(1), u(10), U256::zero()), Err(QuoteError::EmptyReserves));
}

#[test]
fn cannot_drain_the_output_reserve() {
    let err = amount_in_for_exact_out(u(1_000), u(10_000), u(1_000)).unwrap_err();
    assert_eq!(err, QuoteError::InsufficientLiquidity { desired: u(1_000), available: u(1_000) });
    assert!(amount_in_for_exact_out(u(1_001), u(10_000), u(1_000)).is_err());
}

#[test]
fn overflow_is_reported_not_wrapped() {
    let err = amount_in_for_exact_out(U256::MAX / 2, U256::MAX, U256::MAX).unwrap_err();
    assert_eq!(err, QuoteError::Overflow);
    assert_eq!(amount_out_for_exact_in(U256::MAX, u(1), u(1)), Err(QuoteError::Overflow));
}

#[test]
fn reserves_quote_in_pool_order() {
    let reserves = Reserves::new(u(10_000), u(1_000));
    assert_eq!(reserves.quote_a_for_exact_b(u(50)).unwrap(), u(528));
    let out = reserves.quote_b_for_exact_a(u(528)).unwrap();
    assert!(out >= u(50));
    assert_eq!(Reserves::default().quote_a_for_exact_b(u(1)), Err(QuoteError::EmptyReserves));
}

// END OF FILE: tests/amm_math_test.rs
