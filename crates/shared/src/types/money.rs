//! Money precision constants and rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here operates on `rust_decimal::Decimal`.
//!
//! All rounding in the billing domain is half-up: a value exactly at the
//! midpoint rounds away from zero (2.005 -> 2.01).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for money amounts (cents).
pub const MONEY_DP: u32 = 2;

/// Internal precision for intermediate division results.
///
/// Four extra fractional digits beyond the money scale keep the discarded
/// fraction of a raw share available for remainder tie-breaking.
pub const INNER_DP: u32 = MONEY_DP + 4;

/// One cent, the smallest representable money increment.
#[must_use]
pub fn one_cent() -> Decimal {
    Decimal::new(1, MONEY_DP)
}

/// Rounds a value to money precision (2 decimal places) using half-up rounding.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to the internal computation precision using half-up rounding.
#[must_use]
pub fn round_inner(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(INNER_DP, RoundingStrategy::MidpointAwayFromZero)
}
