//! Even and weighted splitting using the Largest Remainder Method.
//!
//! This module provides the shared routine for dividing a money amount
//! across ordered recipients so that every share is a whole number of
//! cents and the shares sum exactly to the amount being split.
//!
//! The Largest Remainder Method works by:
//! 1. Calculate raw shares at internal precision
//! 2. Round each share to money precision (half-up)
//! 3. Calculate the remainder (total - sum of rounded shares)
//! 4. Distribute remainder cents to the shares with the largest discarded
//!    fractional parts, ties broken by original position
//!
//! Because the base rounding is half-up rather than a floor, the remainder
//! can be negative; the distribution then subtracts cents instead. Both the
//! per-item split and the service fee split go through the same
//! distribution routine, so the two passes have identical tie-break
//! semantics.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use tabsplit_shared::types::{one_cent, round_inner, round_money};

/// A share that can absorb remainder cents during one distribution pass.
///
/// Lives only for the duration of the split call that created it.
#[derive(Debug)]
struct AdjustableShare {
    /// Position in the original recipient order, used to break ties.
    order: usize,
    /// Share amount at money precision; mutated by remainder bumps.
    amount: Decimal,
    /// Fractional part of the raw share, used only for ranking.
    fractional: Decimal,
}

/// Splits `amount` evenly across `count` recipients.
///
/// Returns one share per recipient, in recipient order, summing exactly to
/// `amount` rounded to money precision.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tabsplit_core::billing::allocation::split_evenly;
///
/// // 100 / 3 = [33.34, 33.33, 33.33], sum = 100.00
/// let shares = split_evenly(dec!(100), 3);
/// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn split_evenly(amount: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return vec![];
    }

    let normalized = round_money(amount);
    let raw_share = round_inner(normalized / Decimal::from(count as u64));

    let mut shares: Vec<AdjustableShare> = (0..count)
        .map(|order| AdjustableShare {
            order,
            amount: round_money(raw_share),
            fractional: raw_share.fract(),
        })
        .collect();

    let rounded_sum: Decimal = shares.iter().map(|share| share.amount).sum();
    let remainder = normalized - rounded_sum;
    if !remainder.is_zero() {
        distribute_remainder(&mut shares, remainder);
    }

    shares.into_iter().map(|share| share.amount).collect()
}

/// Splits `amount` across recipients in proportion to `weights`.
///
/// `weight_sum` is the authoritative total the weights were carved from;
/// each raw share is `amount * weight / weight_sum`. Returns one share per
/// weight, in weight order, summing exactly to `amount` rounded to money
/// precision.
#[must_use]
pub fn split_weighted(amount: Decimal, weights: &[Decimal], weight_sum: Decimal) -> Vec<Decimal> {
    if weights.is_empty() {
        return vec![];
    }
    if weight_sum.is_zero() {
        return vec![Decimal::ZERO; weights.len()];
    }

    let normalized = round_money(amount);

    let mut shares: Vec<AdjustableShare> = weights
        .iter()
        .enumerate()
        .map(|(order, weight)| {
            let raw_share = round_inner(normalized * *weight / weight_sum);
            AdjustableShare {
                order,
                amount: round_money(raw_share),
                fractional: raw_share.fract(),
            }
        })
        .collect();

    let rounded_sum: Decimal = shares.iter().map(|share| share.amount).sum();
    let remainder = normalized - rounded_sum;
    if !remainder.is_zero() {
        distribute_remainder(&mut shares, remainder);
    }

    shares.into_iter().map(|share| share.amount).collect()
}

/// Distributes a remainder over shares, one signed cent at a time.
///
/// Shares are ranked by descending fractional part, ties broken by
/// ascending original order. The walk over the ranking is cyclic: a
/// remainder larger than the share count wraps around and keeps bumping.
fn distribute_remainder(shares: &mut [AdjustableShare], remainder: Decimal) {
    let cents = (remainder.abs() / one_cent()).to_u64().unwrap_or(0);
    let cents = usize::try_from(cents).unwrap_or(0);

    let mut ranking: Vec<usize> = (0..shares.len()).collect();
    ranking.sort_by(|&a, &b| {
        shares[b]
            .fractional
            .cmp(&shares[a].fractional)
            .then_with(|| shares[a].order.cmp(&shares[b].order))
    });

    let step = one_cent() * remainder.signum();
    for i in 0..cents {
        shares[ranking[i % ranking.len()]].amount += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // =========================================================================
    // split_evenly tests
    // =========================================================================

    #[test]
    fn test_split_evenly_empty() {
        let shares = split_evenly(dec!(100), 0);
        assert!(shares.is_empty());
    }

    #[test]
    fn test_split_evenly_single() {
        let shares = split_evenly(dec!(100), 1);
        assert_eq!(shares, vec![dec!(100.00)]);
    }

    #[test]
    fn test_split_evenly_exact() {
        let shares = split_evenly(dec!(100), 4);
        assert_eq!(shares, vec![dec!(25.00); 4]);
    }

    #[test]
    fn test_split_evenly_thirds() {
        // 100 / 3: every raw share is 33.333333, so the tie-break falls
        // back to position and the first recipient absorbs the extra cent.
        let shares = split_evenly(dec!(100), 3);
        assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(100));
    }

    #[test]
    fn test_split_evenly_negative_remainder() {
        // 0.20 / 3: raw shares round UP to 0.07 each, overshooting by one
        // cent; the first recipient gives it back.
        let shares = split_evenly(dec!(0.20), 3);
        assert_eq!(shares, vec![dec!(0.06), dec!(0.07), dec!(0.07)]);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(0.20));
    }

    #[test]
    fn test_split_evenly_sub_cent_amount_normalized_first() {
        // The amount itself is normalized half-up before splitting.
        let shares = split_evenly(dec!(0.015), 2);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(0.02));
    }

    #[test]
    fn test_split_evenly_sum_invariant() {
        let cases = [
            (dec!(100), 3),
            (dec!(100), 7),
            (dec!(1000), 3),
            (dec!(1), 3),
            (dec!(0.01), 3),
            (dec!(999.99), 7),
        ];

        for (amount, count) in cases {
            let shares = split_evenly(amount, count);
            assert_eq!(
                shares.iter().sum::<Decimal>(),
                amount,
                "Sum invariant failed for amount={amount}, count={count}"
            );
        }
    }

    // =========================================================================
    // split_weighted tests
    // =========================================================================

    #[test]
    fn test_split_weighted_empty() {
        let shares = split_weighted(dec!(100), &[], dec!(100));
        assert!(shares.is_empty());
    }

    #[test]
    fn test_split_weighted_zero_weight_sum() {
        let shares = split_weighted(dec!(1), &[Decimal::ZERO, Decimal::ZERO], Decimal::ZERO);
        assert_eq!(shares, vec![Decimal::ZERO, Decimal::ZERO]);
    }

    #[test]
    fn test_split_weighted_proportional() {
        // 3.00 against weights 20/10 out of 30: exact 2.00 and 1.00.
        let shares = split_weighted(dec!(3.00), &[dec!(20), dec!(10)], dec!(30));
        assert_eq!(shares, vec![dec!(2.00), dec!(1.00)]);
    }

    #[test]
    fn test_split_weighted_largest_fraction_wins_the_cent() {
        // 0.10 against weights 0.34/0.33/0.33: raw shares 0.034/0.033/0.033
        // round to 0.03 each, and the largest fraction takes the missing cent.
        let shares = split_weighted(dec!(0.10), &[dec!(0.34), dec!(0.33), dec!(0.33)], dec!(1.00));
        assert_eq!(shares, vec![dec!(0.04), dec!(0.03), dec!(0.03)]);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(0.10));
    }

    #[test]
    fn test_split_weighted_sum_invariant() {
        let cases: [(Decimal, Vec<Decimal>); 3] = [
            (dec!(9.50), vec![dec!(35), dec!(40), dec!(10), dec!(10)]),
            (dec!(0.10), vec![dec!(0.34), dec!(0.33), dec!(0.33)]),
            (dec!(7.77), vec![dec!(1), dec!(2), dec!(3)]),
        ];

        for (amount, weights) in cases {
            let weight_sum: Decimal = weights.iter().copied().sum();
            let shares = split_weighted(amount, &weights, weight_sum);
            assert_eq!(
                shares.iter().sum::<Decimal>(),
                amount,
                "Sum invariant failed for amount={amount}, weights={weights:?}"
            );
        }
    }

    // =========================================================================
    // distribute_remainder tests
    // =========================================================================

    fn share(order: usize, amount: Decimal, fractional: Decimal) -> AdjustableShare {
        AdjustableShare {
            order,
            amount,
            fractional,
        }
    }

    #[test]
    fn test_distribute_remainder_ranks_by_fraction_then_order() {
        let mut shares = vec![
            share(0, dec!(1.00), dec!(0.2)),
            share(1, dec!(1.00), dec!(0.4)),
            share(2, dec!(1.00), dec!(0.4)),
        ];
        distribute_remainder(&mut shares, dec!(0.02));
        // 0.4-fraction shares win; the tie goes to the lower order.
        assert_eq!(shares[0].amount, dec!(1.00));
        assert_eq!(shares[1].amount, dec!(1.01));
        assert_eq!(shares[2].amount, dec!(1.01));
    }

    #[test]
    fn test_distribute_remainder_negative() {
        let mut shares = vec![
            share(0, dec!(1.00), dec!(0.5)),
            share(1, dec!(1.00), dec!(0.1)),
        ];
        distribute_remainder(&mut shares, dec!(-0.01));
        assert_eq!(shares[0].amount, dec!(0.99));
        assert_eq!(shares[1].amount, dec!(1.00));
    }

    #[test]
    fn test_distribute_remainder_wraps_past_share_count() {
        // Five cents over two shares: the cyclic walk wraps, landing
        // 3 cents on the higher-ranked share and 2 on the other.
        let mut shares = vec![
            share(0, dec!(1.00), dec!(0.1)),
            share(1, dec!(1.00), dec!(0.6)),
        ];
        distribute_remainder(&mut shares, dec!(0.05));
        assert_eq!(shares[0].amount, dec!(1.02));
        assert_eq!(shares[1].amount, dec!(1.03));
    }
}
