//! Property-based tests for the billing engine.
//!
//! The allocation engine promises penny-exact reconciliation for every
//! valid input, so the invariants are stated over randomly generated
//! bills rather than hand-picked examples.

use proptest::prelude::*;
use rust_decimal::Decimal;

use tabsplit_shared::types::round_money;

use super::allocation::{split_evenly, split_weighted};
use super::service::BillSplitService;
use super::types::{BillRequest, OrderItem};

/// Strategy to generate positive money amounts (0.01 to 10,000.00).
fn money_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate fee percentages (0.00 to 100.00).
fn fee_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

/// Strategy to generate one order item sharing a price among up to eight
/// named participants drawn from a fixed pool (duplicates exercise the
/// merge-on-normalization path).
fn order_item() -> impl Strategy<Value = OrderItem> {
    (money_amount(), prop::collection::vec(0usize..8, 1..8)).prop_map(|(price, picks)| {
        OrderItem {
            name: "Item".to_string(),
            price,
            participants: picks.iter().map(|i| format!("P{i}")).collect(),
        }
    })
}

/// Strategy to generate a valid bill request of 1 to 5 items.
fn bill_request() -> impl Strategy<Value = BillRequest> {
    prop::collection::vec(order_item(), 1..6).prop_map(|items| BillRequest { items })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Engine-level invariants
    // =========================================================================

    /// The items total is the price sum rounded to money precision, and
    /// the grand total is items total plus the applied fee.
    #[test]
    fn prop_bill_totals_reconcile(request in bill_request(), percent in fee_percent()) {
        let response = BillSplitService::new(percent).split(&request).unwrap();

        let price_sum: Decimal = request.items.iter().map(|item| item.price).sum();
        prop_assert_eq!(response.items_total, round_money(price_sum));
        prop_assert_eq!(
            response.total_to_pay,
            response.items_total + response.service_fee_applied
        );
    }

    /// Item shares sum exactly to the items total, to the cent.
    #[test]
    fn prop_item_shares_sum_to_items_total(request in bill_request(), percent in fee_percent()) {
        let response = BillSplitService::new(percent).split(&request).unwrap();

        let share_sum: Decimal = response.shares.iter().map(|s| s.items_total).sum();
        prop_assert_eq!(share_sum, response.items_total);
    }

    /// Fee shares sum exactly to the applied fee, to the cent.
    #[test]
    fn prop_fee_shares_sum_to_fee_applied(request in bill_request(), percent in fee_percent()) {
        let response = BillSplitService::new(percent).split(&request).unwrap();

        let fee_sum: Decimal = response.shares.iter().map(|s| s.service_fee_share).sum();
        prop_assert_eq!(fee_sum, response.service_fee_applied);
    }

    /// Every share's total is its items share plus its fee share, and every
    /// amount is non-negative with at most two decimal places.
    #[test]
    fn prop_shares_are_consistent_money_values(
        request in bill_request(),
        percent in fee_percent(),
    ) {
        let response = BillSplitService::new(percent).split(&request).unwrap();

        for share in &response.shares {
            prop_assert_eq!(share.total, share.items_total + share.service_fee_share);
            prop_assert!(share.total >= Decimal::ZERO);

            let scaled = share.total * Decimal::ONE_HUNDRED;
            prop_assert_eq!(scaled, scaled.round());
        }
    }

    /// Identical input yields identical output.
    #[test]
    fn prop_split_is_deterministic(request in bill_request(), percent in fee_percent()) {
        let service = BillSplitService::new(percent);
        let first = service.split(&request).unwrap();
        let second = service.split(&request).unwrap();
        prop_assert_eq!(first, second);
    }

    /// One output share per distinct participant, in first-appearance order.
    #[test]
    fn prop_one_share_per_distinct_participant(
        request in bill_request(),
        percent in fee_percent(),
    ) {
        let response = BillSplitService::new(percent).split(&request).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for item in &request.items {
            for name in item.effective_participants() {
                if !expected.contains(&name) {
                    expected.push(name);
                }
            }
        }

        let actual: Vec<String> = response.shares.iter().map(|s| s.name.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// A zero fee percentage applies no fee and leaves every fee share zero.
    #[test]
    fn prop_zero_fee_short_circuit(request in bill_request()) {
        let response = BillSplitService::new(Decimal::ZERO).split(&request).unwrap();

        prop_assert_eq!(response.service_fee_applied, Decimal::ZERO);
        for share in &response.shares {
            prop_assert_eq!(share.service_fee_share, Decimal::ZERO);
        }
    }

    /// A negative fee percentage is always rejected, whatever the items.
    #[test]
    fn prop_negative_fee_always_rejected(request in bill_request()) {
        let result = BillSplitService::new(Decimal::NEGATIVE_ONE).split(&request);
        prop_assert!(result.is_err());
    }

    // =========================================================================
    // Allocation-level invariants
    // =========================================================================

    /// Even splits sum exactly to the amount for any recipient count.
    #[test]
    fn prop_split_evenly_sum_invariant(amount in money_amount(), count in 1usize..50) {
        let shares = split_evenly(amount, count);

        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), amount);
    }

    /// Even splits never differ by more than one cent between recipients.
    #[test]
    fn prop_split_evenly_is_fair(amount in money_amount(), count in 1usize..50) {
        let shares = split_evenly(amount, count);

        let min = shares.iter().min().copied().unwrap();
        let max = shares.iter().max().copied().unwrap();
        prop_assert!(max - min <= Decimal::new(1, 2));
    }

    /// Weighted splits sum exactly to the amount.
    #[test]
    fn prop_split_weighted_sum_invariant(
        amount in money_amount(),
        weights in prop::collection::vec(money_amount(), 1..20),
    ) {
        let weight_sum: Decimal = weights.iter().copied().sum();
        let shares = split_weighted(amount, &weights, weight_sum);

        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), amount);
    }
}
