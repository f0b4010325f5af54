//! Bill split service: validation, allocation, and response assembly.

use std::collections::HashMap;

use rust_decimal::Decimal;

use tabsplit_shared::types::{round_inner, round_money};

use super::allocation::{split_evenly, split_weighted};
use super::error::ValidationError;
use super::types::{BillRequest, BillResponse, OrderItem, ParticipantPortion};
use super::validation::validate_request;

/// Bill splitting engine.
///
/// A pure function of the request and the configured service fee
/// percentage: no I/O, no state shared between calls, and deterministic
/// output for identical input.
pub struct BillSplitService {
    service_fee_percent: Decimal,
}

impl BillSplitService {
    /// Creates an engine with the given service fee percentage.
    ///
    /// The percentage is validated (non-negative) at call time, not here,
    /// so a misconfigured value surfaces as a `ValidationError` rather
    /// than a construction panic.
    #[must_use]
    pub const fn new(service_fee_percent: Decimal) -> Self {
        Self {
            service_fee_percent,
        }
    }

    /// Computes the penny-exact split of a bill.
    ///
    /// Item prices are divided evenly among each item's participants, the
    /// service fee is divided in proportion to each participant's item
    /// share, and every rounding remainder is redistributed so the shares
    /// reconcile exactly with the bill totals.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the request is malformed or the
    /// configured fee percentage is negative. No partial result is
    /// produced on failure.
    pub fn split(&self, request: &BillRequest) -> Result<BillResponse, ValidationError> {
        if self.service_fee_percent < Decimal::ZERO {
            return Err(ValidationError::NegativeServiceFee);
        }

        validate_request(request)?;

        let items_total = round_money(request.items.iter().map(|item| item.price).sum());

        let mut portions = allocate_item_totals(&request.items)?;

        let service_fee_applied = round_money(percentage_of(items_total, self.service_fee_percent));

        if !service_fee_applied.is_zero() {
            distribute_service_fee(&mut portions, items_total, service_fee_applied);
        }

        let total_to_pay = round_money(items_total + service_fee_applied);

        let shares = portions
            .iter()
            .map(|portion| portion.to_share(total_to_pay))
            .collect();

        Ok(BillResponse {
            items_total,
            service_fee_applied,
            total_to_pay,
            shares,
        })
    }
}

/// Splits every item price among its participants and accumulates the
/// shares per participant, in first-appearance order across all items.
fn allocate_item_totals(items: &[OrderItem]) -> Result<Vec<ParticipantPortion>, ValidationError> {
    let mut portions: Vec<ParticipantPortion> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for item in items {
        let participants = item.effective_participants();
        let shares = split_evenly(item.price, participants.len());

        for (name, amount) in participants.into_iter().zip(shares) {
            let index = match index_by_name.get(&name) {
                Some(&index) => index,
                None => {
                    let index = portions.len();
                    index_by_name.insert(name.clone(), index);
                    portions.push(ParticipantPortion::new(name));
                    index
                }
            };
            portions[index].items_total += amount;
        }
    }

    if portions.is_empty() {
        return Err(ValidationError::NoParticipants);
    }

    Ok(portions)
}

/// Distributes the service fee across portions in proportion to each
/// participant's accumulated item total.
fn distribute_service_fee(
    portions: &mut [ParticipantPortion],
    items_total: Decimal,
    service_fee: Decimal,
) {
    let weights: Vec<Decimal> = portions.iter().map(|portion| portion.items_total).collect();
    let fee_shares = split_weighted(service_fee, &weights, items_total);

    for (portion, fee_share) in portions.iter_mut().zip(fee_shares) {
        portion.service_fee += fee_share;
    }
}

/// Computes `base * percent / 100` at internal precision.
///
/// A non-positive percentage yields exact zero, which lets the caller skip
/// the fee distribution pass entirely.
fn percentage_of(base: Decimal, percent: Decimal) -> Decimal {
    if percent <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_inner(base * percent / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(95), dec!(10)), dec!(9.5));
        assert_eq!(percentage_of(dec!(1.00), dec!(10)), dec!(0.1));
    }

    #[test]
    fn test_percentage_of_non_positive_percent_is_exact_zero() {
        assert_eq!(percentage_of(dec!(95), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_of(dec!(95), dec!(-3)), Decimal::ZERO);
    }

    #[test]
    fn test_allocate_item_totals_first_appearance_order() {
        let items = vec![
            OrderItem {
                name: "Steak".to_string(),
                price: dec!(30),
                participants: vec!["Bob".to_string()],
            },
            OrderItem {
                name: "Dessert".to_string(),
                price: dec!(40),
                participants: vec!["Alice".to_string(), "Bob".to_string()],
            },
        ];

        let portions = allocate_item_totals(&items).expect("portions");
        let names: Vec<&str> = portions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
        assert_eq!(portions[0].items_total, dec!(50.00));
        assert_eq!(portions[1].items_total, dec!(20.00));
    }
}
