//! Billing data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tabsplit_shared::types::round_money;

/// A single priced order item shared among named participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item name as it appears on the order.
    pub name: String,
    /// Item price. Must be strictly positive.
    pub price: Decimal,
    /// Participants sharing this item, in the order they were listed.
    pub participants: Vec<String>,
}

impl OrderItem {
    /// Returns the participants trimmed and de-duplicated, preserving
    /// first-occurrence order.
    ///
    /// The first occurrence of a name fixes its position; later duplicates
    /// (after trimming) are merged into it. This order drives both the
    /// remainder tie-break and the output order of shares.
    #[must_use]
    pub fn effective_participants(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.participants.len());
        for raw in &self.participants {
            let name = raw.trim();
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

/// A bill computation request: the ordered list of items to split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRequest {
    /// Order items, in the order they were added to the bill.
    pub items: Vec<OrderItem>,
}

/// One participant's computed share of the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    /// Participant name.
    pub name: String,
    /// This participant's share of the items total.
    pub items_total: Decimal,
    /// This participant's share of the service fee.
    pub service_fee_share: Decimal,
    /// Total to pay: items share plus fee share.
    pub total: Decimal,
    /// Share of the grand total, as a percentage rounded to 2 decimals.
    pub percentage: Decimal,
}

/// The computed bill split.
///
/// Shares are listed in first-appearance order of participants across all
/// items, and their amounts reconcile exactly with the bill-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillResponse {
    /// Sum of all item prices, rounded to money precision.
    pub items_total: Decimal,
    /// Service fee applied on top of the items total.
    pub service_fee_applied: Decimal,
    /// Grand total: items total plus service fee.
    pub total_to_pay: Decimal,
    /// Per-participant shares, in first-appearance order.
    pub shares: Vec<ParticipantShare>,
}

/// Running accumulator for one participant, created lazily on first
/// encounter and kept in first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct ParticipantPortion {
    pub(crate) name: String,
    pub(crate) items_total: Decimal,
    pub(crate) service_fee: Decimal,
}

impl ParticipantPortion {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            items_total: Decimal::ZERO,
            service_fee: Decimal::ZERO,
        }
    }

    /// Finalizes this portion into an output share.
    ///
    /// Guards against a zero grand total rather than dividing by zero; the
    /// validation rules make that case unreachable in practice.
    pub(crate) fn to_share(&self, total_to_pay: Decimal) -> ParticipantShare {
        let total = round_money(self.items_total + self.service_fee);
        let percentage = if total_to_pay.is_zero() {
            Decimal::ZERO
        } else {
            round_money(total * Decimal::ONE_HUNDRED / total_to_pay)
        };
        ParticipantShare {
            name: self.name.clone(),
            items_total: round_money(self.items_total),
            service_fee_share: round_money(self.service_fee),
            total,
            percentage,
        }
    }
}
