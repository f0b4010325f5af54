//! Business rule validation for bill split requests.

use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::{BillRequest, OrderItem};

/// Validates a bill split request before any monetary arithmetic.
///
/// Rules are checked request-wide in a fixed order, so the same malformed
/// request always surfaces the same error.
///
/// # Errors
///
/// Returns an error if any item is malformed or any name is blank.
pub fn validate_request(request: &BillRequest) -> Result<(), ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let has_invalid_item = request
        .items
        .iter()
        .any(|item| item.price <= Decimal::ZERO || item.effective_participants().is_empty());
    if has_invalid_item {
        return Err(ValidationError::InvalidItem);
    }

    let has_blank_name = request
        .items
        .iter()
        .flat_map(OrderItem::effective_participants)
        .any(|name| name.is_empty());
    if has_blank_name {
        return Err(ValidationError::BlankParticipantName);
    }

    let has_blank_item_name = request.items.iter().any(|item| item.name.trim().is_empty());
    if has_blank_item_name {
        return Err(ValidationError::BlankItemName);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn item(name: &str, price: Decimal, participants: &[&str]) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            price,
            participants: participants.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = BillRequest {
            items: vec![item("Tea", dec!(10), &["Solo"])],
        };
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        let request = BillRequest { items: vec![] };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::NoItems)
        ));
    }

    #[rstest]
    #[case::zero_price(dec!(0))]
    #[case::negative_price(dec!(-5))]
    fn test_non_positive_price_rejected(#[case] price: Decimal) {
        let request = BillRequest {
            items: vec![item("Tea", price, &["Solo"])],
        };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidItem)
        ));
    }

    #[test]
    fn test_empty_participants_rejected() {
        let request = BillRequest {
            items: vec![item("Tea", dec!(10), &[])],
        };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidItem)
        ));
    }

    #[test]
    fn test_blank_participant_rejected() {
        let request = BillRequest {
            items: vec![item("Tea", dec!(10), &["Alice", "  "])],
        };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::BlankParticipantName)
        ));
    }

    #[test]
    fn test_blank_item_name_rejected() {
        let request = BillRequest {
            items: vec![item("   ", dec!(10), &["Alice"])],
        };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::BlankItemName)
        ));
    }

    #[test]
    fn test_item_rules_checked_before_name_rules() {
        // One item with a bad price, another with a blank participant: the
        // price rule wins because rules are checked request-wide in order.
        let request = BillRequest {
            items: vec![
                item("Tea", dec!(10), &[" "]),
                item("Coffee", dec!(0), &["Alice"]),
            ],
        };
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidItem)
        ));
    }
}
