//! Billing validation errors.

use thiserror::Error;

/// Validation errors for bill split requests.
///
/// Validation is all-or-nothing: the first violated rule rejects the whole
/// request before any monetary arithmetic happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The request contains no order items.
    #[error("At least one order item is required")]
    NoItems,

    /// An item has a non-positive price or no participants.
    #[error("Each order item must have price and participants")]
    InvalidItem,

    /// A participant name is blank after trimming.
    #[error("Participant name cannot be blank")]
    BlankParticipantName,

    /// An item name is blank.
    #[error("Item name cannot be blank")]
    BlankItemName,

    /// The configured service fee percentage is negative.
    #[error("Service fee percent cannot be negative")]
    NegativeServiceFee,

    /// No participants remained after allocating item totals.
    #[error("No participants found for items")]
    NoParticipants,
}
