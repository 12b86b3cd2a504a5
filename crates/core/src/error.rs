//! Domain error model.

use thiserror::Error;

use crate::money::InsufficientFunds;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic rule failures (validation, capacity,
/// funds, identity). Document reading and scanning failures live in the
/// inventory crate next to the code that produces them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No item with this id is held.
    #[error("item `{0}` not found")]
    NotFound(String),

    /// An item with this id is already held.
    #[error("item `{0}` is already in the inventory")]
    DuplicateId(String),

    /// Accepting the item would push the carried weight past the budget.
    #[error(
        "exceeds carrying capacity: item weighs {required:.2}, only {available:.2} left ({:.2} over)",
        .required - .available
    )]
    ExceedsCapacity { required: f64, available: f64 },

    /// The money balance cannot cover the item's cost.
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn exceeds_capacity(required: f64, available: f64) -> Self {
        Self::ExceedsCapacity {
            required,
            available,
        }
    }

    /// Push rejections are recoverable: the session keeps running.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ExceedsCapacity { .. } | Self::InsufficientFunds(_) | Self::DuplicateId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn capacity_message_reports_overshoot() {
        let err = DomainError::exceeds_capacity(7.0, 6.0);
        assert_eq!(
            err.to_string(),
            "exceeds carrying capacity: item weighs 7.00, only 6.00 left (1.00 over)"
        );
    }

    #[test]
    fn insufficient_funds_converts_into_domain_error() {
        let err = Money::new(0, 0, 10)
            .subtract(&Money::new(0, 1, 0))
            .unwrap_err();
        let domain: DomainError = err.into();
        assert!(domain.is_rejection());
        assert!(domain.to_string().contains("short"));
    }

    #[test]
    fn not_found_is_not_a_push_rejection() {
        assert!(!DomainError::not_found("rope").is_rejection());
    }
}
