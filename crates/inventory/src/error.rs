//! Inventory error model.

use thiserror::Error;

use lotledger_core::{DomainError, ItemId, WarehouseId};

/// Result type used by ledger operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// A draw-down that would leave an (item, warehouse) bucket below zero.
#[derive(Debug, Error, Clone, PartialEq)]
#[error(
    "cannot consume {requested} of item {item} in warehouse {warehouse}; only {available} available"
)]
pub struct NegativeStock {
    pub item: ItemId,
    pub warehouse: WarehouseId,
    pub requested: f64,
    pub available: f64,
}

/// Errors raised by ledger operations.
///
/// Every variant is detected before any lot is touched, so a failed call leaves
/// the ledger exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    /// Caller supplied a non-positive (or non-finite) quantity, or a non-finite cost.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested quantity exceeds what the source bucket holds.
    #[error(transparent)]
    NegativeStock(#[from] NegativeStock),

    /// The shared ledger could not be locked (a writer panicked mid-operation).
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

impl InventoryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn is_negative_stock(&self) -> bool {
        matches!(self, Self::NegativeStock(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<InventoryError> for DomainError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InvalidArgument(msg) => DomainError::validation(msg),
            InventoryError::NegativeStock(e) => DomainError::invariant(e.to_string()),
            InventoryError::Unavailable(msg) => DomainError::conflict(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortage() -> NegativeStock {
        NegativeStock {
            item: ItemId::new(1),
            warehouse: WarehouseId::new(2),
            requested: 3.0,
            available: 2.0,
        }
    }

    #[test]
    fn negative_stock_message_names_bucket() {
        let err = InventoryError::from(shortage());
        assert!(err.is_negative_stock());
        assert!(!err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "cannot consume 3 of item 1 in warehouse 2; only 2 available"
        );
    }

    #[test]
    fn maps_into_domain_categories() {
        let bad_input: DomainError = InventoryError::invalid_argument("quantity must be positive").into();
        assert_eq!(bad_input, DomainError::validation("quantity must be positive"));

        let rule: DomainError = InventoryError::from(shortage()).into();
        assert!(matches!(rule, DomainError::InvariantViolation(_)));

        let lock: DomainError = InventoryError::unavailable("poisoned").into();
        assert_eq!(lock, DomainError::conflict("poisoned"));
    }
}
