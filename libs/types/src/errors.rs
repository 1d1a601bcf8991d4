//! Error taxonomy for the order book
//!
//! Soft failures (unknown id on cancel/modify, reduce-only violations) are
//! boolean returns on the book itself and never appear here. These variants
//! cover the value-returning failures; index corruption is a bug and panics
//! rather than surfacing as an error.

use crate::ids::OrderId;
use thiserror::Error;

/// Errors surfaced by order book operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    #[error("order not found: {0}")]
    NotFound(OrderId),

    #[error("duplicate order id: {0}")]
    DuplicateOrder(OrderId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BookError::NotFound(OrderId::new(7)).to_string(),
            "order not found: 7"
        );
        assert_eq!(
            BookError::DuplicateOrder(OrderId::new(7)).to_string(),
            "duplicate order id: 7"
        );
    }
}
