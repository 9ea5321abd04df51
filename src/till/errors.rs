//! Order service errors.

use thiserror::Error;

use crate::{input::ParseError, pricing::PricingError, store::StoreError};

/// Why an order service call failed.
///
/// Everything except [`OrderError::Storage`] is an expected outcome of bad input or an
/// invalid transition, and leaves all state unchanged.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Typed input was not a number.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Quantity was not positive, or the line quantity would overflow.
    #[error("invalid quantity {0}; please enter a quantity greater than 0")]
    InvalidQuantity(i64),

    /// No product with that id.
    #[error("invalid product id {0}")]
    UnknownProduct(u64),

    /// Finalize was called on an order with no lines.
    #[error("cannot finalize an empty order")]
    EmptyOrder,

    /// No order at that position.
    #[error("invalid order #{number}")]
    IndexOutOfRange {
        /// 1-based order number that was requested
        number: u64,
    },

    /// The order was fulfilled before.
    #[error("order #{number} is already fulfilled")]
    AlreadyFulfilled {
        /// 1-based order number
        number: usize,
    },

    /// The order could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
