//! Order service results.

use std::fmt;

use rust_decimal::Decimal;

use crate::{catalog::Product, orders::Order, pricing::Totals};

/// An item was added to an in-progress order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedItem {
    /// Product that was added
    pub product: Product,

    /// Quantity added by this call
    pub quantity: u32,

    /// Quantity on the product's line afterwards
    pub line_quantity: u32,
}

impl fmt::Display for AddedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} added to your order.",
            self.quantity, self.product.name
        )
    }
}

/// An order was finalized and saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalized {
    /// 1-based position in the order collection
    pub number: usize,

    /// Totals at the time of finalizing
    pub totals: Totals,
}

impl fmt::Display for Finalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order #{} has been finalized and saved.", self.number)
    }
}

/// An order was marked as fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fulfilled {
    /// 1-based position in the order collection
    pub number: usize,
}

impl fmt::Display for Fulfilled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order #{} has been marked as fulfilled.", self.number)
    }
}

/// One line of a manager's day summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummaryLine {
    /// 1-based position in the order collection
    pub number: usize,

    /// Units across all lines
    pub item_count: u64,

    /// Order total including tax
    pub total: Decimal,

    /// Whether the order has been fulfilled
    pub fulfilled: bool,
}

/// A finalized order with its order number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedOrder {
    /// 1-based position in the order collection
    pub number: usize,

    /// The order as persisted
    pub order: Order,
}
