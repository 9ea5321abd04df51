//! Orders
//!
//! The order aggregate: an ordered list of lines, at most one per product, tagged with
//! the day it was taken and whether it has been fulfilled.

use std::fmt;

use jiff::{Timestamp, Zoned, civil::Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Product, ProductId};

mod records;

pub use records::InvalidOrderRecord;

/// Errors raised when a line would break the order invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Lines must have a positive quantity.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// The accumulated quantity for a product does not fit.
    #[error("quantity for product {0} is too large")]
    QuantityOverflow(ProductId),
}

/// Day of the week an order was taken on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum OrderDay {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl OrderDay {
    /// Every day, Monday first.
    pub const ALL: [OrderDay; 7] = [
        OrderDay::Monday,
        OrderDay::Tuesday,
        OrderDay::Wednesday,
        OrderDay::Thursday,
        OrderDay::Friday,
        OrderDay::Saturday,
        OrderDay::Sunday,
    ];

    /// Day from its number, 1 = Monday through 7 = Sunday.
    pub fn from_number(number: u64) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;

        Self::ALL.get(index).copied()
    }

    /// Day number, 1 = Monday through 7 = Sunday.
    pub fn number(self) -> u8 {
        match self {
            OrderDay::Monday => 1,
            OrderDay::Tuesday => 2,
            OrderDay::Wednesday => 3,
            OrderDay::Thursday => 4,
            OrderDay::Friday => 5,
            OrderDay::Saturday => 6,
            OrderDay::Sunday => 7,
        }
    }

    /// Today's day in the system time zone.
    pub fn today() -> Self {
        Zoned::now().weekday().into()
    }

    /// Day name.
    pub fn name(self) -> &'static str {
        match self {
            OrderDay::Monday => "Monday",
            OrderDay::Tuesday => "Tuesday",
            OrderDay::Wednesday => "Wednesday",
            OrderDay::Thursday => "Thursday",
            OrderDay::Friday => "Friday",
            OrderDay::Saturday => "Saturday",
            OrderDay::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for OrderDay {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => OrderDay::Monday,
            Weekday::Tuesday => OrderDay::Tuesday,
            Weekday::Wednesday => OrderDay::Wednesday,
            Weekday::Thursday => OrderDay::Thursday,
            Weekday::Friday => OrderDay::Friday,
            Weekday::Saturday => OrderDay::Saturday,
            Weekday::Sunday => OrderDay::Sunday,
        }
    }
}

impl fmt::Display for OrderDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A product and how many of it were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    product: Product,
    quantity: u32,
}

impl OrderLine {
    /// Create a new line.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::ZeroQuantity`] when `quantity` is zero.
    pub fn new(product: Product, quantity: u32) -> Result<Self, LineError> {
        if quantity == 0 {
            return Err(LineError::ZeroQuantity);
        }

        Ok(Self { product, quantity })
    }

    /// The product snapshot taken when the line was added.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity ordered; always positive.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "records::OrderRecord", into = "records::OrderRecord")]
pub struct Order {
    lines: Vec<OrderLine>,
    order_date: Timestamp,
    order_day: OrderDay,
    fulfilled: bool,
}

impl Order {
    /// Start an empty order for the given day, stamped with the current time.
    #[must_use]
    pub fn new(day: OrderDay) -> Self {
        Self::started_at(day, Timestamp::now())
    }

    /// Start an empty order for the given day and timestamp.
    #[must_use]
    pub fn started_at(day: OrderDay, order_date: Timestamp) -> Self {
        Self {
            lines: Vec::new(),
            order_date,
            order_day: day,
            fulfilled: false,
        }
    }

    /// Add `quantity` of `product`, merging into the existing line for that product.
    ///
    /// Returns the line's quantity after the addition. The order is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns a [`LineError`] if `quantity` is zero or the merged quantity overflows.
    pub fn add_line(&mut self, product: &Product, quantity: u32) -> Result<u32, LineError> {
        if quantity == 0 {
            return Err(LineError::ZeroQuantity);
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(LineError::QuantityOverflow(product.id))?;

            return Ok(line.quantity);
        }

        self.lines.push(OrderLine::new(product.clone(), quantity)?);

        Ok(quantity)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// The line for a product, if any.
    pub fn line(&self, product: ProductId) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.product.id == product)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Day the order was taken on.
    pub fn day(&self) -> OrderDay {
        self.order_day
    }

    /// Retag the order with a different day.
    pub fn set_day(&mut self, day: OrderDay) {
        self.order_day = day;
    }

    /// When the order was started.
    pub fn order_date(&self) -> Timestamp {
        self.order_date
    }

    /// Whether the order has been fulfilled.
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled
    }

    /// Flag the order as fulfilled. Returns `false` if it already was.
    pub(crate) fn mark_fulfilled(&mut self) -> bool {
        !std::mem::replace(&mut self.fulfilled, true)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn coffee() -> Product {
        Product::new(1, "Coffee", Decimal::new(250, 2))
    }

    fn tea() -> Product {
        Product::new(2, "Black Tea", Decimal::new(100, 2))
    }

    #[test]
    fn new_order_is_empty_and_unfulfilled() {
        let order = Order::new(OrderDay::Friday);

        assert!(order.is_empty());
        assert!(!order.is_fulfilled());
        assert_eq!(order.day(), OrderDay::Friday);
    }

    #[test]
    fn add_line_to_empty_order_creates_one_line() -> TestResult {
        let mut order = Order::new(OrderDay::Monday);

        let quantity = order.add_line(&tea(), 3)?;

        assert_eq!(quantity, 3);
        assert_eq!(order.len(), 1);
        assert_eq!(order.line(2).map(OrderLine::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn add_line_accumulates_same_product() -> TestResult {
        let mut order = Order::new(OrderDay::Monday);

        order.add_line(&coffee(), 2)?;
        let quantity = order.add_line(&coffee(), 5)?;

        assert_eq!(quantity, 7);
        assert_eq!(order.len(), 1);
        assert_eq!(order.line(1).map(OrderLine::quantity), Some(7));

        Ok(())
    }

    #[test]
    fn add_line_keeps_first_added_order() -> TestResult {
        let mut order = Order::new(OrderDay::Monday);

        order.add_line(&coffee(), 2)?;
        order.add_line(&tea(), 1)?;
        order.add_line(&coffee(), 1)?;

        let ids: Vec<ProductId> = order.lines().iter().map(|l| l.product().id).collect();

        assert_eq!(ids, vec![1, 2]);

        Ok(())
    }

    #[test]
    fn add_line_rejects_zero_quantity() {
        let mut order = Order::new(OrderDay::Monday);

        assert_eq!(order.add_line(&coffee(), 0), Err(LineError::ZeroQuantity));
        assert!(order.is_empty());
    }

    #[test]
    fn add_line_overflow_leaves_line_unchanged() -> TestResult {
        let mut order = Order::new(OrderDay::Monday);

        order.add_line(&coffee(), u32::MAX)?;

        assert_eq!(
            order.add_line(&coffee(), 1),
            Err(LineError::QuantityOverflow(1))
        );
        assert_eq!(order.line(1).map(OrderLine::quantity), Some(u32::MAX));

        Ok(())
    }

    #[test]
    fn mark_fulfilled_only_once() {
        let mut order = Order::new(OrderDay::Monday);

        assert!(order.mark_fulfilled());
        assert!(!order.mark_fulfilled());
        assert!(order.is_fulfilled());
    }

    #[test]
    fn day_numbers_round_trip() {
        for day in OrderDay::ALL {
            assert_eq!(OrderDay::from_number(u64::from(day.number())), Some(day));
        }

        assert_eq!(OrderDay::from_number(0), None);
        assert_eq!(OrderDay::from_number(8), None);
    }

    #[test]
    fn weekday_converts() {
        assert_eq!(OrderDay::from(Weekday::Sunday), OrderDay::Sunday);
        assert_eq!(OrderDay::from(Weekday::Wednesday), OrderDay::Wednesday);
    }

    #[test]
    fn order_line_rejects_zero_quantity() {
        assert_eq!(
            OrderLine::new(coffee(), 0),
            Err(LineError::ZeroQuantity)
        );
    }
}
