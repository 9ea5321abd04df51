//! Pricing
//!
//! Subtotal, sales tax and total of an order, computed in decimal with no intermediate
//! rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::orders::{Order, OrderLine};

/// Sales tax rate applied to every order (10%).
pub const SALES_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// Decimal arithmetic overflowed.
    #[error("order total is too large to calculate")]
    Overflow,
}

/// Unit price times quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn line_total(line: &OrderLine) -> Result<Decimal, PricingError> {
    line.product()
        .price
        .checked_mul(Decimal::from(line.quantity()))
        .ok_or(PricingError::Overflow)
}

/// Sum of all line totals.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum overflows.
pub fn subtotal(order: &Order) -> Result<Decimal, PricingError> {
    order.lines().iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line_total(line)?)
            .ok_or(PricingError::Overflow)
    })
}

/// Sales tax on the subtotal.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the calculation overflows.
pub fn tax(order: &Order) -> Result<Decimal, PricingError> {
    tax_on(subtotal(order)?)
}

/// Subtotal plus sales tax.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the calculation overflows.
pub fn total(order: &Order) -> Result<Decimal, PricingError> {
    Ok(Totals::of(order)?.total)
}

/// Total number of units across all lines.
pub fn item_count(order: &Order) -> u64 {
    order
        .lines()
        .iter()
        .map(|line| u64::from(line.quantity()))
        .sum()
}

fn tax_on(subtotal: Decimal) -> Result<Decimal, PricingError> {
    subtotal
        .checked_mul(SALES_TAX_RATE)
        .ok_or(PricingError::Overflow)
}

/// Subtotal, tax and total of an order, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals
    pub subtotal: Decimal,

    /// Sales tax on the subtotal
    pub tax: Decimal,

    /// Subtotal plus tax
    pub total: Decimal,
}

impl Totals {
    /// Price an order.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any step overflows.
    pub fn of(order: &Order) -> Result<Self, PricingError> {
        let subtotal = subtotal(order)?;
        let tax = tax_on(subtotal)?;
        let total = subtotal.checked_add(tax).ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }

    /// The same totals rounded to cents, for display.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            subtotal: round(self.subtotal),
            tax: round(self.tax),
            total: round(self.total),
        }
    }
}
