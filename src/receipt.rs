//! Receipt
//!
//! Tabular text rendering of the menu, orders and manager day summaries.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    catalog::Product,
    orders::{Order, OrderDay},
    pricing::{self, PricingError, Totals},
    till::models::DaySummaryLine,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The order could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Writes receipts with amounts formatted in one display currency.
#[derive(Debug, Clone)]
pub struct ReceiptPrinter {
    currency: &'static Currency,
}

impl ReceiptPrinter {
    /// Create a printer that formats amounts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Display currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// An amount rounded to cents, in the display currency.
    pub fn money(&self, amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency,
        )
    }

    /// Write the products available to order.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the output cannot be written.
    pub fn write_products(
        &self,
        mut out: impl io::Write,
        products: &[Product],
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["#", "Product", "Price"]);

        for product in products {
            builder.push_record([
                product.id.to_string(),
                product.name.clone(),
                self.money(product.price).to_string(),
            ]);
        }

        write_table(&mut out, builder, 2)
    }

    /// Write one order: its lines, totals, fulfillment state and day.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Pricing`] if the order cannot be priced, or
    /// [`ReceiptError::Io`] if the output cannot be written.
    pub fn write_order(
        &self,
        mut out: impl io::Write,
        title: &str,
        order: &Order,
    ) -> Result<(), ReceiptError> {
        let totals = Totals::of(order)?.rounded();
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in order.lines().iter().enumerate() {
            builder.push_record([
                idx.saturating_add(1).to_string(),
                line.product().name.clone(),
                line.quantity().to_string(),
                self.money(line.product().price).to_string(),
                self.money(pricing::line_total(line)?).to_string(),
            ]);
        }

        writeln!(out, "\n{title}")?;

        write_table(&mut out, builder, 2)?;

        self.write_totals(&mut out, &totals)?;

        writeln!(
            out,
            "  Fulfilled: {}",
            if order.is_fulfilled() { "yes" } else { "no" }
        )?;
        writeln!(out, "  Day: {}", order.day())?;

        Ok(())
    }

    /// Write the manager's one-line-per-order summary for a day.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if the output cannot be written.
    pub fn write_day_summary(
        &self,
        mut out: impl io::Write,
        day: OrderDay,
        lines: &[DaySummaryLine],
    ) -> Result<(), ReceiptError> {
        if lines.is_empty() {
            writeln!(out, "No orders found for {day}.")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Order", "Items", "Total", "Fulfilled"]);

        for line in lines {
            builder.push_record([
                format!("#{}", line.number),
                line.item_count.to_string(),
                self.money(line.total).to_string(),
                if line.fulfilled { "yes" } else { "no" }.to_string(),
            ]);
        }

        writeln!(out, "\nOrders for {day}:")?;

        write_table(&mut out, builder, 1)
    }

    fn write_totals(
        &self,
        out: &mut impl io::Write,
        totals: &Totals,
    ) -> Result<(), ReceiptError> {
        let rows = [
            ("Subtotal:", self.money(totals.subtotal).to_string()),
            ("Sales Tax:", self.money(totals.tax).to_string()),
            ("Total:", self.money(totals.total).to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, "  {label:>label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }
}

/// Render `builder` with right-aligned columns from `first_numeric` onwards.
fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    first_numeric: usize,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(first_numeric..), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::catalog::Catalog;

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<(), ReceiptError>) -> TestResult<String> {
        let mut out = Vec::new();

        f(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn money_rounds_to_cents() {
        let printer = ReceiptPrinter::new(USD);

        assert_eq!(printer.money(Decimal::new(1375, 3)).to_string(), "$1.38");
        assert_eq!(printer.money(Decimal::new(55, 1)).to_string(), "$5.50");
    }

    #[test]
    fn products_list_every_product() -> TestResult {
        let printer = ReceiptPrinter::new(USD);
        let catalog = Catalog::cafe();

        let text = render(|out| printer.write_products(out, catalog.list()))?;

        assert!(text.contains("Coffee"), "{text}");
        assert!(text.contains("Matcha Shake Delux"), "{text}");
        assert!(text.contains("$12.00"), "{text}");

        Ok(())
    }

    #[test]
    fn order_receipt_shows_lines_and_totals() -> TestResult {
        let printer = ReceiptPrinter::new(USD);
        let mut order = Order::new(OrderDay::Tuesday);
        order.add_line(&Product::new(1, "Coffee", Decimal::new(250, 2)), 2)?;

        let text = render(|out| printer.write_order(out, "Order #1", &order))?;

        assert!(text.contains("Order #1"), "{text}");
        assert!(text.contains("Coffee"), "{text}");
        assert!(text.contains("$2.50"), "{text}");
        assert!(text.contains("Subtotal:  $5.00"), "{text}");
        assert!(text.contains("Sales Tax:  $0.50"), "{text}");
        assert!(text.contains("Total:  $5.50"), "{text}");
        assert!(text.contains("Fulfilled: no"), "{text}");
        assert!(text.contains("Day: Tuesday"), "{text}");

        Ok(())
    }

    #[test]
    fn order_receipt_uses_configured_currency() -> TestResult {
        let printer = ReceiptPrinter::new(GBP);
        let mut order = Order::new(OrderDay::Monday);
        order.add_line(&Product::new(2, "Black Tea", Decimal::ONE), 1)?;

        let text = render(|out| printer.write_order(out, "Receipt", &order))?;

        assert!(text.contains("£1.10"), "{text}");
        assert!(!text.contains('$'), "{text}");

        Ok(())
    }

    #[test]
    fn day_summary_lists_each_order() -> TestResult {
        let printer = ReceiptPrinter::new(USD);
        let lines = [
            DaySummaryLine {
                number: 1,
                item_count: 2,
                total: Decimal::new(550, 2),
                fulfilled: false,
            },
            DaySummaryLine {
                number: 4,
                item_count: 1,
                total: Decimal::new(1320, 2),
                fulfilled: true,
            },
        ];

        let text = render(|out| printer.write_day_summary(out, OrderDay::Friday, &lines))?;

        assert!(text.contains("Orders for Friday:"), "{text}");
        assert!(text.contains("#1"), "{text}");
        assert!(text.contains("#4"), "{text}");
        assert!(text.contains("$13.20"), "{text}");

        Ok(())
    }

    #[test]
    fn empty_day_summary_says_so() -> TestResult {
        let printer = ReceiptPrinter::new(USD);

        let text = render(|out| printer.write_day_summary(out, OrderDay::Sunday, &[]))?;

        assert_eq!(text, "No orders found for Sunday.\n");

        Ok(())
    }
}
