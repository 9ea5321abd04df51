//! Order Records
//!
//! The persisted shape of an order. Derived totals are never stored.

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{Product, ProductId},
    orders::{Order, OrderDay, OrderLine},
};

/// A persisted order that breaks the order invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidOrderRecord {
    /// A line has quantity zero.
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// Two lines refer to the same product.
    #[error("product {0} appears on more than one line")]
    DuplicateProduct(ProductId),
}

/// Order Record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord {
    items: Vec<OrderLineRecord>,
    order_date: Timestamp,
    order_day: OrderDay,
    is_fulfilled: bool,
}

/// Order Line Record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrderLineRecord {
    product: Product,
    quantity: u32,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        Self {
            items: order
                .lines
                .into_iter()
                .map(|line| OrderLineRecord {
                    product: line.product,
                    quantity: line.quantity,
                })
                .collect(),
            order_date: order.order_date,
            order_day: order.order_day,
            is_fulfilled: order.fulfilled,
        }
    }
}

impl TryFrom<OrderRecord> for Order {
    type Error = InvalidOrderRecord;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let mut seen = FxHashSet::default();
        let mut lines = Vec::with_capacity(record.items.len());

        for item in record.items {
            let id = item.product.id;

            if !seen.insert(id) {
                return Err(InvalidOrderRecord::DuplicateProduct(id));
            }

            let line = OrderLine::new(item.product, item.quantity)
                .map_err(|_err| InvalidOrderRecord::ZeroQuantity(id))?;

            lines.push(line);
        }

        Ok(Order {
            lines,
            order_date: record.order_date,
            order_day: record.order_day,
            fulfilled: record.is_fulfilled,
        })
    }
}
