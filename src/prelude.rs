//! Café till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::{AccessGate, PasswordGate},
    catalog::{Catalog, CatalogError, Product, ProductId},
    input::ParseError,
    orders::{LineError, Order, OrderDay, OrderLine},
    pricing::{PricingError, SALES_TAX_RATE, Totals},
    receipt::{ReceiptError, ReceiptPrinter},
    store::{JsonFileStore, MemoryOrderStore, OrderStore, StoreError},
    till::{
        AddedItem, DaySummaryLine, Finalized, Fulfilled, NumberedOrder, OrderError, OrderService,
    },
};
