//! Till
//!
//! Order taking, finalizing and fulfillment over a catalog and an order store.

pub mod errors;
pub mod models;
mod service;

pub use errors::OrderError;
pub use models::{AddedItem, DaySummaryLine, Finalized, Fulfilled, NumberedOrder};
pub use service::*;
