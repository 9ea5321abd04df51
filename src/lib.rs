//! Café Till
//!
//! Order taking and fulfillment for a single café till: a product catalog, order
//! pricing with sales tax, durable order storage and a password-gated manager summary.

pub mod access;
pub mod catalog;
pub mod config;
pub mod input;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod shell;
pub mod store;
pub mod till;
