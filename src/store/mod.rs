//! Order Stores
//!
//! Whole-collection persistence of finalized orders. An order's position in the
//! collection is its address; orders are only ever appended, never removed.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::orders::Order;

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryOrderStore;

/// Order store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("failed to access order file {path}")]
    Io {
        /// Backing file
        path: PathBuf,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The persisted collection could not be decoded.
    #[error("order file {path} is corrupt")]
    Decode {
        /// Backing file
        path: PathBuf,

        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded.
    #[error("failed to encode orders")]
    Encode(#[source] serde_json::Error),

    /// The new file could not be moved into place.
    #[error("failed to replace order file")]
    Persist(#[from] tempfile::PersistError),

    /// A previous writer panicked while holding the collection.
    #[error("order collection lock poisoned")]
    Poisoned,
}

/// Persistence for the collection of finalized orders.
#[cfg_attr(test, mockall::automock)]
pub trait OrderStore {
    /// Load every persisted order, in persisted order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the collection cannot be read or decoded.
    fn load_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Replace the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the collection cannot be encoded or written.
    fn save_all(&self, orders: &[Order]) -> Result<(), StoreError>;

    /// Append an order, returning its zero-based position.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the collection cannot be loaded or saved.
    fn append(&self, order: Order) -> Result<usize, StoreError> {
        let mut orders = self.load_all()?;
        let position = orders.len();

        orders.push(order);
        self.save_all(&orders)?;

        Ok(position)
    }
}
