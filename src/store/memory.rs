//! In-memory Store

use std::sync::Mutex;

use crate::{
    orders::Order,
    store::{OrderStore, StoreError},
};

/// Keeps the order collection in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `orders`.
    pub fn with_orders(orders: impl Into<Vec<Order>>) -> Self {
        Self {
            orders: Mutex::new(orders.into()),
        }
    }
}

impl OrderStore for MemoryOrderStore {
    fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .map_err(|_err| StoreError::Poisoned)
    }

    fn save_all(&self, orders: &[Order]) -> Result<(), StoreError> {
        let mut guard = self.orders.lock().map_err(|_err| StoreError::Poisoned)?;

        *guard = orders.to_vec();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::orders::OrderDay;

    use super::*;

    #[test]
    fn starts_empty() -> TestResult {
        assert!(MemoryOrderStore::new().load_all()?.is_empty());

        Ok(())
    }

    #[test]
    fn save_replaces_collection() -> TestResult {
        let store = MemoryOrderStore::with_orders(vec![Order::new(OrderDay::Monday)]);

        store.save_all(&[
            Order::new(OrderDay::Friday),
            Order::new(OrderDay::Sunday),
        ])?;

        let days: Vec<OrderDay> = store.load_all()?.iter().map(Order::day).collect();

        assert_eq!(days, vec![OrderDay::Friday, OrderDay::Sunday]);

        Ok(())
    }
}
