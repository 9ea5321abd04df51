//! Order service.

use tracing::{debug, info};

use crate::{
    access::{AccessGate, PasswordGate},
    catalog::{Catalog, Product, ProductId},
    input::{parse_as, parse_number},
    orders::{Order, OrderDay},
    pricing::{self, Totals},
    store::OrderStore,
    till::{
        errors::OrderError,
        models::{AddedItem, DaySummaryLine, Finalized, Fulfilled, NumberedOrder},
    },
};

/// Takes, finalizes, fulfills and reports on orders.
///
/// The catalog and access gate are fixed at construction; every query re-reads the store
/// so it always reflects what is on disk.
#[derive(Debug)]
pub struct OrderService<S, G = PasswordGate> {
    catalog: Catalog,
    store: S,
    gate: G,
}

impl<S: OrderStore, G: AccessGate> OrderService<S, G> {
    /// Create a service over `catalog`, persisting to `store`, with manager access decided
    /// by `gate`.
    pub fn new(catalog: Catalog, store: S, gate: G) -> Self {
        Self {
            catalog,
            store,
            gate,
        }
    }

    /// The catalog orders are taken from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Products available to order, in catalog order.
    pub fn list_products(&self) -> &[Product] {
        self.catalog.list()
    }

    /// Add `quantity` of a product to an in-progress order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidQuantity`]: `quantity` is not positive or the line would
    ///   overflow.
    /// - [`OrderError::UnknownProduct`]: the id is not in the catalog.
    pub fn add_item(
        &self,
        order: &mut Order,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<AddedItem, OrderError> {
        self.add_resolved(order, u64::from(product_id), quantity)
    }

    /// Parse typed product id and quantity, then add the item.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Parse`] if either input is not a plain number, otherwise as
    /// [`OrderService::add_item`].
    pub fn process_order_input(
        &self,
        order: &mut Order,
        product_id: &str,
        quantity: &str,
    ) -> Result<AddedItem, OrderError> {
        let product_id = parse_number(product_id)?;
        let quantity = parse_as::<i64>(quantity)?;

        self.add_resolved(order, product_id, quantity)
    }

    fn add_resolved(
        &self,
        order: &mut Order,
        product_id: u64,
        quantity: i64,
    ) -> Result<AddedItem, OrderError> {
        let units = u32::try_from(quantity)
            .ok()
            .filter(|&units| units > 0)
            .ok_or(OrderError::InvalidQuantity(quantity))?;

        let product = ProductId::try_from(product_id)
            .ok()
            .and_then(|id| self.catalog.find(id))
            .ok_or(OrderError::UnknownProduct(product_id))?;

        let line_quantity = order
            .add_line(product, units)
            .map_err(|_err| OrderError::InvalidQuantity(quantity))?;

        debug!(product_id, quantity, line_quantity, "added item to order");

        Ok(AddedItem {
            product: product.clone(),
            quantity: units,
            line_quantity,
        })
    }

    /// Save a copy of the order to the collection.
    ///
    /// The caller should start a new order afterwards; later changes to `order` are not
    /// saved.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyOrder`]: the order has no lines; nothing is saved.
    /// - [`OrderError::Pricing`]: the order total overflows; nothing is saved.
    /// - [`OrderError::Storage`]: the store failed.
    #[tracing::instrument(
        name = "orders.service.finalize",
        skip_all,
        fields(lines = order.len(), day = %order.day()),
        err
    )]
    pub fn finalize(&self, order: &Order) -> Result<Finalized, OrderError> {
        if order.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let totals = Totals::of(order)?;
        let position = self.store.append(order.clone())?;
        let number = position.saturating_add(1);

        info!(number, total = %totals.total, "finalized order");

        Ok(Finalized { number, totals })
    }

    /// Finalized orders that have not been fulfilled, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn pending_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(into_orders(self.numbered_pending_orders()?))
    }

    /// As [`OrderService::pending_orders`], each with its order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn numbered_pending_orders(&self) -> Result<Vec<NumberedOrder>, OrderError> {
        self.numbered_where(|order| !order.is_fulfilled())
    }

    /// Finalized orders taken on `day`, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn orders_for_day(&self, day: OrderDay) -> Result<Vec<Order>, OrderError> {
        Ok(into_orders(self.numbered_orders_for_day(day)?))
    }

    /// As [`OrderService::orders_for_day`], each with its order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn numbered_orders_for_day(&self, day: OrderDay) -> Result<Vec<NumberedOrder>, OrderError> {
        self.numbered_where(|order| order.day() == day)
    }

    /// Every finalized order, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn all_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.load_all()?)
    }

    /// As [`OrderService::all_orders`], each with its order number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read.
    pub fn numbered_orders(&self) -> Result<Vec<NumberedOrder>, OrderError> {
        self.numbered_where(|_| true)
    }

    /// One summary line per order taken on `day`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Storage`] if the store cannot be read, or
    /// [`OrderError::Pricing`] if an order total overflows.
    pub fn day_summary(&self, day: OrderDay) -> Result<Vec<DaySummaryLine>, OrderError> {
        self.numbered_orders_for_day(day)?
            .iter()
            .map(|numbered| -> Result<DaySummaryLine, OrderError> {
                Ok(DaySummaryLine {
                    number: numbered.number,
                    item_count: pricing::item_count(&numbered.order),
                    total: pricing::total(&numbered.order)?,
                    fulfilled: numbered.order.is_fulfilled(),
                })
            })
            .collect()
    }

    fn numbered_where(
        &self,
        keep: impl Fn(&Order) -> bool,
    ) -> Result<Vec<NumberedOrder>, OrderError> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .enumerate()
            .filter(|(_, order)| keep(order))
            .map(|(index, order)| NumberedOrder {
                number: index.saturating_add(1),
                order,
            })
            .collect())
    }

    /// Mark the order at zero-based `index` as fulfilled and save the collection.
    ///
    /// # Errors
    ///
    /// - [`OrderError::IndexOutOfRange`]: there is no order at `index`.
    /// - [`OrderError::AlreadyFulfilled`]: the order was fulfilled before; nothing is
    ///   saved.
    /// - [`OrderError::Storage`]: the store failed.
    #[tracing::instrument(name = "orders.service.fulfill", skip(self), err)]
    pub fn fulfill(&self, index: usize) -> Result<Fulfilled, OrderError> {
        let mut orders = self.store.load_all()?;
        let number = index.saturating_add(1);

        let order = orders.get_mut(index).ok_or(OrderError::IndexOutOfRange {
            number: u64::try_from(number).unwrap_or(u64::MAX),
        })?;

        if !order.mark_fulfilled() {
            return Err(OrderError::AlreadyFulfilled { number });
        }

        self.store.save_all(&orders)?;

        info!(number, "fulfilled order");

        Ok(Fulfilled { number })
    }

    /// Fulfill an order by its typed 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Parse`] if the input is not a plain number,
    /// [`OrderError::IndexOutOfRange`] for `0`, otherwise as [`OrderService::fulfill`].
    pub fn fulfill_by_number(&self, number: &str) -> Result<Fulfilled, OrderError> {
        let number = parse_number(number)?;

        let index = number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .ok_or(OrderError::IndexOutOfRange { number })?;

        self.fulfill(index)
    }

    /// Whether `input` is the manager password.
    pub fn check_manager_password(&self, input: &str) -> bool {
        let granted = self.gate.check(input);

        if !granted {
            info!("manager access refused");
        }

        granted
    }
}

fn into_orders(numbered: Vec<NumberedOrder>) -> Vec<Order> {
    numbered.into_iter().map(|numbered| numbered.order).collect()
}
