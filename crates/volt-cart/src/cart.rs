//! Cart and line item types.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;

/// A product entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Whether the product came from the remote catalog.
    ///
    /// Part of the identity key together with `id`: the two catalogs may
    /// reuse the same product ids.
    pub remote_catalog: bool,
    /// Unit price.
    pub price: Money,
    /// Quantity. An item whose quantity reaches zero is removed from the
    /// cart, never stored at zero.
    pub quantity: i64,
    /// Available stock, used for availability queries only and not
    /// enforced when adding.
    pub stock: i64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        id: impl Into<ProductId>,
        remote_catalog: bool,
        price: Money,
        quantity: i64,
        stock: i64,
    ) -> Self {
        Self {
            id: id.into(),
            remote_catalog,
            price,
            quantity,
            stock,
        }
    }

    /// Line total (unit price times quantity), `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

/// A shopping cart: ordered line items plus a cached total.
///
/// Insertion order is preserved and there is at most one item per
/// `(id, remote_catalog)` pair. The cached `total` equals the sum of line
/// totals whenever the cart leaves a [`CartStore`](crate::CartStore)
/// action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cached sum of line totals.
    pub total: Money,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Get the item matching `(id, remote_catalog)`.
    pub fn get(&self, id: &ProductId, remote_catalog: bool) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|i| &i.id == id && i.remote_catalog == remote_catalog)
    }

    fn position(&self, id: &ProductId, remote_catalog: bool) -> Option<usize> {
        self.items
            .iter()
            .position(|i| &i.id == id && i.remote_catalog == remote_catalog)
    }

    /// Add an item to the cart.
    ///
    /// If an item with the same `(id, remote_catalog)` key is already
    /// present, its quantity is increased by `item.quantity`; the existing
    /// entry's price and stock are left as they are. Otherwise the item is
    /// appended.
    ///
    /// Returns an error if the quantity is not positive, the price is
    /// negative, or the merged quantity overflows.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        if item.quantity <= 0 {
            return Err(CartError::InvalidQuantity(item.quantity));
        }
        if item.price.is_negative() {
            return Err(CartError::InvalidPrice(item.price));
        }

        match self.position(&item.id, item.remote_catalog) {
            Some(index) => {
                let existing = &mut self.items[index];
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(CartError::Overflow)?;
            }
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Remove the item matching `(id, remote_catalog)`.
    pub fn remove(&mut self, id: &ProductId, remote_catalog: bool) -> Result<(), CartError> {
        let index = self
            .position(id, remote_catalog)
            .ok_or_else(|| CartError::item_not_in_cart(id, remote_catalog))?;
        self.items.remove(index);
        Ok(())
    }

    /// Increase the quantity of the matching item by one.
    pub fn increase(&mut self, id: &ProductId, remote_catalog: bool) -> Result<(), CartError> {
        let index = self
            .position(id, remote_catalog)
            .ok_or_else(|| CartError::item_not_in_cart(id, remote_catalog))?;
        let item = &mut self.items[index];
        item.quantity = item.quantity.checked_add(1).ok_or(CartError::Overflow)?;
        Ok(())
    }

    /// Decrease the quantity of the matching item by one.
    ///
    /// An item whose quantity reaches zero is removed from the cart.
    pub fn decrease(&mut self, id: &ProductId, remote_catalog: bool) -> Result<(), CartError> {
        let index = self
            .position(id, remote_catalog)
            .ok_or_else(|| CartError::item_not_in_cart(id, remote_catalog))?;
        let item = &mut self.items[index];
        item.quantity -= 1;
        if item.quantity == 0 {
            self.items.remove(index);
        }
        Ok(())
    }

    /// Sum of line totals over the current items.
    pub fn computed_total(&self) -> Result<Money, CartError> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| {
                let line = item.line_total()?;
                acc.checked_add(line)
            })
            .ok_or(CartError::Overflow)
    }

    /// Recompute the cached total from the current items.
    pub fn refresh_total(&mut self) -> Result<(), CartError> {
        self.total = self.computed_total()?;
        Ok(())
    }

    /// Remove all items and zero the total.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero();
    }
}
