//! The cart store: owns the cart, its persistence, and its API submission.

use serde::Serialize;
use volt_cache::Cache;
use volt_data::ApiClient;

use crate::cart::{Cart, LineItem};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;

/// Storage key the cart is persisted under.
pub const CART_KEY: &str = "cart";

/// API path carts are submitted to.
pub const CARTS_PATH: &str = "/carts";

/// Sentinel returned by [`CartStore::available_stock`] when the product is
/// not in the cart.
pub const STOCK_NOT_IN_CART: i64 = -1;

/// Body submitted to the carts endpoint.
///
/// The item sequence is transmitted string-encoded, as the endpoint
/// expects.
#[derive(Debug, Serialize)]
struct CartUpload {
    total: Money,
    products: String,
}

/// Owner of a single [`Cart`] and its side effects.
///
/// Every mutating action updates the in-memory cart, recomputes the cached
/// total, and writes the new state to storage before returning. The cart in
/// memory is authoritative during a session; the persisted copy is
/// authoritative across restarts and is only read back through an explicit
/// [`load`](CartStore::load).
///
/// Collaborators are injected at construction; the store holds no global
/// state.
///
/// # Example
///
/// ```rust,ignore
/// use volt_cache::Cache;
/// use volt_cart::{CartStore, LineItem, Money};
/// use volt_data::ApiClient;
///
/// let mut store = CartStore::new(
///     Cache::open_default()?,
///     ApiClient::new().with_base_url("https://api.example.com"),
/// );
/// store.load()?;
/// store.add_product(LineItem::new("prod-1", false, Money::new(1099), 1, 14))?;
/// store.submit().await?;
/// ```
pub struct CartStore {
    cart: Cart,
    cache: Cache,
    api: ApiClient,
}

impl CartStore {
    /// Create a store with an empty cart over the given collaborators.
    pub fn new(cache: Cache, api: ApiClient) -> Self {
        Self {
            cart: Cart::new(),
            cache,
            api,
        }
    }

    /// The current cart, read-only.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Recompute the total over the current items.
    ///
    /// Pure; does not touch the cached `total` field. Callers wanting the
    /// cached value read it off [`cart()`](CartStore::cart).
    pub fn total(&self) -> Result<Money, CartError> {
        self.cart.computed_total()
    }

    /// Stock remaining for a product after what the cart already claims.
    ///
    /// Returns `stock - quantity` for the item matching
    /// `(id, remote_catalog)`; the result may be negative, signaling
    /// over-commitment. Returns [`STOCK_NOT_IN_CART`] when no item matches;
    /// absence is an answer here, not a failure.
    pub fn available_stock(&self, id: &ProductId, remote_catalog: bool) -> i64 {
        match self.cart.get(id, remote_catalog) {
            Some(item) => item.stock - item.quantity,
            None => STOCK_NOT_IN_CART,
        }
    }

    /// Add an item, merging quantities with any existing entry for the same
    /// `(id, remote_catalog)` key.
    pub fn add_product(&mut self, item: LineItem) -> Result<(), CartError> {
        self.cart.add(item)?;
        self.commit()
    }

    /// Remove the item matching `(id, remote_catalog)`.
    pub fn remove_product(&mut self, id: &ProductId, remote_catalog: bool) -> Result<(), CartError> {
        self.cart.remove(id, remote_catalog)?;
        self.commit()
    }

    /// Increase the matching item's quantity by one.
    pub fn increase_quantity(
        &mut self,
        id: &ProductId,
        remote_catalog: bool,
    ) -> Result<(), CartError> {
        self.cart.increase(id, remote_catalog)?;
        self.commit()
    }

    /// Decrease the matching item's quantity by one, removing the item when
    /// it reaches zero.
    pub fn decrease_quantity(
        &mut self,
        id: &ProductId,
        remote_catalog: bool,
    ) -> Result<(), CartError> {
        self.cart.decrease(id, remote_catalog)?;
        self.commit()
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// The persisted cart only wins if it exists and has items; an absent or
    /// empty persisted cart leaves the in-memory cart untouched. The loaded
    /// total is trusted as stored, not recomputed. A malformed persisted
    /// value is reported as [`CartError::Storage`] and changes nothing.
    pub fn load(&mut self) -> Result<(), CartError> {
        if let Some(cart) = self.cache.get::<Cart>(CART_KEY)? {
            if !cart.items.is_empty() {
                tracing::debug!(items = cart.items.len(), "cart loaded from storage");
                self.cart = cart;
            }
        }
        Ok(())
    }

    /// Clear the cart and persist the cleared state.
    pub fn reset(&mut self) -> Result<(), CartError> {
        self.cart.clear();
        self.persist()
    }

    /// Submit the cart to the carts endpoint.
    ///
    /// Sends `{ total, products }` with the items string-encoded. Non-2xx
    /// statuses and transport failures surface as errors; there is no retry
    /// and the cart is not modified either way.
    pub async fn submit(&self) -> Result<(), CartError> {
        let upload = CartUpload {
            total: self.cart.total,
            products: serde_json::to_string(&self.cart.items)?,
        };

        self.api
            .post(CARTS_PATH)
            .json(&upload)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Submit the cart, logging failure instead of returning it.
    ///
    /// Fire-and-forget shape for callers that do not observe the outcome.
    pub async fn submit_detached(&self) {
        if let Err(err) = self.submit().await {
            tracing::warn!(error = %err, "cart submission failed");
        }
    }

    /// Recompute the cached total, then persist.
    fn commit(&mut self) -> Result<(), CartError> {
        self.cart.refresh_total()?;
        self.persist()
    }

    fn persist(&self) -> Result<(), CartError> {
        self.cache.set(CART_KEY, &self.cart)?;
        tracing::debug!(
            items = self.cart.items.len(),
            total = self.cart.total.cents,
            "cart persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use volt_cache::{KeyValueStore, MemoryStore};

    use super::*;

    fn item(id: &str, remote_catalog: bool, price: i64, quantity: i64, stock: i64) -> LineItem {
        LineItem::new(id, remote_catalog, Money::new(price), quantity, stock)
    }

    fn store_over(backing: &Arc<MemoryStore>) -> CartStore {
        let cache = Cache::with_store(Box::new(Arc::clone(backing)));
        CartStore::new(cache, ApiClient::new())
    }

    fn persisted_cart(backing: &Arc<MemoryStore>) -> Option<Cart> {
        Cache::with_store(Box::new(Arc::clone(backing)))
            .get(CART_KEY)
            .unwrap()
    }

    #[test]
    fn test_add_product_updates_total_and_persists() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();

        assert_eq!(store.cart().total, Money::new(2000));
        assert_eq!(persisted_cart(&backing).unwrap(), *store.cart());
    }

    #[test]
    fn test_total_invariant_after_each_add() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();
        assert_eq!(store.cart().total, store.total().unwrap());

        store.add_product(item("p2", true, 350, 4, 9)).unwrap();
        assert_eq!(store.cart().total, store.total().unwrap());

        store.add_product(item("p1", false, 1000, 1, 5)).unwrap();
        assert_eq!(store.cart().total, store.total().unwrap());
        assert_eq!(store.cart().total, Money::new(1000 * 3 + 350 * 4));
    }

    #[test]
    fn test_remove_product_persists_absence() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();
        store.remove_product(&"p1".into(), false).unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(store.cart().total, Money::zero());
        assert!(persisted_cart(&backing).unwrap().is_empty());
    }

    #[test]
    fn test_remove_missing_product_fails_and_persists_nothing() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        let result = store.remove_product(&"ghost".into(), false);
        assert!(matches!(result, Err(CartError::ItemNotInCart { .. })));
        assert_eq!(persisted_cart(&backing), None);
    }

    #[test]
    fn test_increase_and_decrease_quantity() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 1, 5)).unwrap();
        store.increase_quantity(&"p1".into(), false).unwrap();
        assert_eq!(store.cart().total, Money::new(2000));

        store.decrease_quantity(&"p1".into(), false).unwrap();
        assert_eq!(store.cart().total, Money::new(1000));
        assert_eq!(persisted_cart(&backing).unwrap().total, Money::new(1000));
    }

    #[test]
    fn test_decrease_to_zero_removes_item() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 1, 5)).unwrap();
        store.decrease_quantity(&"p1".into(), false).unwrap();

        assert!(store.cart().is_empty());
        assert!(persisted_cart(&backing).unwrap().is_empty());
    }

    #[test]
    fn test_available_stock() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();

        assert_eq!(store.available_stock(&"p1".into(), false), 3);
        // Same id, other catalog: no match.
        assert_eq!(store.available_stock(&"p1".into(), true), STOCK_NOT_IN_CART);
        assert_eq!(store.available_stock(&"ghost".into(), false), STOCK_NOT_IN_CART);
    }

    #[test]
    fn test_available_stock_negative_signals_over_commitment() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 4, 2)).unwrap();
        assert_eq!(store.available_stock(&"p1".into(), false), -2);
    }

    #[test]
    fn test_load_replaces_cart_when_persisted_has_items() {
        let backing = Arc::new(MemoryStore::new());
        let mut first = store_over(&backing);
        first.add_product(item("p1", false, 1000, 2, 5)).unwrap();

        let mut second = store_over(&backing);
        second.load().unwrap();

        assert_eq!(second.cart(), first.cart());
    }

    #[test]
    fn test_load_trusts_persisted_total() {
        let backing = Arc::new(MemoryStore::new());

        // Persist a cart whose cached total disagrees with its items.
        let stale = Cart {
            items: vec![item("p1", false, 1000, 1, 5)],
            total: Money::new(9999),
        };
        Cache::with_store(Box::new(Arc::clone(&backing)))
            .set(CART_KEY, &stale)
            .unwrap();

        let mut store = store_over(&backing);
        store.load().unwrap();
        assert_eq!(store.cart().total, Money::new(9999));
    }

    #[test]
    fn test_load_ignores_absent_value() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 1, 5)).unwrap();
        Cache::with_store(Box::new(Arc::clone(&backing)))
            .delete(CART_KEY)
            .unwrap();

        store.load().unwrap();
        assert_eq!(store.cart().unique_item_count(), 1);
    }

    #[test]
    fn test_load_ignores_empty_persisted_cart() {
        let backing = Arc::new(MemoryStore::new());
        Cache::with_store(Box::new(Arc::clone(&backing)))
            .set(CART_KEY, &Cart::new())
            .unwrap();

        let mut store = store_over(&backing);
        store.add_product(item("p1", false, 1000, 1, 5)).unwrap();
        store.load().unwrap();

        assert_eq!(store.cart().unique_item_count(), 1);
    }

    #[test]
    fn test_load_corrupt_state_fails_and_keeps_cart() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(CART_KEY, b"{not json").unwrap();

        let mut store = store_over(&backing);
        let result = store.load();

        assert!(matches!(result, Err(CartError::Storage(_))));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_reset_persists_empty_cart() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();
        store.reset().unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(store.cart().total, Money::zero());

        let persisted = persisted_cart(&backing).unwrap();
        assert!(persisted.is_empty());
        assert_eq!(persisted.total, Money::zero());
    }

    #[test]
    fn test_upload_body_shape() {
        let mut cart = Cart::new();
        cart.add(item("p1", false, 1000, 2, 5)).unwrap();
        cart.refresh_total().unwrap();

        let upload = CartUpload {
            total: cart.total,
            products: serde_json::to_string(&cart.items).unwrap(),
        };
        let body: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&upload).unwrap()).unwrap();

        assert_eq!(body["total"], 2000);
        // Products travel string-encoded.
        let products = body["products"].as_str().unwrap();
        let items: Vec<LineItem> = serde_json::from_str(products).unwrap();
        assert_eq!(items, cart.items);
    }

    #[tokio::test]
    async fn test_submit_succeeds_against_stub_transport() {
        let backing = Arc::new(MemoryStore::new());
        let mut store = store_over(&backing);

        store.add_product(item("p1", false, 1000, 2, 5)).unwrap();
        store.submit().await.unwrap();
        // Submission never mutates the cart.
        assert_eq!(store.cart().total, Money::new(2000));
    }

    #[tokio::test]
    async fn test_submit_detached_swallows_outcome() {
        let backing = Arc::new(MemoryStore::new());
        let store = store_over(&backing);

        store.submit_detached().await;
    }
}
