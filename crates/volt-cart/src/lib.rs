//! Client-side cart state for VoltCart.
//!
//! This crate owns the shopping cart a storefront session works against:
//!
//! - **Cart**: ordered line items plus a cached total
//! - **CartStore**: the single owner of the cart, persisting every change
//!   to local storage and submitting the cart to the backend on demand
//!
//! Products are identified by `(ProductId, remote_catalog)`: two catalogs
//! may reuse ids, so the catalog flag is part of an item's identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use volt_cache::Cache;
//! use volt_cart::prelude::*;
//! use volt_data::ApiClient;
//!
//! let mut store = CartStore::new(
//!     Cache::open_default()?,
//!     ApiClient::new().with_base_url("https://api.example.com"),
//! );
//!
//! // Adopt whatever the previous session left behind
//! store.load()?;
//!
//! // Mutations persist before they return
//! store.add_product(LineItem::new("prod-1", false, Money::new(1099), 2, 14))?;
//! store.decrease_quantity(&"prod-1".into(), false)?;
//!
//! // Push the cart to the backend; the outcome is the caller's to handle
//! store.submit().await?;
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod money;
pub mod store;

pub use cart::{Cart, LineItem};
pub use error::CartError;
pub use ids::ProductId;
pub use money::Money;
pub use store::{CartStore, CART_KEY, CARTS_PATH, STOCK_NOT_IN_CART};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem};
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;
    pub use crate::store::{CartStore, CART_KEY, STOCK_NOT_IN_CART};
}
