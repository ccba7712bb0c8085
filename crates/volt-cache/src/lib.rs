//! Typed key-value storage layer for VoltCart.
//!
//! Provides a simple, ergonomic API for persisting client state in a
//! key-value store with automatic JSON serialization. On `wasm32` the
//! backing store is Spin's Key-Value Store; on native targets an in-memory
//! store backs development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use volt_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! // Store a value
//! cache.set("cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore};
}
