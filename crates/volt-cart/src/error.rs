//! Cart error types.

use thiserror::Error;

use crate::ids::ProductId;
use crate::money::Money;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Negative unit price.
    #[error("Invalid price: {0}")]
    InvalidPrice(Money),

    /// Keyed mutation targeted an item that is not in the cart.
    #[error("Item not in cart: {id} (remote catalog: {remote_catalog})")]
    ItemNotInCart {
        id: ProductId,
        remote_catalog: bool,
    },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,

    /// Storage error, including malformed persisted state.
    #[error("Storage error: {0}")]
    Storage(String),

    /// API submission error.
    #[error("API error: {0}")]
    Api(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CartError {
    pub(crate) fn item_not_in_cart(id: &ProductId, remote_catalog: bool) -> Self {
        CartError::ItemNotInCart {
            id: id.clone(),
            remote_catalog,
        }
    }
}

impl From<volt_cache::CacheError> for CartError {
    fn from(e: volt_cache::CacheError) -> Self {
        CartError::Storage(e.to_string())
    }
}

impl From<volt_data::ApiError> for CartError {
    fn from(e: volt_data::ApiError) -> Self {
        CartError::Api(e.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}
