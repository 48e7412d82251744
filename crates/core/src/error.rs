//! Storefront error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the storefront core.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// Every variant is recoverable by the user: the caller surfaces it as a
/// notice and all state is left exactly as it was before the failing call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced item id has no matching inventory item.
    #[error("item {item_id} not found")]
    NotFound { item_id: ItemId },

    /// A negative quantity reached a mutating call.
    #[error("invalid quantity {quantity} for item {item_id}")]
    InvalidQuantity { item_id: ItemId, quantity: i64 },

    /// The requested quantity exceeds the current stock.
    #[error("insufficient stock for \"{name}\": available {available}, requested {requested}")]
    InsufficientStock {
        item_id: ItemId,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout attempted with no cart lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Finalize called without an active preview, or with a stale snapshot.
    #[error("no pending sale to finalize")]
    NoPendingSale,
}

impl StoreError {
    pub fn not_found(item_id: ItemId) -> Self {
        Self::NotFound { item_id }
    }

    pub fn invalid_quantity(item_id: ItemId, quantity: i64) -> Self {
        Self::InvalidQuantity { item_id, quantity }
    }

    pub fn insufficient_stock(
        item_id: ItemId,
        name: impl Into<String>,
        available: i64,
        requested: i64,
    ) -> Self {
        Self::InsufficientStock {
            item_id,
            name: name.into(),
            available,
            requested,
        }
    }

    /// The item this error refers to, if any.
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::NotFound { item_id }
            | Self::InvalidQuantity { item_id, .. }
            | Self::InsufficientStock { item_id, .. } => Some(*item_id),
            Self::EmptyCart | Self::NoPendingSale => None,
        }
    }
}
