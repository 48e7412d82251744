//! `storefront-core` — shared building blocks for the storefront engine.
//!
//! Identifiers, money, and the error taxonomy used by every other crate.
//! Nothing here performs IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::{ItemId, OrderId, ParseIdError, SaleId};
pub use money::Money;
pub use value_object::ValueObject;
