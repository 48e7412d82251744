//! `storefront-checkout` — two-phase purchase orchestration.
//!
//! A purchase is previewed first (read-only validation plus an immutable
//! snapshot of the cart) and committed only on explicit confirmation, which
//! re-validates against live stock and applies every deduction or none.
//!
//! [`Storefront`] bundles one session's inventory, cart and checkout for the
//! rendering layer.

pub mod checkout;
pub mod config;
pub mod order;
pub mod pending;
pub mod storefront;

pub use checkout::{Checkout, CheckoutState};
pub use config::{CATALOG_ENV, ConfigError, StorefrontConfig};
pub use order::{Order, OrderHistory};
pub use pending::PendingSale;
pub use storefront::Storefront;
