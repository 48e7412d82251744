//! Pricing module: subtotal, tax and total for a list of priced lines.
//!
//! Pure functions only; this crate knows nothing about inventory or cart state.

pub mod tax;
pub mod totals;

pub use tax::{TAX_RATE, TaxRate};
pub use totals::{LineItem, Totals, compute_totals, compute_totals_with_rate, line_subtotal};
