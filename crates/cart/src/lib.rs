//! Cart domain module.
//!
//! Holds the user's selected (item, quantity) lines. Quantities are bounded
//! by the live inventory stock at the time of each call.

pub mod cart;
pub mod line;

pub use cart::{Cart, CartChange};
pub use line::CartLine;
