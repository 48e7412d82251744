//! Inventory domain module.
//!
//! Owns the catalog items and their stock levels. Stock only ever moves
//! through [`Inventory::deduct`]; everything else is a read.

pub mod inventory;
pub mod item;
pub mod seed;

pub use inventory::Inventory;
pub use item::Item;
pub use seed::{ItemSeed, SeedError, default_catalog, parse_catalog};
