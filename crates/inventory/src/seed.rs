//! Seed catalog: the items a session starts with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{ItemId, Money};

use crate::item::Item;

/// One catalog entry as supplied at startup.
///
/// `price` is a decimal amount (e.g. `1.5`); it is converted to cents when
/// the inventory is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSeed {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl ItemSeed {
    pub fn new(id: u32, name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            price,
            stock,
        }
    }

    pub(crate) fn into_item(self) -> Result<Item, SeedError> {
        if self.name.trim().is_empty() {
            return Err(SeedError::EmptyName { item_id: self.id });
        }
        let unit_price = Money::from_decimal(self.price).ok_or(SeedError::InvalidPrice {
            item_id: self.id,
            price: self.price,
        })?;
        if self.stock < 0 {
            return Err(SeedError::NegativeStock {
                item_id: self.id,
                stock: self.stock,
            });
        }
        Ok(Item::new(self.id, self.name, unit_price, self.stock))
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("duplicate item id {item_id} in catalog")]
    DuplicateId { item_id: ItemId },

    #[error("item {item_id} has an empty name")]
    EmptyName { item_id: ItemId },

    #[error("item {item_id} has an invalid price: {price}")]
    InvalidPrice { item_id: ItemId, price: f64 },

    #[error("item {item_id} has negative stock: {stock}")]
    NegativeStock { item_id: ItemId, stock: i64 },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The built-in ice-cream parlour catalog.
pub fn default_catalog() -> Vec<ItemSeed> {
    vec![
        ItemSeed::new(1, "Helado Vainilla", 1.5, 10),
        ItemSeed::new(2, "Helado Chocolate", 1.8, 8),
        ItemSeed::new(3, "Cono Simple", 0.5, 25),
        ItemSeed::new(4, "Cono Doble", 0.8, 15),
        ItemSeed::new(5, "Paleta Fresa", 1.0, 20),
        ItemSeed::new(6, "Paleta Mango", 1.0, 18),
        ItemSeed::new(7, "Sundae Vainilla", 2.5, 12),
        ItemSeed::new(8, "Sundae Chocolate", 2.8, 10),
        ItemSeed::new(9, "Banana Split", 3.5, 7),
        ItemSeed::new(10, "Malteada Fresa", 2.0, 14),
        ItemSeed::new(11, "Malteada Vainilla", 2.0, 9),
        ItemSeed::new(12, "Malteada Chocolate", 2.2, 11),
        ItemSeed::new(13, "Helado Pistacho", 2.0, 6),
        ItemSeed::new(14, "Helado Cookies & Cream", 2.3, 8),
        ItemSeed::new(15, "Helado de Café", 2.1, 5),
    ]
}

/// Parse a JSON array of `{id, name, price, stock}` objects.
pub fn parse_catalog(json: &str) -> Result<Vec<ItemSeed>, SeedError> {
    Ok(serde_json::from_str(json)?)
}
