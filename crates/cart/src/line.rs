use serde::{Deserialize, Serialize};

use storefront_core::{ItemId, Money, ValueObject};
use storefront_inventory::Item;
use storefront_pricing::LineItem;

/// One cart line: an item and how many units of it are selected.
///
/// `unit_price` is captured when the line is created and does not follow
/// later catalog price changes. It serializes as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    item_id: ItemId,
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl ValueObject for CartLine {}

impl CartLine {
    pub(crate) fn from_item(item: &Item, quantity: i64) -> Self {
        Self {
            item_id: item.id_typed(),
            name: item.name().to_string(),
            unit_price: item.unit_price(),
            quantity,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `unit_price × quantity` for this line.
    pub fn subtotal(&self) -> Money {
        storefront_pricing::line_subtotal(self)
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}

impl LineItem for CartLine {
    fn unit_price(&self) -> Money {
        self.unit_price
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }
}
