use serde::Serialize;

use storefront_core::{Entity, ItemId, Money};

/// Catalog entry: a sellable item with its price and current stock.
///
/// Serialized for display with `unit_price` as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    unit_price: Money,
    stock: i64,
}

impl Item {
    pub(crate) fn new(id: ItemId, name: String, unit_price: Money, stock: i64) -> Self {
        Self {
            id,
            name,
            unit_price,
            stock,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// True iff `1 <= quantity <= stock`.
    pub fn has_stock(&self, quantity: i64) -> bool {
        quantity >= 1 && quantity <= self.stock
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock <= 0
    }

    /// Units left on the shelf if `quantity` of them were bought.
    pub fn remaining_after(&self, quantity: i64) -> i64 {
        self.stock - quantity
    }

    pub(crate) fn set_stock(&mut self, stock: i64) {
        self.stock = stock;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla() -> Item {
        Item::new(ItemId::new(1), "Helado Vainilla".into(), Money::from_cents(150), 10)
    }

    #[test]
    fn has_stock_is_bounded_by_one_and_stock() {
        let item = vanilla();
        assert!(!item.has_stock(0));
        assert!(!item.has_stock(-1));
        assert!(item.has_stock(1));
        assert!(item.has_stock(10));
        assert!(!item.has_stock(11));
    }

    #[test]
    fn sold_out_when_stock_is_zero() {
        let mut item = vanilla();
        assert!(!item.is_sold_out());
        item.set_stock(0);
        assert!(item.is_sold_out());
        assert!(!item.has_stock(1));
    }

    #[test]
    fn remaining_after_subtracts_requested_units() {
        assert_eq!(vanilla().remaining_after(3), 7);
    }

    #[test]
    fn entity_id_matches_typed_id() {
        let item = vanilla();
        assert_eq!(*Entity::id(&item), ItemId::new(1));
        assert_eq!(*item.id(), item.id_typed());
    }

    /// `unit_price` goes over the wire as integer cents.
    #[test]
    fn serializes_display_fields() {
        let json = serde_json::to_value(vanilla()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Helado Vainilla");
        assert_eq!(json["unit_price"], 150);
        assert_eq!(json["stock"], 10);
    }
}
