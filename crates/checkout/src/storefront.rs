use storefront_cart::{Cart, CartChange};
use storefront_core::{ItemId, StoreError, StoreResult};
use storefront_inventory::Inventory;

use crate::checkout::{Checkout, CheckoutState};
use crate::config::{ConfigError, StorefrontConfig};
use crate::order::{Order, OrderHistory};
use crate::pending::PendingSale;

/// One shopping session: inventory, cart and checkout.
///
/// This is the surface the rendering layer talks to. Inventory is only handed
/// out by shared reference, so stock can change solely through a finalized
/// checkout.
#[derive(Debug, Clone)]
pub struct Storefront {
    inventory: Inventory,
    cart: Cart,
    checkout: Checkout,
}

impl Storefront {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            cart: Cart::new(),
            checkout: Checkout::new(),
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.load_inventory()?))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn checkout_state(&self) -> &CheckoutState {
        self.checkout.state()
    }

    pub fn orders(&self) -> &OrderHistory {
        self.checkout.history()
    }

    /// Add `quantity` units of item `id` to the cart, capped at its stock.
    pub fn add_to_cart(&mut self, id: ItemId, quantity: i64) -> StoreResult<CartChange> {
        let item = self
            .inventory
            .get_by_id(id)
            .ok_or(StoreError::not_found(id))?;
        Ok(self.cart.add(item, quantity))
    }

    pub fn increment(&mut self, id: ItemId) -> CartChange {
        self.cart.increment(id, &self.inventory)
    }

    pub fn decrement(&mut self, id: ItemId) -> CartChange {
        self.cart.decrement(id)
    }

    pub fn remove(&mut self, id: ItemId) -> CartChange {
        self.cart.remove(id)
    }

    pub fn remove_quantity(&mut self, id: ItemId, quantity: i64) -> StoreResult<CartChange> {
        self.cart.remove_quantity(id, quantity)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn can_increment(&self, id: ItemId) -> bool {
        self.cart.can_increment(id, &self.inventory)
    }

    pub fn remaining_stock(&self, id: ItemId) -> Option<i64> {
        self.cart.remaining_stock(id, &self.inventory)
    }

    pub fn preview(&mut self) -> StoreResult<PendingSale> {
        self.checkout.preview(&self.cart, &self.inventory)
    }

    pub fn cancel_preview(&mut self) -> Option<PendingSale> {
        self.checkout.cancel_preview()
    }

    pub fn finalize(&mut self, sale: &PendingSale, apply_tax: bool) -> StoreResult<Order> {
        self.checkout
            .finalize(sale, apply_tax, &mut self.inventory, &mut self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_inventory::default_catalog;

    fn storefront() -> Storefront {
        Storefront::new(Inventory::from_seed(default_catalog()).unwrap())
    }

    #[test]
    fn add_to_unknown_item_is_not_found() {
        let mut store = storefront();
        assert_eq!(
            store.add_to_cart(ItemId::new(42), 1),
            Err(StoreError::not_found(ItemId::new(42)))
        );
        assert!(store.cart().is_empty());
    }

    #[test]
    fn cart_calls_are_bounded_by_session_inventory() {
        let mut store = storefront();
        let id = ItemId::new(15);

        assert_eq!(
            store.add_to_cart(id, 9).unwrap(),
            CartChange::StockLimited { quantity: 5 }
        );
        assert!(!store.can_increment(id));
        assert_eq!(store.increment(id), CartChange::StockLimited { quantity: 5 });
        assert_eq!(store.remaining_stock(id), Some(0));
        assert_eq!(store.decrement(id), CartChange::Updated { quantity: 4 });
        assert_eq!(store.remove_quantity(id, 3).unwrap(), CartChange::Updated { quantity: 1 });
        assert_eq!(store.remove(id), CartChange::Removed);
    }

    #[test]
    fn clear_cart_empties_everything() {
        let mut store = storefront();
        store.add_to_cart(ItemId::new(1), 1).unwrap();
        store.add_to_cart(ItemId::new(2), 1).unwrap();
        store.clear_cart();
        assert!(store.cart().is_empty());
    }
}
