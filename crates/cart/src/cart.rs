use serde::Serialize;

use storefront_core::{ItemId, StoreError, StoreResult};
use storefront_inventory::{Inventory, Item};
use storefront_pricing::{Totals, compute_totals};

use crate::line::CartLine;

/// Outcome of a cart mutation, for the UI to react to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    /// A new line was created with exactly the requested quantity.
    Added { quantity: i64 },
    /// An existing line now holds `quantity` units.
    Updated { quantity: i64 },
    /// The quantity was capped by current stock; surface a "no more stock" notice.
    StockLimited { quantity: i64 },
    /// The line is gone.
    Removed,
    /// Nothing happened (no such line, or a no-op quantity).
    Unchanged,
}

/// The user's cart.
///
/// Invariants: at most one line per item, every line holds at least one unit,
/// and lines keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live view of the lines, in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines; `None` when the count does not fit in an `i64`.
    pub fn total_units(&self) -> Option<i64> {
        self.lines
            .iter()
            .try_fold(0i64, |units, line| units.checked_add(line.quantity()))
    }

    /// Running cart total, without tax.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.lines, false)
    }

    /// Add `quantity` units of `item`, capped at the item's current stock.
    pub fn add(&mut self, item: &Item, quantity: i64) -> CartChange {
        if quantity < 1 {
            return CartChange::Unchanged;
        }
        let id = item.id_typed();
        let stock = item.stock();

        let change = match self.position(id) {
            Some(idx) => {
                let wanted = self.lines[idx].quantity().saturating_add(quantity);
                self.set_bounded(idx, wanted.min(stock), wanted)
            }
            None => {
                let bounded = quantity.min(stock);
                if bounded < 1 {
                    CartChange::StockLimited { quantity: 0 }
                } else {
                    self.lines.push(CartLine::from_item(item, bounded));
                    if bounded < quantity {
                        CartChange::StockLimited { quantity: bounded }
                    } else {
                        CartChange::Added { quantity: bounded }
                    }
                }
            }
        };

        tracing::debug!(item_id = %id, quantity, ?change, "cart add");
        change
    }

    /// Add one unit to an existing line, capped at current stock.
    ///
    /// Returns [`CartChange::StockLimited`] when the line was already at the
    /// ceiling. Items missing from `inventory` count as having no stock.
    pub fn increment(&mut self, id: ItemId, inventory: &Inventory) -> CartChange {
        let Some(idx) = self.position(id) else {
            return CartChange::Unchanged;
        };
        let stock = inventory.stock_of(id).unwrap_or(0);
        let wanted = self.lines[idx].quantity().saturating_add(1);

        let change = self.set_bounded(idx, wanted.min(stock), wanted);
        tracing::debug!(item_id = %id, ?change, "cart increment");
        change
    }

    /// Remove one unit; the line disappears when it reaches zero.
    pub fn decrement(&mut self, id: ItemId) -> CartChange {
        let Some(idx) = self.position(id) else {
            return CartChange::Unchanged;
        };
        let next = (self.lines[idx].quantity() - 1).max(0);

        let change = self.set_or_remove(idx, next);
        tracing::debug!(item_id = %id, ?change, "cart decrement");
        change
    }

    /// Delete the line for `id` if present.
    pub fn remove(&mut self, id: ItemId) -> CartChange {
        match self.position(id) {
            Some(idx) => {
                self.lines.remove(idx);
                tracing::debug!(item_id = %id, "cart line removed");
                CartChange::Removed
            }
            None => CartChange::Unchanged,
        }
    }

    /// Subtract exactly `quantity` units from a line (floored at zero).
    ///
    /// Used after a purchase to drain the purchased amount while keeping any
    /// units added to the cart since the invoice preview was taken.
    pub fn remove_quantity(&mut self, id: ItemId, quantity: i64) -> StoreResult<CartChange> {
        if quantity < 0 {
            return Err(StoreError::invalid_quantity(id, quantity));
        }
        Ok(self.drain(id, quantity))
    }

    /// Drain each purchased line's quantity, as [`Cart::remove_quantity`]
    /// does one line at a time. Negative quantities drain nothing.
    pub fn drain_purchased(&mut self, purchased: &[CartLine]) {
        for line in purchased {
            self.drain(line.item_id(), line.quantity().max(0));
        }
    }

    pub fn clear(&mut self) {
        tracing::debug!(lines = self.lines.len(), "cart cleared");
        self.lines.clear();
    }

    /// Whether a "+1" on this line would add a unit (the line exists and is
    /// below current stock).
    pub fn can_increment(&self, id: ItemId, inventory: &Inventory) -> bool {
        match (self.get(id), inventory.stock_of(id)) {
            (Some(line), Some(stock)) => line.quantity() < stock,
            _ => false,
        }
    }

    /// Whether a "-1" on this line keeps it in the cart.
    pub fn can_decrement(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|line| line.quantity() > 1)
    }

    /// Stock left on the shelf if this line were bought as-is.
    pub fn remaining_stock(&self, id: ItemId, inventory: &Inventory) -> Option<i64> {
        let line = self.get(id)?;
        let item = inventory.get_by_id(id)?;
        Some(item.remaining_after(line.quantity()))
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id() == id)
    }

    fn drain(&mut self, id: ItemId, quantity: i64) -> CartChange {
        let Some(idx) = self.position(id) else {
            return CartChange::Unchanged;
        };
        if quantity == 0 {
            return CartChange::Unchanged;
        }
        let next = (self.lines[idx].quantity() - quantity).max(0);

        let change = self.set_or_remove(idx, next);
        tracing::debug!(item_id = %id, quantity, ?change, "cart quantity drained");
        change
    }

    /// Store a stock-bounded quantity, reporting whether the bound kicked in.
    fn set_bounded(&mut self, idx: usize, bounded: i64, wanted: i64) -> CartChange {
        match self.set_or_remove(idx, bounded) {
            CartChange::Updated { quantity } if bounded < wanted => {
                CartChange::StockLimited { quantity }
            }
            change => change,
        }
    }

    fn set_or_remove(&mut self, idx: usize, quantity: i64) -> CartChange {
        if quantity < 1 {
            self.lines.remove(idx);
            CartChange::Removed
        } else {
            self.lines[idx].set_quantity(quantity);
            CartChange::Updated { quantity }
        }
    }
}
