use std::collections::HashSet;

use storefront_core::{Entity, ItemId, StoreError, StoreResult};

use crate::item::Item;
use crate::seed::{ItemSeed, SeedError};

/// Authoritative list of catalog items and their stock levels.
///
/// Items keep their seed order for display. Stock is only ever changed by
/// [`Inventory::deduct`] or its batch form [`Inventory::deduct_all`]; no
/// notification is emitted, callers re-read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Build an inventory from a seed list, validating every entry.
    pub fn from_seed(seeds: impl IntoIterator<Item = ItemSeed>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for seed in seeds {
            if !seen.insert(seed.id) {
                return Err(SeedError::DuplicateId { item_id: seed.id });
            }
            items.push(seed.into_item()?);
        }

        tracing::debug!(items = items.len(), "inventory seeded");
        Ok(Self { items })
    }

    /// Live view of every item, in seed order.
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| *item.id() == id)
    }

    pub fn stock_of(&self, id: ItemId) -> Option<i64> {
        self.get_by_id(id).map(Item::stock)
    }

    /// True iff the item exists and `1 <= quantity <= stock`.
    pub fn has_stock(&self, id: ItemId, quantity: i64) -> bool {
        self.get_by_id(id).is_some_and(|item| item.has_stock(quantity))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove `quantity` units from an item's stock and return the new level.
    ///
    /// Fails without touching stock if the item is unknown, the quantity is
    /// negative, or the quantity exceeds what is on hand.
    pub fn deduct(&mut self, id: ItemId, quantity: i64) -> StoreResult<i64> {
        let idx = self.position(id)?;
        let left = self.remaining(idx, self.items[idx].stock(), quantity)?;
        self.commit(idx, quantity, left);
        Ok(left)
    }

    /// Deduct a whole batch of `(item, quantity)` pairs, all or nothing.
    ///
    /// Every pair is checked as [`Inventory::deduct`] would check it, in
    /// order, with repeated items drawing on what earlier pairs left. The
    /// first failure is returned and no stock changes; otherwise every pair
    /// is applied.
    pub fn deduct_all(&mut self, batch: &[(ItemId, i64)]) -> StoreResult<()> {
        let mut plan: Vec<(usize, i64, i64)> = Vec::with_capacity(batch.len());
        for &(id, quantity) in batch {
            let idx = self.position(id)?;
            let available = plan
                .iter()
                .rev()
                .find(|(planned, ..)| *planned == idx)
                .map_or(self.items[idx].stock(), |&(.., left)| left);
            let left = self.remaining(idx, available, quantity)?;
            plan.push((idx, quantity, left));
        }

        for (idx, quantity, left) in plan {
            self.commit(idx, quantity, left);
        }
        Ok(())
    }

    fn position(&self, id: ItemId) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| *item.id() == id)
            .ok_or(StoreError::not_found(id))
    }

    /// Stock left after taking `quantity` out of `available`, if allowed.
    fn remaining(&self, idx: usize, available: i64, quantity: i64) -> StoreResult<i64> {
        let item = &self.items[idx];
        if quantity < 0 {
            return Err(StoreError::invalid_quantity(item.id_typed(), quantity));
        }
        if quantity > available {
            return Err(StoreError::insufficient_stock(
                item.id_typed(),
                item.name(),
                available,
                quantity,
            ));
        }
        Ok(available - quantity)
    }

    fn commit(&mut self, idx: usize, quantity: i64, left: i64) {
        let item = &mut self.items[idx];
        item.set_stock(left);
        tracing::debug!(item_id = %item.id_typed(), quantity, stock = left, "stock deducted");
    }
}
