use storefront_cart::{Cart, CartLine};
use storefront_core::{ItemId, StoreError, StoreResult};
use storefront_inventory::Inventory;

use crate::order::{Order, OrderHistory};
use crate::pending::PendingSale;

/// Where a checkout attempt currently stands.
///
/// `Idle -> Previewing -> {finalized | cancelled} -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    Previewing(PendingSale),
}

/// Checkout orchestrator: preview, cancel, finalize, and the order history.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    state: CheckoutState,
    history: OrderHistory,
}

impl Checkout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingSale> {
        match &self.state {
            CheckoutState::Previewing(sale) => Some(sale),
            CheckoutState::Idle => None,
        }
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.state, CheckoutState::Previewing(_))
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// Validate the cart against live stock and snapshot it for the invoice.
    ///
    /// Mutates neither `cart` nor `inventory`. Previewing again while a
    /// preview is open replaces the snapshot.
    pub fn preview(&mut self, cart: &Cart, inventory: &Inventory) -> StoreResult<PendingSale> {
        if cart.is_empty() {
            tracing::warn!("checkout rejected: cart is empty");
            return Err(StoreError::EmptyCart);
        }
        if let Err(err) = validate_lines(cart.items(), inventory) {
            tracing::warn!(error = %err, "checkout preview rejected");
            return Err(err);
        }

        let sale = PendingSale::capture(cart.items());
        tracing::info!(
            sale_id = %sale.id(),
            lines = sale.lines().len(),
            "checkout preview opened"
        );
        self.state = CheckoutState::Previewing(sale.clone());
        Ok(sale)
    }

    /// Discard the open preview, if any. The cart is left as it is.
    pub fn cancel_preview(&mut self) -> Option<PendingSale> {
        match std::mem::take(&mut self.state) {
            CheckoutState::Previewing(sale) => {
                tracing::info!(sale_id = %sale.id(), "checkout preview cancelled");
                Some(sale)
            }
            CheckoutState::Idle => None,
        }
    }

    /// Commit the previewed sale.
    ///
    /// The whole snapshot is deducted as one batch: every line is re-checked
    /// against live stock first, and if any line fails nothing is deducted
    /// and the preview stays open. On success exactly the snapshot
    /// quantities are drained from the cart (units added after the preview
    /// stay), and the resulting order is appended to the history.
    pub fn finalize(
        &mut self,
        sale: &PendingSale,
        apply_tax: bool,
        inventory: &mut Inventory,
        cart: &mut Cart,
    ) -> StoreResult<Order> {
        let pending = match std::mem::take(&mut self.state) {
            CheckoutState::Previewing(pending) if pending.id() == sale.id() => pending,
            other => {
                tracing::warn!(sale_id = %sale.id(), "finalize rejected: sale is not being previewed");
                self.state = other;
                return Err(StoreError::NoPendingSale);
            }
        };

        let batch: Vec<(ItemId, i64)> = pending
            .lines()
            .iter()
            .map(|line| (line.item_id(), line.quantity()))
            .collect();
        if let Err(err) = inventory.deduct_all(&batch) {
            tracing::warn!(sale_id = %pending.id(), error = %err, "finalize rejected");
            self.state = CheckoutState::Previewing(pending);
            return Err(err);
        }
        cart.drain_purchased(pending.lines());

        let totals = pending.totals(apply_tax);
        let order = Order::new(pending.into_lines(), apply_tax, totals);
        tracing::info!(
            order_id = %order.id(),
            tax_applied = apply_tax,
            subtotal = %totals.subtotal,
            tax = %totals.tax,
            total = %totals.total,
            "order finalized"
        );

        self.history.append(order.clone());
        Ok(order)
    }
}

/// Every line must reference a known item with at least `quantity` in stock.
fn validate_lines(lines: &[CartLine], inventory: &Inventory) -> StoreResult<()> {
    for line in lines {
        let item = inventory
            .get_by_id(line.item_id())
            .ok_or(StoreError::not_found(line.item_id()))?;
        if line.quantity() > item.stock() {
            return Err(StoreError::insufficient_stock(
                item.id_typed(),
                item.name(),
                item.stock(),
                line.quantity(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storefront_core::{ItemId, Money};
    use storefront_inventory::{ItemSeed, default_catalog};

    fn inventory() -> Inventory {
        Inventory::from_seed(default_catalog()).unwrap()
    }

    fn id(raw: u32) -> ItemId {
        ItemId::new(raw)
    }

    fn add(cart: &mut Cart, inv: &Inventory, raw: u32, qty: i64) {
        let item = inv.get_by_id(id(raw)).unwrap().clone();
        cart.add(&item, qty);
    }

    #[test]
    fn preview_of_empty_cart_fails() {
        let inv = inventory();
        let mut checkout = Checkout::new();
        assert_eq!(
            checkout.preview(&Cart::new(), &inv),
            Err(StoreError::EmptyCart)
        );
        assert_eq!(checkout.state(), &CheckoutState::Idle);
    }

    #[test]
    fn preview_snapshots_without_mutating() {
        let inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);
        let inv_before = inv.clone();
        let cart_before = cart.clone();

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();

        assert_eq!(sale.lines(), cart.items());
        assert_eq!(inv, inv_before);
        assert_eq!(cart, cart_before);
        assert_eq!(checkout.pending(), Some(&sale));
    }

    #[test]
    fn preview_detects_stock_drift() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 9, 5);
        inv.deduct(id(9), 4).unwrap();

        let mut checkout = Checkout::new();
        assert_eq!(
            checkout.preview(&cart, &inv),
            Err(StoreError::insufficient_stock(id(9), "Banana Split", 3, 5))
        );
        assert!(!checkout.is_previewing());
    }

    #[test]
    fn preview_detects_vanished_item() {
        let full = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &full, 2, 1);

        let other = Inventory::from_seed(vec![ItemSeed::new(1, "Helado Vainilla", 1.5, 10)]).unwrap();
        let mut checkout = Checkout::new();
        assert_eq!(
            checkout.preview(&cart, &other),
            Err(StoreError::not_found(id(2)))
        );
    }

    #[test]
    fn snapshot_is_decoupled_from_live_cart() {
        let inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        add(&mut cart, &inv, 1, 3);
        add(&mut cart, &inv, 4, 1);

        assert_eq!(sale.lines().len(), 1);
        assert_eq!(sale.lines()[0].quantity(), 2);
        assert_eq!(sale.totals(false).subtotal, Money::from_cents(300));
    }

    #[test]
    fn cancel_preview_returns_to_idle_and_keeps_cart() {
        let inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        assert_eq!(checkout.cancel_preview(), Some(sale));
        assert_eq!(checkout.state(), &CheckoutState::Idle);
        assert_eq!(cart.len(), 1);
        assert_eq!(checkout.cancel_preview(), None);
    }

    #[test]
    fn finalize_deducts_drains_and_records() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        let order = checkout.finalize(&sale, true, &mut inv, &mut cart).unwrap();

        assert_eq!(inv.stock_of(id(1)), Some(8));
        assert!(cart.is_empty());
        assert_eq!(order.totals().subtotal, Money::from_cents(300));
        assert_eq!(order.totals().tax, Money::from_cents(39));
        assert_eq!(order.totals().total, Money::from_cents(339));
        assert!(order.tax_applied());
        assert_eq!(checkout.history().len(), 1);
        assert_eq!(checkout.history().last(), Some(&order));
        assert_eq!(checkout.state(), &CheckoutState::Idle);
        assert!(sale.captured_at() <= order.timestamp());
    }

    #[test]
    fn finalize_keeps_units_added_during_preview() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        add(&mut cart, &inv, 1, 3);
        add(&mut cart, &inv, 3, 4);

        checkout.finalize(&sale, false, &mut inv, &mut cart).unwrap();

        assert_eq!(inv.stock_of(id(1)), Some(8));
        assert_eq!(inv.stock_of(id(3)), Some(25));
        assert_eq!(cart.get(id(1)).unwrap().quantity(), 3);
        assert_eq!(cart.get(id(3)).unwrap().quantity(), 4);
    }

    #[test]
    fn finalize_handles_lines_removed_during_preview() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        cart.remove(id(1));

        let order = checkout.finalize(&sale, false, &mut inv, &mut cart).unwrap();
        assert_eq!(order.items()[0].quantity(), 2);
        assert_eq!(inv.stock_of(id(1)), Some(8));
        assert!(cart.is_empty());
    }

    #[test]
    fn finalize_without_preview_is_rejected() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        checkout.cancel_preview();

        assert_eq!(
            checkout.finalize(&sale, false, &mut inv, &mut cart),
            Err(StoreError::NoPendingSale)
        );
        assert_eq!(inv.stock_of(id(1)), Some(10));
    }

    #[test]
    fn finalize_with_stale_snapshot_is_rejected() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);

        let mut checkout = Checkout::new();
        let stale = checkout.preview(&cart, &inv).unwrap();
        let current = checkout.preview(&cart, &inv).unwrap();

        assert_eq!(
            checkout.finalize(&stale, false, &mut inv, &mut cart),
            Err(StoreError::NoPendingSale)
        );
        assert_eq!(checkout.pending(), Some(&current));
        assert!(checkout.finalize(&current, false, &mut inv, &mut cart).is_ok());
    }

    #[test]
    fn finalize_is_all_or_nothing() {
        let mut inv = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, 2);
        add(&mut cart, &inv, 9, 5);
        add(&mut cart, &inv, 3, 4);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &inv).unwrap();
        // Stock for the second line drifts while the invoice is on screen.
        inv.deduct(id(9), 3).unwrap();

        let err = checkout.finalize(&sale, true, &mut inv, &mut cart).unwrap_err();
        assert_eq!(
            err,
            StoreError::insufficient_stock(id(9), "Banana Split", 4, 5)
        );
        assert_eq!(inv.stock_of(id(1)), Some(10));
        assert_eq!(inv.stock_of(id(9)), Some(4));
        assert_eq!(inv.stock_of(id(3)), Some(25));
        assert_eq!(cart.len(), 3);
        assert!(checkout.history().is_empty());
        assert_eq!(checkout.pending(), Some(&sale));
    }

    #[test]
    fn finalize_reports_missing_item_and_keeps_preview() {
        let full = inventory();
        let mut cart = Cart::new();
        add(&mut cart, &full, 1, 2);
        add(&mut cart, &full, 2, 1);

        let mut checkout = Checkout::new();
        let sale = checkout.preview(&cart, &full).unwrap();
        let cart_before = cart.clone();

        let mut other = Inventory::from_seed(vec![ItemSeed::new(1, "Helado Vainilla", 1.5, 10)]).unwrap();
        assert_eq!(
            checkout.finalize(&sale, true, &mut other, &mut cart),
            Err(StoreError::not_found(id(2)))
        );
        assert_eq!(other.stock_of(id(1)), Some(10));
        assert_eq!(cart, cart_before);
        assert!(checkout.history().is_empty());
        assert_eq!(checkout.pending(), Some(&sale));
    }

    #[test]
    fn preview_of_huge_quantities_does_not_overflow() {
        let stock = 5_000_000_000_000_000_000;
        let inv = Inventory::from_seed(vec![
            ItemSeed::new(1, "Bulk A", 0.01, stock),
            ItemSeed::new(2, "Bulk B", 0.01, stock),
        ])
        .unwrap();
        let mut cart = Cart::new();
        add(&mut cart, &inv, 1, stock);
        add(&mut cart, &inv, 2, stock);

        let mut checkout = Checkout::new();
        let subscriber = storefront_observability::json_subscriber("info");
        let sale = tracing::subscriber::with_default(subscriber, || {
            checkout.preview(&cart, &inv).unwrap()
        });
        assert_eq!(sale.lines().len(), 2);
        assert_eq!(sale.total_units(), None);
    }

    proptest! {
        /// Property: a failed finalize leaves inventory, cart and history
        /// untouched; a successful one deducts exactly the snapshot.
        #[test]
        fn finalize_is_atomic(
            picks in prop::collection::vec((1u32..=15u32, 1i64..8i64), 1..6),
            drift in prop::collection::vec((1u32..=15u32, 0i64..10i64), 0..4)
        ) {
            let mut inv = inventory();
            let mut cart = Cart::new();
            for (raw, qty) in picks {
                add(&mut cart, &inv, raw, qty);
            }

            let mut checkout = Checkout::new();
            let sale = checkout.preview(&cart, &inv).unwrap();
            for (raw, qty) in drift {
                let _ = inv.deduct(id(raw), qty);
            }

            let inv_before = inv.clone();
            let cart_before = cart.clone();

            match checkout.finalize(&sale, true, &mut inv, &mut cart) {
                Ok(order) => {
                    for line in sale.lines() {
                        prop_assert_eq!(
                            inv.stock_of(line.item_id()).unwrap(),
                            inv_before.stock_of(line.item_id()).unwrap() - line.quantity()
                        );
                    }
                    prop_assert!(cart.is_empty());
                    prop_assert_eq!(order.totals(), sale.totals(true));
                    prop_assert_eq!(checkout.history().len(), 1);
                }
                Err(_) => {
                    prop_assert_eq!(&inv, &inv_before);
                    prop_assert_eq!(&cart, &cart_before);
                    prop_assert!(checkout.history().is_empty());
                }
            }
        }
    }
}
