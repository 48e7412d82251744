use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_cart::CartLine;
use storefront_core::OrderId;
use storefront_pricing::Totals;

/// Finalized purchase record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    timestamp: DateTime<Utc>,
    items: Vec<CartLine>,
    tax_applied: bool,
    totals: Totals,
}

impl Order {
    pub(crate) fn new(items: Vec<CartLine>, tax_applied: bool, totals: Totals) -> Self {
        Self {
            id: OrderId::new(),
            timestamp: Utc::now(),
            items,
            tax_applied,
            totals,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn tax_applied(&self) -> bool {
        self.tax_applied
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

/// Append-only list of finalized orders for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub(crate) fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    pub fn last(&self) -> Option<&Order> {
        self.orders.last()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderHistory {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
