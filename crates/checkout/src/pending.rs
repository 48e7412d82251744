use chrono::{DateTime, Utc};
use serde::Serialize;

use storefront_cart::CartLine;
use storefront_core::SaleId;
use storefront_pricing::{Totals, compute_totals};

/// Immutable snapshot of the cart taken when the invoice preview opens.
///
/// The lines are owned copies, so edits to the live cart while the preview is
/// on screen never change what the invoice shows or what gets purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSale {
    id: SaleId,
    captured_at: DateTime<Utc>,
    lines: Vec<CartLine>,
}

impl PendingSale {
    pub(crate) fn capture(lines: &[CartLine]) -> Self {
        Self {
            id: SaleId::new(),
            captured_at: Utc::now(),
            lines: lines.to_vec(),
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Units being bought; `None` when the count does not fit in an `i64`.
    pub fn total_units(&self) -> Option<i64> {
        self.lines
            .iter()
            .try_fold(0i64, |units, line| units.checked_add(line.quantity()))
    }

    /// Invoice totals for this snapshot; the preview toggles `apply_tax` freely.
    pub fn totals(&self, apply_tax: bool) -> Totals {
        compute_totals(&self.lines, apply_tax)
    }

    pub(crate) fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }
}
