use serde::{Deserialize, Serialize};

use storefront_core::{Money, ValueObject};

use crate::tax::{TAX_RATE, TaxRate};

/// Anything that can be priced as `unit_price × quantity`.
///
/// Implemented by cart lines; snapshot and order lines reuse the same type.
/// Lines are value objects: pricing never depends on which line instance it
/// is handed, only on its price and quantity.
pub trait LineItem: ValueObject {
    fn unit_price(&self) -> Money;
    fn quantity(&self) -> i64;
}

impl<T: LineItem> LineItem for &T {
    fn unit_price(&self) -> Money {
        (**self).unit_price()
    }

    fn quantity(&self) -> i64 {
        (**self).quantity()
    }
}

/// Invoice totals, all in cents (each field serializes as an integer cent count).
///
/// Invariant: `subtotal + tax == total`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl ValueObject for Totals {}

impl Totals {
    pub const ZERO: Totals = Totals {
        subtotal: Money::ZERO,
        tax: Money::ZERO,
        total: Money::ZERO,
    };
}

/// Price of a single line (`unit_price × quantity`).
pub fn line_subtotal<L: LineItem>(line: &L) -> Money {
    line.unit_price().times(line.quantity())
}

/// Compute totals at the storefront's tax rate.
pub fn compute_totals<L: LineItem>(lines: &[L], apply_tax: bool) -> Totals {
    compute_totals_with_rate(lines, TAX_RATE, apply_tax)
}

/// Compute totals at an explicit tax rate.
///
/// Subtotal and tax are each rounded to the cent before being summed, so the
/// displayed `subtotal + tax` always equals the displayed `total`. Amounts
/// past [`Money::MAX`] clamp there (see [`Money::times`]); the law still
/// holds because `Money` addition saturates the same way.
pub fn compute_totals_with_rate<L: LineItem>(lines: &[L], rate: TaxRate, apply_tax: bool) -> Totals {
    let subtotal: Money = lines.iter().map(line_subtotal).sum();
    let tax = if apply_tax { rate.apply(subtotal) } else { Money::ZERO };

    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}
