//! Money amounts in the smallest currency unit.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Non-negative amount of money, stored in cents.
///
/// Integer cents keep sums exact; the only rounding in the system happens
/// when a percentage (tax) is applied.
///
/// Serializes as a bare integer count of cents: `1.50` goes over the wire as
/// `150`. Use the `Display` impl for a decimal rendering.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);
    /// Ceiling for saturating arithmetic.
    pub const MAX: Money = Money(u64::MAX);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Convert a decimal amount (e.g. `1.5`) into cents.
    ///
    /// Rounds half away from zero on the cent boundary. Returns `None` for
    /// negative, NaN or infinite amounts.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return None;
        }
        Some(Self(cents as u64))
    }

    /// Price of `quantity` units. Non-positive quantities cost nothing.
    ///
    /// Clamps at [`Money::MAX`] instead of wrapping; use
    /// [`Money::checked_times`] to detect the clamp.
    pub fn times(self, quantity: i64) -> Self {
        let quantity = u64::try_from(quantity).unwrap_or(0);
        Self(self.0.saturating_mul(quantity))
    }

    /// Like [`Money::times`] but `None` when the product does not fit.
    pub fn checked_times(self, quantity: i64) -> Option<Self> {
        let quantity = u64::try_from(quantity).unwrap_or(0);
        self.0.checked_mul(quantity).map(Self)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// `self × basis_points / 10_000`, rounded half away from zero to the cent.
    pub fn scale_bps(self, basis_points: u32) -> Self {
        let raw = u128::from(self.0) * u128::from(basis_points);
        let rounded = (raw + 5_000) / 10_000;
        Self(u64::try_from(rounded).unwrap_or(u64::MAX))
    }
}

/// Saturating: a sum past [`Money::MAX`] stays at `MAX`.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
