use serde::{Deserialize, Serialize};

use storefront_core::Money;

/// Sales tax rate in basis points (1% = 100 bps).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

/// The storefront's flat 13% tax.
pub const TAX_RATE: TaxRate = TaxRate::from_percent(13);

impl TaxRate {
    pub const fn from_basis_points(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn from_percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    pub fn basis_points(self) -> u32 {
        self.0
    }

    /// Tax owed on `amount`, rounded to the cent (half away from zero).
    pub fn apply(self, amount: Money) -> Money {
        amount.scale_bps(self.0)
    }
}

impl core::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_thirteen_percent() {
        assert_eq!(TAX_RATE.basis_points(), 1_300);
        assert_eq!(TAX_RATE.to_string(), "13%");
    }

    #[test]
    fn fractional_rate_displays_decimals() {
        assert_eq!(TaxRate::from_basis_points(725).to_string(), "7.25%");
    }

    #[test]
    fn apply_rounds_to_cent() {
        assert_eq!(TAX_RATE.apply(Money::from_cents(300)), Money::from_cents(39));
        assert_eq!(TAX_RATE.apply(Money::ZERO), Money::ZERO);
    }
}
