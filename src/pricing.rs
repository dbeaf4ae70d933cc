//! Pricing
//!
//! Deterministic checkout totals. Everything here is pure: the same lines,
//! promo discount and redeemed points always produce the same totals.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_decimal_macros::dec;

use crate::catalog::MenuItem;

/// Largest unit price the catalog accepts.
///
/// Keeps every line total and subtotal far inside the range of [`Decimal`].
pub const MAX_UNIT_PRICE: Decimal = dec!(100000);

/// Rates used by [`compute_totals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Tax charged on the discounted subtotal.
    pub tax_rate: Decimal,

    /// Currency value of a single loyalty point.
    pub points_redemption_rate: Decimal,
}

impl PricingConfig {
    /// Tax rate applied when none is configured.
    pub const DEFAULT_TAX_RATE: Decimal = dec!(0.08);

    /// Value of one point when none is configured (100 points = 1 unit).
    pub const DEFAULT_POINTS_REDEMPTION_RATE: Decimal = dec!(0.01);
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            points_redemption_rate: Self::DEFAULT_POINTS_REDEMPTION_RATE,
        }
    }
}

/// A cart line priced against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Base price plus variant modifier.
    pub unit_price: Decimal,

    /// Units ordered.
    pub quantity: u32,
}

impl PricedLine {
    /// Price a line for a menu item and requested size.
    pub fn for_item(item: &MenuItem, size: &str, quantity: u32) -> Self {
        Self {
            unit_price: item.unit_price(size),
            quantity,
        }
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Totals of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Discount from the promo code.
    pub promo_discount: Decimal,

    /// Discount from redeemed loyalty points.
    pub loyalty_discount: Decimal,

    /// `promo_discount + loyalty_discount`.
    pub discount: Decimal,

    /// Tax on the discounted subtotal, never negative.
    pub tax: Decimal,

    /// `subtotal - discount + tax`.
    pub total: Decimal,

    /// Points redeemed against this checkout.
    pub points_used: u32,

    /// Whole currency units of `total`, zero when `total` is negative.
    pub points_earned: u32,
}

/// Sum of line totals.
pub fn subtotal(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(PricedLine::line_total).sum()
}

/// Compute checkout totals.
///
/// `points_used` must already have been checked against the customer's
/// balance.
pub fn compute_totals(
    lines: &[PricedLine],
    promo_discount: Decimal,
    points_used: u32,
    config: &PricingConfig,
) -> CheckoutTotals {
    let subtotal = subtotal(lines);
    let loyalty_discount = Decimal::from(points_used) * config.points_redemption_rate;
    let discount = promo_discount + loyalty_discount;
    let taxable = (subtotal - discount).max(Decimal::ZERO);
    let tax = taxable * config.tax_rate;
    let total = subtotal - discount + tax;

    CheckoutTotals {
        subtotal,
        promo_discount,
        loyalty_discount,
        discount,
        tax,
        total,
        points_used,
        points_earned: points_earned(total),
    }
}

/// One point per whole currency unit charged, saturating at `u32::MAX`.
pub fn points_earned(total: Decimal) -> u32 {
    if total <= Decimal::ZERO {
        return 0;
    }

    total.floor().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> [PricedLine; 2] {
        [
            PricedLine {
                unit_price: dec!(5.50),
                quantity: 2,
            },
            PricedLine {
                unit_price: dec!(3.25),
                quantity: 1,
            },
        ]
    }

    #[test]
    fn subtotal_sums_line_totals() {
        assert_eq!(subtotal(&lines()), dec!(14.25));
    }

    #[test]
    fn subtotal_of_no_lines_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn totals_without_discounts_add_tax() {
        let totals = compute_totals(&lines(), Decimal::ZERO, 0, &PricingConfig::default());

        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.tax, dec!(1.14));
        assert_eq!(totals.total, dec!(15.39));
        assert_eq!(totals.points_earned, 15);
    }

    #[test]
    fn loyalty_points_use_redemption_rate() {
        let config = PricingConfig {
            points_redemption_rate: dec!(0.05),
            ..PricingConfig::default()
        };

        let totals = compute_totals(&lines(), Decimal::ZERO, 20, &config);

        assert_eq!(totals.loyalty_discount, dec!(1.00));
        assert_eq!(totals.points_used, 20);
    }

    #[test]
    fn oversized_discount_floors_tax_at_zero() {
        let totals = compute_totals(&lines(), dec!(20), 0, &PricingConfig::default());

        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, dec!(-5.75));
        assert_eq!(totals.points_earned, 0);
    }

    #[test]
    fn custom_tax_rate_is_used() {
        let config = PricingConfig {
            tax_rate: dec!(0.2),
            ..PricingConfig::default()
        };

        let totals = compute_totals(&lines(), Decimal::ZERO, 0, &config);

        assert_eq!(totals.tax, dec!(2.85));
    }

    #[test]
    fn points_earned_truncates_fraction() {
        assert_eq!(points_earned(dec!(11.99)), 11);
        assert_eq!(points_earned(dec!(0.99)), 0);
        assert_eq!(points_earned(dec!(-0.5)), 0);
    }

    #[test]
    fn points_earned_saturates_on_huge_totals() {
        assert_eq!(points_earned(dec!(4294967295.99)), u32::MAX);
        assert_eq!(points_earned(dec!(10000000000)), u32::MAX);
    }

    #[test]
    fn largest_lines_stay_in_range() {
        let line = PricedLine {
            unit_price: MAX_UNIT_PRICE,
            quantity: u32::MAX,
        };

        let totals = compute_totals(&[line; 64], Decimal::ZERO, u32::MAX, &PricingConfig::default());

        assert_eq!(totals.subtotal, MAX_UNIT_PRICE * Decimal::from(u32::MAX) * dec!(64));
        assert_eq!(totals.points_earned, u32::MAX);
    }
}
