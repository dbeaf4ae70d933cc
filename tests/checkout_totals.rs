//! Integration tests for checkout totals

use jiff::Timestamp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use smallvec::smallvec;
use testresult::TestResult;

use brewline::{
    catalog::{MenuItem, Variant},
    pricing::{PricedLine, PricingConfig, compute_totals, points_earned},
    promotions::{DiscountKind, PromoCode, PromoOutcome},
};

fn latte() -> MenuItem {
    MenuItem {
        name: "Latte".to_string(),
        base_price: dec!(4.75),
        variants: smallvec![
            Variant::new("small", Decimal::ZERO),
            Variant::new("medium", dec!(0.75)),
            Variant::new("large", dec!(1.50)),
        ],
        available: true,
    }
}

fn welcome10() -> PromoCode {
    PromoCode {
        code: "WELCOME10".to_string(),
        kind: DiscountKind::Percentage,
        value: dec!(10),
        min_order_amount: Some(dec!(5)),
        max_discount: Some(dec!(5)),
        valid_from: None,
        valid_until: None,
        usage_limit: None,
        used_count: 0,
        active: true,
    }
}

#[test]
fn two_medium_lattes_without_discounts() {
    let lines = [PricedLine::for_item(&latte(), "medium", 2)];

    let totals = compute_totals(&lines, Decimal::ZERO, 0, &PricingConfig::default());

    assert_eq!(totals.subtotal, dec!(11.00));
    assert_eq!(totals.tax, dec!(0.88));
    assert_eq!(totals.total, dec!(11.88));
    assert_eq!(totals.points_earned, 11);
}

#[test]
fn two_medium_lattes_with_welcome_code() {
    let lines = [PricedLine::for_item(&latte(), "medium", 2)];
    let promo = welcome10();

    let outcome = PromoOutcome::evaluate(Some("WELCOME10"), Some(&promo), dec!(11.00), Timestamp::now());

    let totals = compute_totals(&lines, outcome.discount(), 0, &PricingConfig::default());

    assert_eq!(totals.discount, dec!(1.10));
    assert_eq!(totals.subtotal - totals.discount, dec!(9.90));
    assert_eq!(totals.tax, dec!(0.792));
    assert_eq!(totals.total, dec!(10.692));
    assert_eq!(totals.points_earned, 10);
}

#[test]
fn redeeming_five_hundred_points_on_twenty() {
    let lines = [PricedLine {
        unit_price: dec!(5.00),
        quantity: 4,
    }];

    let totals = compute_totals(&lines, Decimal::ZERO, 500, &PricingConfig::default());

    assert_eq!(totals.subtotal, dec!(20.00));
    assert_eq!(totals.loyalty_discount, dec!(5.00));
    assert_eq!(totals.tax, dec!(1.20));
    assert_eq!(totals.total, dec!(16.20));
    assert_eq!(totals.points_earned, 16);
}

#[test]
fn plain_totals_are_subtotal_plus_tax() {
    let config = PricingConfig::default();
    let item = latte();

    for (size, quantity) in [("small", 1), ("medium", 3), ("large", 7), ("oat", 2)] {
        let lines = [PricedLine::for_item(&item, size, quantity)];
        let totals = compute_totals(&lines, Decimal::ZERO, 0, &config);

        assert_eq!(
            totals.total,
            totals.subtotal * (Decimal::ONE + config.tax_rate),
            "{quantity} x {size}"
        );
        assert_eq!(totals.points_earned, points_earned(totals.total));
    }
}

#[test]
fn computing_totals_twice_is_identical() -> TestResult {
    let lines = [
        PricedLine::for_item(&latte(), "large", 1),
        PricedLine::for_item(&latte(), "small", 2),
    ];

    let discount = welcome10().evaluate(dec!(20), Timestamp::now())?;

    let first = compute_totals(&lines, discount, 120, &PricingConfig::default());
    let second = compute_totals(&lines, discount, 120, &PricingConfig::default());

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn unknown_size_is_charged_base_price() {
    let lines = [PricedLine::for_item(&latte(), "venti", 1)];

    let totals = compute_totals(&lines, Decimal::ZERO, 0, &PricingConfig::default());

    assert_eq!(totals.subtotal, dec!(4.75));
}
