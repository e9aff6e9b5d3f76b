//! Pricing rule resolution tests
//!
//! Covers:
//! - effective price derivation (custom price wins, else discount then markup)
//! - partial pricing patches (absent fields keep their value, an explicit
//!   null clears the custom-price override)
//! - default rule inheritance at sub-vendor creation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{
    clamp_discount, discounted_price, resolve_price, DefaultPricingRules, ProductPricingPatch,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Mirror of the service-side merge: patch fields win, absent fields keep
/// the existing line values
fn apply_patch(
    existing: (Decimal, Decimal, Option<Decimal>),
    patch: &ProductPricingPatch,
) -> (Decimal, Decimal, Option<Decimal>) {
    (
        patch
            .discount_percentage
            .map(clamp_discount)
            .unwrap_or(existing.0),
        patch.markup_percentage.unwrap_or(existing.1),
        patch.custom_price.unwrap_or(existing.2),
    )
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Custom price short-circuits discount and markup
    #[test]
    fn test_custom_price_wins() {
        let price = resolve_price(dec("120000"), dec("15"), dec("8"), Some(dec("99999")));
        assert_eq!(price, dec("99999"));
    }

    /// Discount is applied before markup
    #[test]
    fn test_discount_then_markup_order() {
        // 80000 * 0.75 = 60000, then * 1.2 = 72000
        let price = resolve_price(dec("80000"), dec("25"), dec("20"), None);
        assert_eq!(price, dec("72000"));

        // Same rates applied in the other order would give 72000 as well for
        // multiplication, so pin the intermediate too
        assert_eq!(discounted_price(dec("80000"), dec("25")), dec("60000"));
    }

    /// Patch with only a discount leaves markup and custom price alone
    #[test]
    fn test_partial_patch_discount_only() {
        let existing = (dec("10"), dec("5"), Some(dec("500")));
        let patch = ProductPricingPatch {
            discount_percentage: Some(dec("20")),
            markup_percentage: None,
            custom_price: None,
        };
        let (discount, markup, custom) = apply_patch(existing, &patch);
        assert_eq!(discount, dec("20"));
        assert_eq!(markup, dec("5"));
        assert_eq!(custom, Some(dec("500")));
    }

    /// Out-of-range discount in a patch is clamped, not rejected
    #[test]
    fn test_patch_clamps_discount() {
        let existing = (dec("10"), Decimal::ZERO, None);
        let patch = ProductPricingPatch {
            discount_percentage: Some(dec("180")),
            markup_percentage: None,
            custom_price: None,
        };
        let (discount, _, _) = apply_patch(existing, &patch);
        assert_eq!(discount, dec("100"));
    }

    /// Empty patch is a no-op
    #[test]
    fn test_empty_patch_noop() {
        let existing = (dec("12.5"), dec("3"), None);
        let patch = ProductPricingPatch::default();
        assert_eq!(apply_patch(existing, &patch), existing);
    }

    /// An explicit null clears the custom-price override so rule-derived
    /// pricing applies again; an absent field keeps it
    #[test]
    fn test_null_custom_price_clears_override() {
        let existing = (dec("10"), dec("5"), Some(dec("99999")));

        let clearing = ProductPricingPatch {
            discount_percentage: None,
            markup_percentage: None,
            custom_price: Some(None),
        };
        let (discount, markup, custom) = apply_patch(existing, &clearing);
        assert_eq!(custom, None);
        assert_eq!(
            resolve_price(dec("100000"), discount, markup, custom),
            dec("94500")
        );

        let keeping = ProductPricingPatch {
            discount_percentage: None,
            markup_percentage: None,
            custom_price: None,
        };
        let (_, _, custom) = apply_patch(existing, &keeping);
        assert_eq!(custom, Some(dec("99999")));
    }

    /// New sub-vendors inherit the defaults verbatim
    #[test]
    fn test_default_rules_inherited() {
        let defaults = DefaultPricingRules {
            default_discount_percentage: dec("7.5"),
            default_markup_percentage: dec("2"),
            allow_custom_pricing: true,
            max_discount_percentage: dec("25"),
            min_margin_percentage: dec("5"),
        };
        let inherited = defaults.clone();
        assert_eq!(inherited, defaults);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// A 100% discount always yields zero regardless of markup
    #[test]
    fn prop_full_discount_zeroes_price(
        base in 0i64..10_000_000,
        markup in 0i64..500,
    ) {
        let price = resolve_price(
            Decimal::from(base),
            dec("100"),
            Decimal::from(markup),
            None,
        );
        prop_assert_eq!(price, Decimal::ZERO);
    }

    /// Resolution with a custom price ignores every other input
    #[test]
    fn prop_custom_price_ignores_rules(
        base in 0i64..10_000_000,
        discount in 0i64..=100,
        markup in 0i64..500,
        custom in 0i64..10_000_000,
    ) {
        let price = resolve_price(
            Decimal::from(base),
            Decimal::from(discount),
            Decimal::from(markup),
            Some(Decimal::from(custom)),
        );
        prop_assert_eq!(price, Decimal::from(custom));
    }

    /// Applying a patch twice gives the same result as once
    #[test]
    fn prop_patch_idempotent(
        discount in proptest::option::of(0i64..=200),
        markup in proptest::option::of(0i64..100),
        custom in proptest::option::of(proptest::option::of(1i64..1_000_000)),
    ) {
        let existing = (dec("10"), dec("5"), Some(dec("750")));
        let patch = ProductPricingPatch {
            discount_percentage: discount.map(Decimal::from),
            markup_percentage: markup.map(Decimal::from),
            custom_price: custom.map(|c| c.map(Decimal::from)),
        };
        let once = apply_patch(existing, &patch);
        let twice = apply_patch(once.clone(), &patch);
        prop_assert_eq!(once, twice);
    }
}
