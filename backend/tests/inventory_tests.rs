//! Inventory allocation tests
//!
//! Covers the stock accounting triple across tiers:
//! - available = assigned - sold, all non-negative
//! - assignment accumulates rather than overwrites
//! - transfers conserve total units between tiers

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{clamp_discount, resolve_price, InventoryLine};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn line(assigned: i32, sold: i32) -> InventoryLine {
    let now = chrono::Utc::now();
    InventoryLine {
        owner_id: uuid::Uuid::new_v4(),
        product_id: uuid::Uuid::new_v4(),
        assigned_stock: assigned,
        sold_stock: sold,
        available_stock: assigned - sold,
        discount_percentage: Decimal::ZERO,
        markup_percentage: Decimal::ZERO,
        custom_price: None,
        created_at: now,
        updated_at: now,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The accounting triple holds on a fresh assignment
    #[test]
    fn test_fresh_assignment_is_consistent() {
        let line = line(50, 0);
        assert!(line.is_consistent());
        assert_eq!(line.available_stock, 50);
    }

    /// Repeated assignment accumulates assigned and available equally
    #[test]
    fn test_assignment_accumulates() {
        let mut line = line(50, 10);
        // Second allocation of 30 units
        line.assigned_stock += 30;
        line.available_stock += 30;
        assert!(line.is_consistent());
        assert_eq!(line.assigned_stock, 80);
        assert_eq!(line.available_stock, 70);
        assert_eq!(line.sold_stock, 10);
    }

    /// A transfer is a sale at the source tier and an assignment at the
    /// destination tier; units are conserved
    #[test]
    fn test_transfer_conserves_units() {
        let mut source = line(100, 20);
        let mut dest = line(0, 0);
        let qty = 30;

        let units_before = source.available_stock + dest.available_stock;

        source.available_stock -= qty;
        source.sold_stock += qty;
        dest.assigned_stock += qty;
        dest.available_stock += qty;

        assert!(source.is_consistent());
        assert!(dest.is_consistent());
        assert_eq!(
            source.available_stock + dest.available_stock,
            units_before
        );
        assert_eq!(source.sold_stock, 50);
        assert_eq!(dest.assigned_stock, 30);
    }

    /// Selling more than available is never a valid state
    #[test]
    fn test_oversell_breaks_consistency() {
        let mut line = line(10, 0);
        line.available_stock -= 15;
        line.sold_stock += 15;
        assert!(!line.is_consistent());
    }

    /// Removing a line returns only the unsold units upstream
    #[test]
    fn test_removal_returns_available_only() {
        let line = line(100, 60);
        let mut warehouse_stock = 500;
        warehouse_stock += line.available_stock;
        assert_eq!(warehouse_stock, 540);
    }

    /// Discount clamps to [0, 100] instead of erroring
    #[test]
    fn test_discount_clamped() {
        assert_eq!(clamp_discount(dec("-10")), Decimal::ZERO);
        assert_eq!(clamp_discount(dec("250")), dec("100"));
        assert_eq!(clamp_discount(dec("15")), dec("15"));
    }

    /// Assignment computes the discounted price from the base price
    #[test]
    fn test_assignment_price() {
        // base 100000, 10% discount, no markup
        let final_price = resolve_price(dec("100000"), dec("10"), Decimal::ZERO, None);
        assert_eq!(final_price, dec("90000"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Any assign-then-transfer-then-sell sequence keeps every line
    /// consistent and conserves units across the two tiers
    #[test]
    fn prop_stock_triple_invariant(
        assigned in 1i32..10_000,
        transfer in 0i32..10_000,
        sold in 0i32..10_000,
    ) {
        let transfer = transfer.min(assigned);
        let mut source = line(assigned, 0);
        let mut dest = line(0, 0);

        source.available_stock -= transfer;
        source.sold_stock += transfer;
        dest.assigned_stock += transfer;
        dest.available_stock += transfer;

        let sold = sold.min(dest.available_stock);
        dest.available_stock -= sold;
        dest.sold_stock += sold;

        prop_assert!(source.is_consistent());
        prop_assert!(dest.is_consistent());
        // Unsold units across both tiers equal the original allocation
        prop_assert_eq!(
            source.available_stock + dest.available_stock + sold,
            assigned
        );
    }

    /// Clamped discounts always land in [0, 100]
    #[test]
    fn prop_clamp_discount_range(raw in -1_000i64..1_000) {
        let clamped = clamp_discount(Decimal::from(raw));
        prop_assert!(clamped >= Decimal::ZERO);
        prop_assert!(clamped <= Decimal::from(100));
    }

    /// With a clamped discount and non-negative markup, the resolved price
    /// is never negative
    #[test]
    fn prop_resolved_price_non_negative(
        base in 0i64..10_000_000,
        discount in 0i64..=100,
        markup in 0i64..200,
    ) {
        let price = resolve_price(
            Decimal::from(base),
            Decimal::from(discount),
            Decimal::from(markup),
            None,
        );
        prop_assert!(price >= Decimal::ZERO);
    }
}
