//! Per-tier inventory line items and price resolution
//!
//! Both super-vendors and sub-vendors hold one line per product with the
//! assigned/sold/available accounting triple. `available = assigned - sold`
//! at all times, all three non-negative.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inventory line: (owner, product) with the stock triple and pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLine {
    pub owner_id: Uuid,
    pub product_id: Uuid,
    pub assigned_stock: i32,
    pub sold_stock: i32,
    pub available_stock: i32,
    pub discount_percentage: Decimal,
    pub markup_percentage: Decimal,
    pub custom_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryLine {
    /// Check the accounting triple invariant
    pub fn is_consistent(&self) -> bool {
        self.assigned_stock >= 0
            && self.sold_stock >= 0
            && self.available_stock >= 0
            && self.available_stock == self.assigned_stock - self.sold_stock
    }

    /// Effective unit price for this line given the product's base price
    pub fn effective_price(&self, base_price: Decimal) -> Decimal {
        resolve_price(
            base_price,
            self.discount_percentage,
            self.markup_percentage,
            self.custom_price,
        )
    }
}

/// Partial pricing update for a single inventory line
///
/// Each field is applied only when present; absent fields keep their value.
/// For `custom_price` an absent field keeps the current override while an
/// explicit JSON `null` clears it, hence the double `Option`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPricingPatch {
    pub discount_percentage: Option<Decimal>,
    pub markup_percentage: Option<Decimal>,
    #[serde(default)]
    pub custom_price: Option<Option<Decimal>>,
}

/// Derive the effective unit price for an inventory line
///
/// A custom price wins outright; otherwise the base price is discounted and
/// then marked up.
pub fn resolve_price(
    base_price: Decimal,
    discount_percentage: Decimal,
    markup_percentage: Decimal,
    custom_price: Option<Decimal>,
) -> Decimal {
    if let Some(custom) = custom_price {
        return custom;
    }
    let hundred = Decimal::from(100);
    let discounted = base_price * (hundred - discount_percentage) / hundred;
    discounted * (hundred + markup_percentage) / hundred
}

/// Price after applying a percentage discount to the base price
pub fn discounted_price(base_price: Decimal, discount_percentage: Decimal) -> Decimal {
    let hundred = Decimal::from(100);
    base_price * (hundred - discount_percentage) / hundred
}

/// Clamp a discount percentage into [0, 100]
///
/// Out-of-range discounts are clamped rather than rejected.
pub fn clamp_discount(discount_percentage: Decimal) -> Decimal {
    let hundred = Decimal::from(100);
    if discount_percentage < Decimal::ZERO {
        Decimal::ZERO
    } else if discount_percentage > hundred {
        hundred
    } else {
        discount_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_price_custom_wins() {
        let price = resolve_price(dec("1000"), dec("10"), dec("5"), Some(dec("850")));
        assert_eq!(price, dec("850"));
    }

    #[test]
    fn test_resolve_price_discount_then_markup() {
        // 1000 * 0.9 * 1.1 = 990
        let price = resolve_price(dec("1000"), dec("10"), dec("10"), None);
        assert_eq!(price, dec("990"));
    }

    #[test]
    fn test_resolve_price_no_rules() {
        let price = resolve_price(dec("1000"), Decimal::ZERO, Decimal::ZERO, None);
        assert_eq!(price, dec("1000"));
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(dec("2000"), dec("25")), dec("1500"));
    }

    #[test]
    fn test_clamp_discount() {
        assert_eq!(clamp_discount(dec("-5")), Decimal::ZERO);
        assert_eq!(clamp_discount(dec("150")), dec("100"));
        assert_eq!(clamp_discount(dec("42.5")), dec("42.5"));
    }

    #[test]
    fn test_line_consistency() {
        let now = Utc::now();
        let line = InventoryLine {
            owner_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            assigned_stock: 10,
            sold_stock: 4,
            available_stock: 6,
            discount_percentage: Decimal::ZERO,
            markup_percentage: Decimal::ZERO,
            custom_price: None,
            created_at: now,
            updated_at: now,
        };
        assert!(line.is_consistent());
    }
}
