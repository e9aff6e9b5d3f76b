//! Super-vendor models and aggregate business metrics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GeoPoint;

/// Lifecycle status of a super-vendor
///
/// The one-active-super-vendor-per-state rule is scoped to `Active`; a
/// suspended or inactive super-vendor does not block a new active one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuperVendorStatus {
    Active,
    Inactive,
    Suspended,
}

impl SuperVendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuperVendorStatus::Active => "active",
            SuperVendorStatus::Inactive => "inactive",
            SuperVendorStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SuperVendorStatus::Active),
            "inactive" => Some(SuperVendorStatus::Inactive),
            "suspended" => Some(SuperVendorStatus::Suspended),
            _ => None,
        }
    }
}

/// Pricing defaults a super-vendor stamps onto newly created sub-vendors
///
/// Copied verbatim at sub-vendor creation time; later changes to these
/// defaults do not touch existing sub-vendors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefaultPricingRules {
    pub default_discount_percentage: Decimal,
    pub default_markup_percentage: Decimal,
    pub allow_custom_pricing: bool,
    pub max_discount_percentage: Decimal,
    pub min_margin_percentage: Decimal,
}

impl Default for DefaultPricingRules {
    fn default() -> Self {
        Self {
            default_discount_percentage: Decimal::ZERO,
            default_markup_percentage: Decimal::ZERO,
            allow_custom_pricing: false,
            max_discount_percentage: Decimal::from(100),
            min_margin_percentage: Decimal::ZERO,
        }
    }
}

/// Aggregate business metrics carried on every super-vendor
///
/// `recalculate` is the single place the derived fields are recomputed;
/// services call it explicitly before persisting, never via a hidden hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BusinessMetrics {
    /// Value of sales and invoices raised directly by the super-vendor
    pub direct_business: Decimal,
    /// Rollup of active sub-vendors' own direct business
    pub sub_vendor_business: Decimal,
    pub total_business: Decimal,
    pub total_collected: Decimal,
    pub total_pending: Decimal,
    pub recovery_percentage: Decimal,
    pub direct_vehicles_sold: i32,
    pub sub_vendor_vehicles_sold: i32,
}

impl BusinessMetrics {
    /// Recompute the derived totals from the source fields
    ///
    /// `total_business = direct + sub_vendor`, `total_pending = total -
    /// collected`, `recovery = collected / total * 100` rounded to two
    /// places, 0 when there is no business yet.
    pub fn recalculate(&mut self) {
        self.total_business = self.direct_business + self.sub_vendor_business;
        self.total_pending = self.total_business - self.total_collected;
        self.recovery_percentage = if self.total_business > Decimal::ZERO {
            (self.total_collected / self.total_business * Decimal::from(100)).round_dp(2)
        } else {
            Decimal::ZERO
        };
    }
}

/// A state-level distributor that receives warehouse stock and manages
/// sub-vendors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperVendor {
    pub id: Uuid,
    pub company_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub location: Option<GeoPoint>,
    pub status: SuperVendorStatus,
    #[serde(flatten)]
    pub metrics: BusinessMetrics,
    pub total_sub_vendors: i64,
    pub pricing_rules: DefaultPricingRules,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a new super-vendor
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuperVendorInput {
    pub company_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub location: Option<GeoPoint>,
    pub pricing_rules: Option<DefaultPricingRules>,
}

/// Partial update for super-vendor identity/contact fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSuperVendorInput {
    pub company_name: Option<String>,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<GeoPoint>,
    pub status: Option<SuperVendorStatus>,
}

/// Partial update merged into a super-vendor's default pricing rules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePricingRulesInput {
    pub default_discount_percentage: Option<Decimal>,
    pub default_markup_percentage: Option<Decimal>,
    pub allow_custom_pricing: Option<bool>,
    pub max_discount_percentage: Option<Decimal>,
    pub min_margin_percentage: Option<Decimal>,
}
