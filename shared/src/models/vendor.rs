//! Vendor (sub-vendor / direct) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GeoPoint;

use super::DefaultPricingRules;

/// Affiliation of a vendor
///
/// `SubVendor` implies a non-null `super_vendor_id`; `Direct` implies null.
/// The two fields are always written together.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VendorType {
    Direct,
    SubVendor,
}

impl VendorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorType::Direct => "direct",
            VendorType::SubVendor => "sub_vendor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "direct" => Some(VendorType::Direct),
            "sub_vendor" => Some(VendorType::SubVendor),
            _ => None,
        }
    }
}

/// Lifecycle status of a vendor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Active,
    Inactive,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Active => "active",
            VendorStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(VendorStatus::Active),
            "inactive" => Some(VendorStatus::Inactive),
            _ => None,
        }
    }
}

/// A vendor, either direct or affiliated with one super-vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub location: Option<GeoPoint>,
    pub vendor_type: VendorType,
    pub super_vendor_id: Option<Uuid>,
    pub status: VendorStatus,
    pub direct_business: Decimal,
    pub vehicles_sold: i32,
    /// Snapshot of the super-vendor's defaults at creation time
    pub pricing_rules: DefaultPricingRules,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    /// Back-reference and type must agree
    pub fn hierarchy_is_consistent(&self) -> bool {
        match self.vendor_type {
            VendorType::SubVendor => self.super_vendor_id.is_some(),
            VendorType::Direct => self.super_vendor_id.is_none(),
        }
    }
}

/// Input for creating a sub-vendor under a super-vendor
///
/// The new vendor inherits the super-vendor's state and default pricing
/// rules; a `state` that disagrees with the super-vendor's is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubVendorInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: Option<String>,
    pub location: Option<GeoPoint>,
}

/// Input for attaching existing vendors to a super-vendor
#[derive(Debug, Clone, Deserialize)]
pub struct AssignVendorsInput {
    pub vendor_ids: Vec<Uuid>,
}

/// Input for detaching a single sub-vendor
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveVendorInput {
    pub vendor_id: Uuid,
}
