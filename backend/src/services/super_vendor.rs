//! Vendor hierarchy management service
//!
//! Owns super-vendor lifecycle, sub-vendor assignment/removal with
//! state-locality enforcement, pricing-rule inheritance, and the aggregate
//! metrics recomputation every other mutating service funnels through.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    AssignVendorsInput, BusinessMetrics, CreateSubVendorInput, CreateSuperVendorInput,
    DefaultPricingRules, SuperVendor, SuperVendorStatus, UpdatePricingRulesInput,
    UpdateSuperVendorInput, Vendor, VendorStatus, VendorType,
};
use shared::types::GeoPoint;
use shared::validation;

/// Hierarchy management service
#[derive(Clone)]
pub struct SuperVendorService {
    db: PgPool,
}

/// Aggregate summary returned alongside the super-vendor list
#[derive(Debug, Serialize)]
pub struct FleetSummary {
    pub total_super_vendors: i64,
    pub active_super_vendors: i64,
    pub total_business: Decimal,
    pub total_collected: Decimal,
    pub total_pending: Decimal,
    pub average_recovery_percentage: Decimal,
}

/// Super-vendor detail with its sub-vendors populated
#[derive(Debug, Serialize)]
pub struct SuperVendorDetail {
    #[serde(flatten)]
    pub super_vendor: SuperVendor,
    pub sub_vendors: Vec<Vendor>,
}

const SELECT_SUPER_VENDOR: &str = r#"
    SELECT id, company_name, owner_name, email, phone, state, latitude, longitude,
           status, direct_business, sub_vendor_business, total_business,
           total_collected, total_pending, recovery_percentage,
           direct_vehicles_sold, sub_vendor_vehicles_sold,
           default_discount_percentage, default_markup_percentage,
           allow_custom_pricing, max_discount_percentage, min_margin_percentage,
           created_by, created_at, updated_at,
           (SELECT COUNT(*) FROM vendors v WHERE v.super_vendor_id = super_vendors.id)
               AS total_sub_vendors
    FROM super_vendors
"#;

#[derive(Debug, FromRow)]
pub(crate) struct SuperVendorRow {
    id: Uuid,
    company_name: String,
    owner_name: String,
    email: String,
    phone: String,
    state: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    status: String,
    direct_business: Decimal,
    sub_vendor_business: Decimal,
    total_business: Decimal,
    total_collected: Decimal,
    total_pending: Decimal,
    recovery_percentage: Decimal,
    direct_vehicles_sold: i32,
    sub_vendor_vehicles_sold: i32,
    default_discount_percentage: Decimal,
    default_markup_percentage: Decimal,
    allow_custom_pricing: bool,
    max_discount_percentage: Decimal,
    min_margin_percentage: Decimal,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    total_sub_vendors: i64,
}

impl SuperVendorRow {
    pub(crate) fn into_model(self) -> AppResult<SuperVendor> {
        let status = SuperVendorStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown status: {}", self.status)))?;
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };
        Ok(SuperVendor {
            id: self.id,
            company_name: self.company_name,
            owner_name: self.owner_name,
            email: self.email,
            phone: self.phone,
            state: self.state,
            location,
            status,
            metrics: BusinessMetrics {
                direct_business: self.direct_business,
                sub_vendor_business: self.sub_vendor_business,
                total_business: self.total_business,
                total_collected: self.total_collected,
                total_pending: self.total_pending,
                recovery_percentage: self.recovery_percentage,
                direct_vehicles_sold: self.direct_vehicles_sold,
                sub_vendor_vehicles_sold: self.sub_vendor_vehicles_sold,
            },
            total_sub_vendors: self.total_sub_vendors,
            pricing_rules: DefaultPricingRules {
                default_discount_percentage: self.default_discount_percentage,
                default_markup_percentage: self.default_markup_percentage,
                allow_custom_pricing: self.allow_custom_pricing,
                max_discount_percentage: self.max_discount_percentage,
                min_margin_percentage: self.min_margin_percentage,
            },
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct VendorRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    state: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
    vendor_type: String,
    super_vendor_id: Option<Uuid>,
    status: String,
    direct_business: Decimal,
    vehicles_sold: i32,
    default_discount_percentage: Decimal,
    default_markup_percentage: Decimal,
    allow_custom_pricing: bool,
    max_discount_percentage: Decimal,
    min_margin_percentage: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const SELECT_VENDOR: &str = r#"
    SELECT id, name, email, phone, state, latitude, longitude, vendor_type,
           super_vendor_id, status, direct_business, vehicles_sold,
           default_discount_percentage, default_markup_percentage,
           allow_custom_pricing, max_discount_percentage, min_margin_percentage,
           created_at, updated_at
    FROM vendors
"#;

impl VendorRow {
    pub(crate) fn into_model(self) -> AppResult<Vendor> {
        let vendor_type = VendorType::parse(&self.vendor_type).ok_or_else(|| {
            AppError::Internal(format!("Unknown vendor type: {}", self.vendor_type))
        })?;
        let status = VendorStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown vendor status: {}", self.status)))?;
        let location = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };
        Ok(Vendor {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            state: self.state,
            location,
            vendor_type,
            super_vendor_id: self.super_vendor_id,
            status,
            direct_business: self.direct_business,
            vehicles_sold: self.vehicles_sold,
            pricing_rules: DefaultPricingRules {
                default_discount_percentage: self.default_discount_percentage,
                default_markup_percentage: self.default_markup_percentage,
                allow_custom_pricing: self.allow_custom_pricing,
                max_discount_percentage: self.max_discount_percentage,
                min_margin_percentage: self.min_margin_percentage,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Fetch a super-vendor or fail with NotFound
pub(crate) async fn fetch_super_vendor(db: &PgPool, id: Uuid) -> AppResult<SuperVendor> {
    let row = sqlx::query_as::<_, SuperVendorRow>(&format!(
        "{} WHERE id = $1",
        SELECT_SUPER_VENDOR
    ))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Super vendor".to_string()))?;
    row.into_model()
}

/// Fetch a vendor or fail with NotFound
pub(crate) async fn fetch_vendor(db: &PgPool, id: Uuid) -> AppResult<Vendor> {
    let row = sqlx::query_as::<_, VendorRow>(&format!("{} WHERE id = $1", SELECT_VENDOR))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor".to_string()))?;
    row.into_model()
}

/// Recompute a super-vendor's aggregate metrics and persist them
///
/// Rolls up only active sub-vendors' own totals, then applies the derived-
/// field identities via `BusinessMetrics::recalculate`. Called explicitly at
/// the end of every mutating operation that touches business value.
pub(crate) async fn refresh_metrics(db: &PgPool, id: Uuid) -> AppResult<BusinessMetrics> {
    let sv = fetch_super_vendor(db, id).await?;

    let rollup: (Option<Decimal>, Option<i64>) = sqlx::query_as(
        r#"
        SELECT SUM(direct_business), SUM(vehicles_sold)
        FROM vendors
        WHERE super_vendor_id = $1 AND status = 'active'
        "#,
    )
    .bind(id)
    .fetch_one(db)
    .await?;

    let mut metrics = sv.metrics;
    metrics.sub_vendor_business = rollup.0.unwrap_or(Decimal::ZERO);
    metrics.sub_vendor_vehicles_sold = rollup.1.unwrap_or(0) as i32;
    metrics.recalculate();

    sqlx::query(
        r#"
        UPDATE super_vendors
        SET sub_vendor_business = $1, sub_vendor_vehicles_sold = $2,
            total_business = $3, total_pending = $4, recovery_percentage = $5,
            updated_at = now()
        WHERE id = $6
        "#,
    )
    .bind(metrics.sub_vendor_business)
    .bind(metrics.sub_vendor_vehicles_sold)
    .bind(metrics.total_business)
    .bind(metrics.total_pending)
    .bind(metrics.recovery_percentage)
    .bind(id)
    .execute(db)
    .await?;

    Ok(metrics)
}

impl SuperVendorService {
    /// Create a new SuperVendorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new super-vendor
    ///
    /// Enforces one active super-vendor per state and global email
    /// uniqueness. A suspended/inactive super-vendor does not block its
    /// state.
    pub async fn create(
        &self,
        actor: Option<Uuid>,
        input: CreateSuperVendorInput,
    ) -> AppResult<SuperVendor> {
        validation::validate_email(&input.email)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validation::validate_indian_phone(&input.phone)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validation::validate_state(&input.state)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM super_vendors WHERE email = $1)",
        )
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;
        if email_taken {
            return Err(AppError::DuplicateEmail(input.email));
        }

        let state_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM super_vendors WHERE state = $1 AND status = 'active')",
        )
        .bind(&input.state)
        .fetch_one(&self.db)
        .await?;
        if state_taken {
            return Err(AppError::DuplicateState(input.state));
        }

        let rules = input.pricing_rules.unwrap_or_default();
        let (lat, lng) = match &input.location {
            Some(p) => (Some(p.latitude), Some(p.longitude)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, SuperVendorRow>(&format!(
            r#"
            INSERT INTO super_vendors (
                company_name, owner_name, email, phone, state, latitude, longitude,
                default_discount_percentage, default_markup_percentage,
                allow_custom_pricing, max_discount_percentage, min_margin_percentage,
                created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            returning_columns()
        ))
        .bind(&input.company_name)
        .bind(&input.owner_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.state)
        .bind(lat)
        .bind(lng)
        .bind(rules.default_discount_percentage)
        .bind(rules.default_markup_percentage)
        .bind(rules.allow_custom_pricing)
        .bind(rules.max_discount_percentage)
        .bind(rules.min_margin_percentage)
        .bind(actor)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List all super-vendors with the fleet-wide summary
    pub async fn list(&self) -> AppResult<(Vec<SuperVendor>, FleetSummary)> {
        let rows = sqlx::query_as::<_, SuperVendorRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_SUPER_VENDOR
        ))
        .fetch_all(&self.db)
        .await?;

        let summary: (i64, i64, Option<Decimal>, Option<Decimal>, Option<Decimal>, Option<Decimal>) =
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'active'),
                       SUM(total_business),
                       SUM(total_collected),
                       SUM(total_pending),
                       AVG(recovery_percentage)
                FROM super_vendors
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        let super_vendors = rows
            .into_iter()
            .map(|r| r.into_model())
            .collect::<AppResult<Vec<_>>>()?;

        Ok((
            super_vendors,
            FleetSummary {
                total_super_vendors: summary.0,
                active_super_vendors: summary.1,
                total_business: summary.2.unwrap_or(Decimal::ZERO),
                total_collected: summary.3.unwrap_or(Decimal::ZERO),
                total_pending: summary.4.unwrap_or(Decimal::ZERO),
                average_recovery_percentage: summary.5.unwrap_or(Decimal::ZERO).round_dp(2),
            },
        ))
    }

    /// Get one super-vendor with its sub-vendors populated
    pub async fn get(&self, id: Uuid) -> AppResult<SuperVendorDetail> {
        let super_vendor = fetch_super_vendor(&self.db, id).await?;

        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            "{} WHERE super_vendor_id = $1 ORDER BY created_at DESC",
            SELECT_VENDOR
        ))
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        let sub_vendors = rows
            .into_iter()
            .map(|r| r.into_model())
            .collect::<AppResult<Vec<_>>>()?;

        Ok(SuperVendorDetail {
            super_vendor,
            sub_vendors,
        })
    }

    /// Partial update of identity/contact fields
    pub async fn update(&self, id: Uuid, input: UpdateSuperVendorInput) -> AppResult<SuperVendor> {
        let existing = fetch_super_vendor(&self.db, id).await?;

        let company_name = input.company_name.unwrap_or(existing.company_name);
        let owner_name = input.owner_name.unwrap_or(existing.owner_name);
        let phone = input.phone.unwrap_or(existing.phone);
        let status = input.status.unwrap_or(existing.status);
        let location = input.location.or(existing.location);
        let (lat, lng) = match &location {
            Some(p) => (Some(p.latitude), Some(p.longitude)),
            None => (None, None),
        };

        // Reactivation must re-check the one-active-per-state rule
        if status == SuperVendorStatus::Active && existing.status != SuperVendorStatus::Active {
            let state_taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM super_vendors WHERE state = $1 AND status = 'active' AND id <> $2)",
            )
            .bind(&existing.state)
            .bind(id)
            .fetch_one(&self.db)
            .await?;
            if state_taken {
                return Err(AppError::DuplicateState(existing.state));
            }
        }

        let row = sqlx::query_as::<_, SuperVendorRow>(&format!(
            r#"
            UPDATE super_vendors
            SET company_name = $1, owner_name = $2, phone = $3, status = $4,
                latitude = $5, longitude = $6, updated_at = now()
            WHERE id = $7
            RETURNING {}
            "#,
            returning_columns()
        ))
        .bind(&company_name)
        .bind(&owner_name)
        .bind(&phone)
        .bind(status.as_str())
        .bind(lat)
        .bind(lng)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// Delete a super-vendor, cascading its sub-vendors back to direct
    ///
    /// Financial history (transactions, invoices) is retained; only the
    /// hierarchy and inventory rows go away.
    pub async fn delete(&self, id: Uuid) -> AppResult<u64> {
        fetch_super_vendor(&self.db, id).await?;

        let released = sqlx::query(
            r#"
            UPDATE vendors
            SET vendor_type = 'direct', super_vendor_id = NULL, updated_at = now()
            WHERE super_vendor_id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM super_vendor_inventory WHERE super_vendor_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        sqlx::query("DELETE FROM super_vendors WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        tracing::info!(super_vendor_id = %id, released_sub_vendors = released, "Super vendor deleted");
        Ok(released)
    }

    /// Attach existing vendors as sub-vendors
    ///
    /// All targets must share the super-vendor's state; violations abort the
    /// whole batch and report the offending vendor ids.
    pub async fn assign_sub_vendors(
        &self,
        id: Uuid,
        input: AssignVendorsInput,
    ) -> AppResult<Vec<Vendor>> {
        if input.vendor_ids.is_empty() {
            return Err(AppError::InvalidInput(
                "vendor_ids must not be empty".to_string(),
            ));
        }

        let sv = fetch_super_vendor(&self.db, id).await?;

        let found: Vec<(Uuid, String, Option<Uuid>)> = sqlx::query_as(
            "SELECT id, state, super_vendor_id FROM vendors WHERE id = ANY($1)",
        )
        .bind(&input.vendor_ids)
        .fetch_all(&self.db)
        .await?;

        if found.len() != input.vendor_ids.len() {
            return Err(AppError::NotFound("Vendor".to_string()));
        }

        let mismatched: Vec<Uuid> = found
            .iter()
            .filter(|(_, state, _)| !state.eq_ignore_ascii_case(&sv.state))
            .map(|(vid, _, _)| *vid)
            .collect();
        if !mismatched.is_empty() {
            return Err(AppError::StateMismatch {
                message: format!("Vendors must be located in {}", sv.state),
                vendor_ids: mismatched,
            });
        }

        let foreign: Vec<Uuid> = found
            .iter()
            .filter(|(_, _, owner)| owner.is_some() && *owner != Some(id))
            .map(|(vid, _, _)| *vid)
            .collect();
        if !foreign.is_empty() {
            return Err(AppError::NotAuthorized(format!(
                "Vendors already assigned to another super vendor: {:?}",
                foreign
            )));
        }

        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            UPDATE vendors
            SET vendor_type = 'sub_vendor', super_vendor_id = $1, updated_at = now()
            WHERE id = ANY($2)
            RETURNING {}
            "#,
            vendor_returning_columns()
        ))
        .bind(id)
        .bind(&input.vendor_ids)
        .fetch_all(&self.db)
        .await?;

        refresh_metrics(&self.db, id).await?;

        rows.into_iter().map(|r| r.into_model()).collect()
    }

    /// Detach one sub-vendor back to direct status
    pub async fn remove_sub_vendor(&self, id: Uuid, vendor_id: Uuid) -> AppResult<Vendor> {
        fetch_super_vendor(&self.db, id).await?;
        let vendor = fetch_vendor(&self.db, vendor_id).await?;

        if vendor.super_vendor_id != Some(id) {
            return Err(AppError::NotAuthorized(
                "Vendor is not assigned to this super vendor".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            UPDATE vendors
            SET vendor_type = 'direct', super_vendor_id = NULL, updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            vendor_returning_columns()
        ))
        .bind(vendor_id)
        .fetch_one(&self.db)
        .await?;

        refresh_metrics(&self.db, id).await?;

        row.into_model()
    }

    /// Create a brand-new sub-vendor under a super-vendor
    ///
    /// The vendor inherits the super-vendor's state and a snapshot of its
    /// default pricing rules; later rule changes do not propagate.
    pub async fn create_sub_vendor(
        &self,
        id: Uuid,
        input: CreateSubVendorInput,
    ) -> AppResult<Vendor> {
        let sv = fetch_super_vendor(&self.db, id).await?;

        validation::validate_email(&input.email)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validation::validate_indian_phone(&input.phone)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        if let Some(state) = &input.state {
            if !state.eq_ignore_ascii_case(&sv.state) {
                return Err(AppError::StateMismatch {
                    message: format!("Sub vendor must be located in {}", sv.state),
                    vendor_ids: vec![],
                });
            }
        }

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vendors WHERE email = $1)")
                .bind(&input.email)
                .fetch_one(&self.db)
                .await?;
        if email_taken {
            return Err(AppError::DuplicateEmail(input.email));
        }

        let (lat, lng) = match &input.location {
            Some(p) => (Some(p.latitude), Some(p.longitude)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, VendorRow>(&format!(
            r#"
            INSERT INTO vendors (
                name, email, phone, state, latitude, longitude,
                vendor_type, super_vendor_id,
                default_discount_percentage, default_markup_percentage,
                allow_custom_pricing, max_discount_percentage, min_margin_percentage
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'sub_vendor', $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            vendor_returning_columns()
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&sv.state)
        .bind(lat)
        .bind(lng)
        .bind(id)
        .bind(sv.pricing_rules.default_discount_percentage)
        .bind(sv.pricing_rules.default_markup_percentage)
        .bind(sv.pricing_rules.allow_custom_pricing)
        .bind(sv.pricing_rules.max_discount_percentage)
        .bind(sv.pricing_rules.min_margin_percentage)
        .fetch_one(&self.db)
        .await?;

        refresh_metrics(&self.db, id).await?;

        row.into_model()
    }

    /// Merge a patch into the super-vendor's default pricing rules
    ///
    /// Existing sub-vendors keep their snapshot; only future sub-vendors see
    /// the new defaults.
    pub async fn update_pricing_rules(
        &self,
        id: Uuid,
        patch: UpdatePricingRulesInput,
    ) -> AppResult<DefaultPricingRules> {
        let existing = fetch_super_vendor(&self.db, id).await?.pricing_rules;

        let rules = DefaultPricingRules {
            default_discount_percentage: patch
                .default_discount_percentage
                .map(shared::clamp_discount)
                .unwrap_or(existing.default_discount_percentage),
            default_markup_percentage: patch
                .default_markup_percentage
                .unwrap_or(existing.default_markup_percentage),
            allow_custom_pricing: patch
                .allow_custom_pricing
                .unwrap_or(existing.allow_custom_pricing),
            max_discount_percentage: patch
                .max_discount_percentage
                .map(shared::clamp_discount)
                .unwrap_or(existing.max_discount_percentage),
            min_margin_percentage: patch
                .min_margin_percentage
                .unwrap_or(existing.min_margin_percentage),
        };

        sqlx::query(
            r#"
            UPDATE super_vendors
            SET default_discount_percentage = $1, default_markup_percentage = $2,
                allow_custom_pricing = $3, max_discount_percentage = $4,
                min_margin_percentage = $5, updated_at = now()
            WHERE id = $6
            "#,
        )
        .bind(rules.default_discount_percentage)
        .bind(rules.default_markup_percentage)
        .bind(rules.allow_custom_pricing)
        .bind(rules.max_discount_percentage)
        .bind(rules.min_margin_percentage)
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(rules)
    }

    /// Explicit metrics recomputation (exposed for reconciliation)
    pub async fn recalculate_metrics(&self, id: Uuid) -> AppResult<BusinessMetrics> {
        refresh_metrics(&self.db, id).await
    }
}

fn returning_columns() -> String {
    r#"id, company_name, owner_name, email, phone, state, latitude, longitude,
       status, direct_business, sub_vendor_business, total_business,
       total_collected, total_pending, recovery_percentage,
       direct_vehicles_sold, sub_vendor_vehicles_sold,
       default_discount_percentage, default_markup_percentage,
       allow_custom_pricing, max_discount_percentage, min_margin_percentage,
       created_by, created_at, updated_at,
       (SELECT COUNT(*) FROM vendors v WHERE v.super_vendor_id = super_vendors.id)
           AS total_sub_vendors"#
        .to_string()
}

fn vendor_returning_columns() -> String {
    r#"id, name, email, phone, state, latitude, longitude, vendor_type,
       super_vendor_id, status, direct_business, vehicles_sold,
       default_discount_percentage, default_markup_percentage,
       allow_custom_pricing, max_discount_percentage, min_margin_percentage,
       created_at, updated_at"#
        .to_string()
}
