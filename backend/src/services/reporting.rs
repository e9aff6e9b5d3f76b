//! Read-only dashboard rollups over the vendor network

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;

/// Dashboard aggregation service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Platform-wide dashboard payload
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub network: NetworkCounts,
    pub business: BusinessTotals,
    pub inventory: InventoryTotals,
    pub invoices: InvoiceTotals,
    pub top_super_vendors: Vec<SuperVendorStanding>,
    pub recent_transactions: Vec<RecentTransaction>,
}

#[derive(Debug, Serialize)]
pub struct NetworkCounts {
    pub super_vendors: i64,
    pub active_super_vendors: i64,
    pub sub_vendors: i64,
    pub direct_vendors: i64,
}

#[derive(Debug, Serialize)]
pub struct BusinessTotals {
    pub total_business: Decimal,
    pub total_collected: Decimal,
    pub total_pending: Decimal,
    pub average_recovery_percentage: Decimal,
    pub vehicles_sold: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct InventoryTotals {
    pub warehouse_stock: i64,
    pub assigned_to_super_vendors: i64,
    pub available_at_super_vendors: i64,
    pub assigned_to_vendors: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct InvoiceTotals {
    pub total_invoices: i64,
    pub outstanding_amount: Decimal,
    pub overdue_invoices: i64,
}

/// One leaderboard row, ranked by total business
#[derive(Debug, Serialize, FromRow)]
pub struct SuperVendorStanding {
    pub id: Uuid,
    pub company_name: String,
    pub state: String,
    pub total_business: Decimal,
    pub recovery_percentage: Decimal,
    pub total_sub_vendors: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RecentTransaction {
    pub id: Uuid,
    pub super_vendor_id: Option<Uuid>,
    pub transaction_type: String,
    pub reference_number: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the platform dashboard in one pass of aggregate queries
    pub async fn dashboard(&self) -> AppResult<DashboardReport> {
        let network: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'active') FROM super_vendors",
        )
        .fetch_one(&self.db)
        .await?;

        let vendors: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE vendor_type = 'sub_vendor'),
                   COUNT(*) FILTER (WHERE vendor_type = 'direct')
            FROM vendors
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let business: (
            Option<Decimal>,
            Option<Decimal>,
            Option<Decimal>,
            Option<Decimal>,
            Option<i64>,
        ) = sqlx::query_as(
            r#"
            SELECT SUM(total_business), SUM(total_collected), SUM(total_pending),
                   AVG(recovery_percentage),
                   SUM(direct_vehicles_sold + sub_vendor_vehicles_sold)::bigint
            FROM super_vendors
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let inventory = sqlx::query_as::<_, InventoryTotals>(
            r#"
            SELECT
                COALESCE((SELECT SUM(stock_quantity) FROM products), 0)::bigint
                    AS warehouse_stock,
                COALESCE((SELECT SUM(assigned_stock) FROM super_vendor_inventory), 0)::bigint
                    AS assigned_to_super_vendors,
                COALESCE((SELECT SUM(available_stock) FROM super_vendor_inventory), 0)::bigint
                    AS available_at_super_vendors,
                COALESCE((SELECT SUM(assigned_stock) FROM vendor_inventory), 0)::bigint
                    AS assigned_to_vendors
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let invoices = sqlx::query_as::<_, InvoiceTotals>(
            r#"
            SELECT COUNT(*) AS total_invoices,
                   COALESCE(SUM(total_amount - paid_amount), 0) AS outstanding_amount,
                   COUNT(*) FILTER (WHERE status = 'overdue') AS overdue_invoices
            FROM super_vendor_invoices
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let top_super_vendors = sqlx::query_as::<_, SuperVendorStanding>(
            r#"
            SELECT id, company_name, state, total_business, recovery_percentage,
                   (SELECT COUNT(*) FROM vendors v WHERE v.super_vendor_id = super_vendors.id)
                       AS total_sub_vendors
            FROM super_vendors
            WHERE status = 'active'
            ORDER BY total_business DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let recent_transactions = sqlx::query_as::<_, RecentTransaction>(
            r#"
            SELECT id, super_vendor_id, transaction_type, reference_number, amount, created_at
            FROM super_vendor_transactions
            ORDER BY created_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardReport {
            network: NetworkCounts {
                super_vendors: network.0,
                active_super_vendors: network.1,
                sub_vendors: vendors.0,
                direct_vendors: vendors.1,
            },
            business: BusinessTotals {
                total_business: business.0.unwrap_or(Decimal::ZERO),
                total_collected: business.1.unwrap_or(Decimal::ZERO),
                total_pending: business.2.unwrap_or(Decimal::ZERO),
                average_recovery_percentage: business.3.unwrap_or(Decimal::ZERO).round_dp(2),
                vehicles_sold: business.4.unwrap_or(0),
            },
            inventory,
            invoices,
            top_super_vendors,
            recent_transactions,
        })
    }
}
