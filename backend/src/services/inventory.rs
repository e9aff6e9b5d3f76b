//! Stock allocation service across the warehouse, super-vendor, and
//! sub-vendor tiers
//!
//! Every stock movement is a conditional single-statement update guarded by
//! `available_stock >= qty` (or `stock_quantity >= qty` at the warehouse), so
//! concurrent requests cannot drive a tier negative. Multi-tier moves run
//! source-decrement-first; a destination failure after the source committed
//! is reported as PartialTransfer for reconciliation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ProductPricingPatch, VendorType};
use crate::services::super_vendor::{fetch_super_vendor, fetch_vendor, refresh_metrics};
use shared::models::{clamp_discount, resolve_price};

/// Inventory allocation service
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

#[derive(Debug, Deserialize)]
pub struct AssignStockInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub discount_percentage: Option<Decimal>,
    pub custom_price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct TransferStockInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct SellStockInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub selling_price: Option<Decimal>,
}

/// One inventory line joined with its product, plus the resolved unit price
#[derive(Debug, Serialize, FromRow)]
pub struct InventoryLineView {
    pub product_id: Uuid,
    pub product_name: String,
    pub category: Option<String>,
    pub base_price: Decimal,
    pub assigned_stock: i32,
    pub sold_stock: i32,
    pub available_stock: i32,
    pub discount_percentage: Decimal,
    pub markup_percentage: Decimal,
    pub custom_price: Option<Decimal>,
    #[sqlx(skip)]
    pub effective_price: Decimal,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    price: Decimal,
    stock_quantity: i32,
}

async fn fetch_product(db: &PgPool, id: Uuid) -> AppResult<ProductRow> {
    sqlx::query_as::<_, ProductRow>(
        "SELECT id, price, stock_quantity FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Product".to_string()))
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Allocate warehouse stock to a super-vendor
    ///
    /// The warehouse decrement is a partial update touching only
    /// stock_quantity; stale values in other product columns never block the
    /// allocation. Repeated calls accumulate assigned/available stock while
    /// overwriting the line's discount and custom price.
    pub async fn assign_to_super_vendor(
        &self,
        super_vendor_id: Uuid,
        input: AssignStockInput,
    ) -> AppResult<InventoryLineView> {
        if input.quantity <= 0 {
            return Err(AppError::InvalidInput(
                "Quantity must be a positive integer".to_string(),
            ));
        }

        fetch_super_vendor(&self.db, super_vendor_id).await?;
        let product = fetch_product(&self.db, input.product_id).await?;

        if input.quantity > product.stock_quantity {
            return Err(AppError::InsufficientStock(format!(
                "Requested {} units but only {} in warehouse",
                input.quantity, product.stock_quantity
            )));
        }

        let discount = clamp_discount(input.discount_percentage.unwrap_or(Decimal::ZERO));

        // Conditional decrement; a concurrent allocation may have drained
        // the warehouse between the check above and this statement.
        let decremented = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2, updated_at = now()
            WHERE id = $1 AND stock_quantity >= $2
            "#,
        )
        .bind(product.id)
        .bind(input.quantity)
        .execute(&self.db)
        .await?
        .rows_affected();
        if decremented == 0 {
            return Err(AppError::InsufficientStock(format!(
                "Warehouse stock for product {} changed concurrently",
                product.id
            )));
        }

        let upserted = sqlx::query(
            r#"
            INSERT INTO super_vendor_inventory (
                super_vendor_id, product_id, assigned_stock, sold_stock,
                available_stock, discount_percentage, custom_price
            )
            VALUES ($1, $2, $3, 0, $3, $4, $5)
            ON CONFLICT (super_vendor_id, product_id) DO UPDATE SET
                assigned_stock = super_vendor_inventory.assigned_stock + EXCLUDED.assigned_stock,
                available_stock = super_vendor_inventory.available_stock + EXCLUDED.available_stock,
                discount_percentage = EXCLUDED.discount_percentage,
                custom_price = EXCLUDED.custom_price,
                updated_at = now()
            "#,
        )
        .bind(super_vendor_id)
        .bind(product.id)
        .bind(input.quantity)
        .bind(discount)
        .bind(input.custom_price)
        .execute(&self.db)
        .await;

        if let Err(err) = upserted {
            // The warehouse decrement already committed. Surface the split
            // state for operational reconciliation instead of a generic 500.
            tracing::error!(
                super_vendor_id = %super_vendor_id,
                product_id = %product.id,
                quantity = input.quantity,
                error = %err,
                "Inventory upsert failed after warehouse decrement"
            );
            return Err(AppError::PartialTransfer(format!(
                "Warehouse stock decremented by {} but super vendor inventory write failed; manual reconciliation required",
                input.quantity
            )));
        }

        self.line_view(super_vendor_id, product.id).await
    }

    /// List a super-vendor's inventory with resolved prices
    pub async fn list_super_vendor_inventory(
        &self,
        super_vendor_id: Uuid,
    ) -> AppResult<Vec<InventoryLineView>> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        let mut lines = sqlx::query_as::<_, InventoryLineView>(
            r#"
            SELECT i.product_id, p.name AS product_name, p.category, p.base_price,
                   i.assigned_stock, i.sold_stock, i.available_stock,
                   i.discount_percentage, i.markup_percentage, i.custom_price
            FROM super_vendor_inventory i
            JOIN products p ON p.id = i.product_id
            WHERE i.super_vendor_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(super_vendor_id)
        .fetch_all(&self.db)
        .await?;

        for line in &mut lines {
            line.effective_price = resolve_price(
                line.base_price,
                line.discount_percentage,
                line.markup_percentage,
                line.custom_price,
            );
        }
        Ok(lines)
    }

    /// Move stock from a super-vendor's pool to one of its sub-vendors
    ///
    /// The transfer counts as a sale from the super-vendor's perspective.
    /// The vendor's line inherits the super-vendor line's pricing on first
    /// insert only.
    pub async fn transfer_to_sub_vendor(
        &self,
        super_vendor_id: Uuid,
        vendor_id: Uuid,
        input: TransferStockInput,
    ) -> AppResult<()> {
        if input.quantity <= 0 {
            return Err(AppError::InvalidInput(
                "Quantity must be a positive integer".to_string(),
            ));
        }

        let sv = fetch_super_vendor(&self.db, super_vendor_id).await?;
        let vendor = fetch_vendor(&self.db, vendor_id).await?;

        if let Some(owner) = vendor.super_vendor_id {
            if owner != super_vendor_id {
                return Err(AppError::NotAuthorized(
                    "Vendor belongs to a different super vendor".to_string(),
                ));
            }
        } else if !vendor.state.eq_ignore_ascii_case(&sv.state) {
            return Err(AppError::StateMismatch {
                message: format!("Vendor must be located in {}", sv.state),
                vendor_ids: vec![vendor_id],
            });
        }

        let source: Option<(Decimal, Decimal, Option<Decimal>)> = sqlx::query_as(
            r#"
            SELECT discount_percentage, markup_percentage, custom_price
            FROM super_vendor_inventory
            WHERE super_vendor_id = $1 AND product_id = $2
            "#,
        )
        .bind(super_vendor_id)
        .bind(input.product_id)
        .fetch_optional(&self.db)
        .await?;
        let (discount, markup, custom_price) = source.ok_or_else(|| {
            AppError::NotFound("Product in super vendor inventory".to_string())
        })?;

        // Source decrement first; the guard rejects oversubscription.
        let decremented = sqlx::query(
            r#"
            UPDATE super_vendor_inventory
            SET available_stock = available_stock - $3,
                sold_stock = sold_stock + $3,
                updated_at = now()
            WHERE super_vendor_id = $1 AND product_id = $2 AND available_stock >= $3
            "#,
        )
        .bind(super_vendor_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&self.db)
        .await?
        .rows_affected();
        if decremented == 0 {
            return Err(AppError::InsufficientStock(format!(
                "Super vendor has fewer than {} units available",
                input.quantity
            )));
        }

        let upserted = sqlx::query(
            r#"
            INSERT INTO vendor_inventory (
                vendor_id, product_id, assigned_stock, sold_stock,
                available_stock, discount_percentage, markup_percentage, custom_price
            )
            VALUES ($1, $2, $3, 0, $3, $4, $5, $6)
            ON CONFLICT (vendor_id, product_id) DO UPDATE SET
                assigned_stock = vendor_inventory.assigned_stock + EXCLUDED.assigned_stock,
                available_stock = vendor_inventory.available_stock + EXCLUDED.available_stock,
                updated_at = now()
            "#,
        )
        .bind(vendor_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(discount)
        .bind(markup)
        .bind(custom_price)
        .execute(&self.db)
        .await;

        if let Err(err) = upserted {
            tracing::error!(
                super_vendor_id = %super_vendor_id,
                vendor_id = %vendor_id,
                product_id = %input.product_id,
                quantity = input.quantity,
                error = %err,
                "Vendor inventory upsert failed after source decrement"
            );
            return Err(AppError::PartialTransfer(format!(
                "Super vendor stock decremented by {} but vendor inventory write failed; manual reconciliation required",
                input.quantity
            )));
        }

        // Backfill the hierarchy link as a side effect; idempotent for
        // vendors already under this super-vendor.
        if vendor.vendor_type != VendorType::SubVendor || vendor.super_vendor_id.is_none() {
            sqlx::query(
                r#"
                UPDATE vendors
                SET vendor_type = 'sub_vendor', super_vendor_id = $1, updated_at = now()
                WHERE id = $2
                "#,
            )
            .bind(super_vendor_id)
            .bind(vendor_id)
            .execute(&self.db)
            .await?;
        }

        refresh_metrics(&self.db, super_vendor_id).await?;
        Ok(())
    }

    /// Record a direct sale out of the super-vendor's own pool
    pub async fn sell_direct(
        &self,
        super_vendor_id: Uuid,
        input: SellStockInput,
    ) -> AppResult<Decimal> {
        if input.quantity <= 0 {
            return Err(AppError::InvalidInput(
                "Quantity must be a positive integer".to_string(),
            ));
        }

        fetch_super_vendor(&self.db, super_vendor_id).await?;
        let product = fetch_product(&self.db, input.product_id).await?;

        let decremented = sqlx::query(
            r#"
            UPDATE super_vendor_inventory
            SET available_stock = available_stock - $3,
                sold_stock = sold_stock + $3,
                updated_at = now()
            WHERE super_vendor_id = $1 AND product_id = $2 AND available_stock >= $3
            "#,
        )
        .bind(super_vendor_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .execute(&self.db)
        .await?
        .rows_affected();
        if decremented == 0 {
            return Err(AppError::InsufficientStock(format!(
                "Fewer than {} units available to sell",
                input.quantity
            )));
        }

        let unit_price = input.selling_price.unwrap_or(product.price);
        let sale_amount = unit_price * Decimal::from(input.quantity);

        sqlx::query(
            r#"
            UPDATE super_vendors
            SET direct_business = direct_business + $1,
                direct_vehicles_sold = direct_vehicles_sold + $2,
                updated_at = now()
            WHERE id = $3
            "#,
        )
        .bind(sale_amount)
        .bind(input.quantity)
        .bind(super_vendor_id)
        .execute(&self.db)
        .await?;

        refresh_metrics(&self.db, super_vendor_id).await?;
        Ok(sale_amount)
    }

    /// Merge a pricing patch into one inventory line
    pub async fn set_product_pricing(
        &self,
        super_vendor_id: Uuid,
        product_id: Uuid,
        patch: ProductPricingPatch,
    ) -> AppResult<InventoryLineView> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        let existing: Option<(Decimal, Decimal, Option<Decimal>)> = sqlx::query_as(
            r#"
            SELECT discount_percentage, markup_percentage, custom_price
            FROM super_vendor_inventory
            WHERE super_vendor_id = $1 AND product_id = $2
            "#,
        )
        .bind(super_vendor_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;
        let (discount, markup, custom_price) = existing.ok_or_else(|| {
            AppError::NotFound("Product in super vendor inventory".to_string())
        })?;

        let discount = patch
            .discount_percentage
            .map(clamp_discount)
            .unwrap_or(discount);
        let markup = patch.markup_percentage.unwrap_or(markup);
        // Absent keeps the stored override, Some(None) clears it
        let custom_price = patch.custom_price.unwrap_or(custom_price);

        sqlx::query(
            r#"
            UPDATE super_vendor_inventory
            SET discount_percentage = $3, markup_percentage = $4,
                custom_price = $5, updated_at = now()
            WHERE super_vendor_id = $1 AND product_id = $2
            "#,
        )
        .bind(super_vendor_id)
        .bind(product_id)
        .bind(discount)
        .bind(markup)
        .bind(custom_price)
        .execute(&self.db)
        .await?;

        self.line_view(super_vendor_id, product_id).await
    }

    /// Return a line's unsold units to the warehouse and delete the line
    pub async fn remove_from_inventory(
        &self,
        super_vendor_id: Uuid,
        product_id: Uuid,
    ) -> AppResult<i32> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        let available: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT available_stock FROM super_vendor_inventory
            WHERE super_vendor_id = $1 AND product_id = $2
            "#,
        )
        .bind(super_vendor_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;
        let available = available.ok_or_else(|| {
            AppError::NotFound("Product in super vendor inventory".to_string())
        })?;

        sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity + $2, updated_at = now() WHERE id = $1",
        )
        .bind(product_id)
        .bind(available)
        .execute(&self.db)
        .await?;

        sqlx::query(
            "DELETE FROM super_vendor_inventory WHERE super_vendor_id = $1 AND product_id = $2",
        )
        .bind(super_vendor_id)
        .bind(product_id)
        .execute(&self.db)
        .await?;

        tracing::info!(
            super_vendor_id = %super_vendor_id,
            product_id = %product_id,
            returned = available,
            "Inventory line removed, unsold units returned to warehouse"
        );
        Ok(available)
    }

    async fn line_view(
        &self,
        super_vendor_id: Uuid,
        product_id: Uuid,
    ) -> AppResult<InventoryLineView> {
        let mut line = sqlx::query_as::<_, InventoryLineView>(
            r#"
            SELECT i.product_id, p.name AS product_name, p.category, p.base_price,
                   i.assigned_stock, i.sold_stock, i.available_stock,
                   i.discount_percentage, i.markup_percentage, i.custom_price
            FROM super_vendor_inventory i
            JOIN products p ON p.id = i.product_id
            WHERE i.super_vendor_id = $1 AND i.product_id = $2
            "#,
        )
        .bind(super_vendor_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product in super vendor inventory".to_string()))?;

        line.effective_price = resolve_price(
            line.base_price,
            line.discount_percentage,
            line.markup_percentage,
            line.custom_price,
        );
        Ok(line)
    }
}
