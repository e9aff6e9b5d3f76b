//! Invoice lifecycle service
//!
//! Raising an invoice computes all derived amounts up front, allocates the
//! next number in the per-year sequence, and appends an invoice-type ledger
//! entry. Status and payment_status are always recomputed from amounts
//! before persisting; the manual override endpoint sets status alone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateInvoiceInput, InvoiceItem, InvoicePayment, InvoiceStatus, PaymentStatus,
    SuperVendorInvoice, TransactionType, UpdateInvoiceStatusInput,
};
use crate::services::ledger::append_transaction;
use crate::services::super_vendor::{fetch_super_vendor, refresh_metrics};
use shared::models::{compute_item, derive_payment_status, derive_status, next_invoice_number};

/// Invoice lifecycle service
#[derive(Clone)]
pub struct InvoiceService {
    db: PgPool,
}

/// Number allocation is read-then-insert; concurrent creators can collide on
/// the unique invoice_number index, so the losing side re-reads and retries.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

fn is_invoice_number_collision(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.constraint() == Some("super_vendor_invoices_invoice_number_key")
    )
}

/// Aggregate summary returned alongside the invoice list
#[derive(Debug, Serialize)]
pub struct InvoiceSummary {
    pub total_invoices: i64,
    pub total_invoiced: Decimal,
    pub total_paid: Decimal,
    pub total_outstanding: Decimal,
    pub overdue_count: i64,
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    super_vendor_id: Option<Uuid>,
    invoice_number: String,
    subtotal: Decimal,
    discount: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    paid_amount: Decimal,
    status: String,
    payment_status: String,
    due_date: Option<NaiveDate>,
    notes: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const SELECT_INVOICE: &str = r#"
    SELECT id, super_vendor_id, invoice_number, subtotal, discount, tax_amount,
           total_amount, paid_amount, status, payment_status, due_date, notes,
           created_by, created_at, updated_at
    FROM super_vendor_invoices
"#;

impl InvoiceRow {
    fn into_model(
        self,
        items: Vec<InvoiceItem>,
        payments: Vec<InvoicePayment>,
    ) -> AppResult<SuperVendorInvoice> {
        let status = InvoiceStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown invoice status: {}", self.status)))?;
        let payment_status = PaymentStatus::parse(&self.payment_status).ok_or_else(|| {
            AppError::Internal(format!("Unknown payment status: {}", self.payment_status))
        })?;
        Ok(SuperVendorInvoice {
            id: self.id,
            super_vendor_id: self.super_vendor_id,
            invoice_number: self.invoice_number,
            subtotal: self.subtotal,
            discount: self.discount,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            balance_due: self.total_amount - self.paid_amount,
            status,
            payment_status,
            due_date: self.due_date,
            notes: self.notes,
            items,
            payments,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InvoiceItemRow {
    id: Uuid,
    invoice_id: Uuid,
    product_id: Option<Uuid>,
    description: Option<String>,
    quantity: i32,
    unit_price: Decimal,
    discount: Decimal,
    tax_rate: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
}

#[derive(Debug, FromRow)]
struct InvoicePaymentRow {
    id: Uuid,
    invoice_id: Uuid,
    transaction_id: Uuid,
    amount: Decimal,
    payment_date: DateTime<Utc>,
    method: Option<String>,
    reference: String,
}

async fn fetch_items(db: &PgPool, invoice_id: Uuid) -> AppResult<Vec<InvoiceItem>> {
    let rows = sqlx::query_as::<_, InvoiceItemRow>(
        r#"
        SELECT id, invoice_id, product_id, description, quantity, unit_price,
               discount, tax_rate, tax_amount, total_amount
        FROM invoice_items
        WHERE invoice_id = $1
        "#,
    )
    .bind(invoice_id)
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| InvoiceItem {
            id: r.id,
            invoice_id: r.invoice_id,
            product_id: r.product_id,
            description: r.description,
            quantity: r.quantity,
            unit_price: r.unit_price,
            discount: r.discount,
            tax_rate: r.tax_rate,
            tax_amount: r.tax_amount,
            total_amount: r.total_amount,
        })
        .collect())
}

async fn fetch_payments(db: &PgPool, invoice_id: Uuid) -> AppResult<Vec<InvoicePayment>> {
    let rows = sqlx::query_as::<_, InvoicePaymentRow>(
        r#"
        SELECT id, invoice_id, transaction_id, amount, payment_date, method, reference
        FROM invoice_payments
        WHERE invoice_id = $1
        ORDER BY payment_date
        "#,
    )
    .bind(invoice_id)
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| InvoicePayment {
            id: r.id,
            invoice_id: r.invoice_id,
            transaction_id: r.transaction_id,
            amount: r.amount,
            payment_date: r.payment_date,
            method: r.method,
            reference: r.reference,
        })
        .collect())
}

impl InvoiceService {
    /// Create a new InvoiceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Raise an invoice for a super-vendor
    pub async fn create_invoice(
        &self,
        super_vendor_id: Uuid,
        actor: Option<Uuid>,
        input: CreateInvoiceInput,
    ) -> AppResult<SuperVendorInvoice> {
        if input.items.is_empty() {
            return Err(AppError::EmptyInvoice);
        }
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(AppError::InvalidInput(
                    "Item quantity must be a positive integer".to_string(),
                ));
            }
        }

        let sv = fetch_super_vendor(&self.db, super_vendor_id).await?;

        let computed: Vec<_> = input.items.iter().map(compute_item).collect();
        let subtotal: Decimal = computed
            .iter()
            .map(|c| Decimal::from(c.quantity) * c.unit_price)
            .sum();
        let tax_amount: Decimal = computed.iter().map(|c| c.tax_amount).sum();
        let total_amount: Decimal = computed.iter().map(|c| c.total_amount).sum();
        let total_units: i32 = computed.iter().map(|c| c.quantity).sum();
        let invoice_discount = input.discount.unwrap_or(Decimal::ZERO);

        let now = Utc::now();
        let year = now.year();
        let payment_status = derive_payment_status(Decimal::ZERO, total_amount);
        let status = derive_status(Decimal::ZERO, total_amount, input.due_date, now);

        // Header, items, the ledger entry, and the aggregate bump commit
        // together; any failure rolls the whole invoice back. A number
        // collision with a concurrent creator rolls back and retries with a
        // fresh read.
        let mut attempt = 0;
        let (row, invoice_number) = loop {
            attempt += 1;
            let mut tx = self.db.begin().await?;

            let last_number: Option<String> = sqlx::query_scalar(
                r#"
                SELECT invoice_number FROM super_vendor_invoices
                WHERE invoice_number LIKE $1
                ORDER BY split_part(invoice_number, '-', 4)::int DESC
                LIMIT 1
                "#,
            )
            .bind(format!("INV-SV-{}-%", year))
            .fetch_optional(&mut *tx)
            .await?;
            let invoice_number = next_invoice_number(last_number.as_deref(), year);

            let inserted = sqlx::query_as::<_, InvoiceRow>(&format!(
                r#"
                INSERT INTO super_vendor_invoices (
                    super_vendor_id, invoice_number, subtotal, discount, tax_amount,
                    total_amount, paid_amount, status, payment_status, due_date,
                    notes, created_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, $11)
                RETURNING {}
                "#,
                invoice_returning_columns()
            ))
            .bind(super_vendor_id)
            .bind(&invoice_number)
            .bind(subtotal)
            .bind(invoice_discount)
            .bind(tax_amount)
            .bind(total_amount)
            .bind(status.as_str())
            .bind(payment_status.as_str())
            .bind(input.due_date)
            .bind(&input.notes)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await;

            let row = match inserted {
                Ok(row) => row,
                Err(err) if is_invoice_number_collision(&err) && attempt < MAX_NUMBER_ATTEMPTS => {
                    tracing::warn!(
                        super_vendor_id = %super_vendor_id,
                        invoice_number = %invoice_number,
                        attempt,
                        "Invoice number taken by a concurrent creator, retrying"
                    );
                    tx.rollback().await?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let invoice_id = row.id;

            for (item, c) in input.items.iter().zip(&computed) {
                sqlx::query(
                    r#"
                    INSERT INTO invoice_items (
                        invoice_id, product_id, description, quantity, unit_price,
                        discount, tax_rate, tax_amount, total_amount
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(invoice_id)
                .bind(item.product_id)
                .bind(&item.description)
                .bind(c.quantity)
                .bind(c.unit_price)
                .bind(c.discount)
                .bind(c.tax_rate)
                .bind(c.tax_amount)
                .bind(c.total_amount)
                .execute(&mut *tx)
                .await?;
            }

            // Audit entry: the invoice raises the pending balance by its total.
            append_transaction(
                &mut *tx,
                super_vendor_id,
                TransactionType::Invoice,
                &invoice_number,
                total_amount,
                sv.metrics.total_pending + total_amount,
                Some(invoice_id),
                None,
                input.notes.as_deref(),
                actor,
            )
            .await?;

            sqlx::query(
                r#"
                UPDATE super_vendors
                SET direct_business = direct_business + $1,
                    direct_vehicles_sold = direct_vehicles_sold + $2,
                    updated_at = now()
                WHERE id = $3
                "#,
            )
            .bind(total_amount)
            .bind(total_units)
            .bind(super_vendor_id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            break (row, invoice_number);
        };
        let invoice_id = row.id;

        refresh_metrics(&self.db, super_vendor_id).await?;

        tracing::info!(
            super_vendor_id = %super_vendor_id,
            invoice_number = %invoice_number,
            total = %total_amount,
            "Invoice created"
        );

        let items = fetch_items(&self.db, invoice_id).await?;
        row.into_model(items, vec![])
    }

    /// List a super-vendor's invoices with an aggregate summary
    pub async fn list_invoices(
        &self,
        super_vendor_id: Uuid,
    ) -> AppResult<(Vec<SuperVendorInvoice>, InvoiceSummary)> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "{} WHERE super_vendor_id = $1 ORDER BY created_at DESC",
            SELECT_INVOICE
        ))
        .bind(super_vendor_id)
        .fetch_all(&self.db)
        .await?;

        let summary: (i64, Option<Decimal>, Option<Decimal>, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   SUM(total_amount),
                   SUM(paid_amount),
                   COUNT(*) FILTER (WHERE status = 'overdue')
            FROM super_vendor_invoices
            WHERE super_vendor_id = $1
            "#,
        )
        .bind(super_vendor_id)
        .fetch_one(&self.db)
        .await?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = fetch_items(&self.db, row.id).await?;
            let payments = fetch_payments(&self.db, row.id).await?;
            invoices.push(row.into_model(items, payments)?);
        }

        let total_invoiced = summary.1.unwrap_or(Decimal::ZERO);
        let total_paid = summary.2.unwrap_or(Decimal::ZERO);
        Ok((
            invoices,
            InvoiceSummary {
                total_invoices: summary.0,
                total_invoiced,
                total_paid,
                total_outstanding: total_invoiced - total_paid,
                overdue_count: summary.3,
            },
        ))
    }

    /// Get one invoice with its items and payments
    pub async fn get_invoice(&self, invoice_id: Uuid) -> AppResult<SuperVendorInvoice> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!("{} WHERE id = $1", SELECT_INVOICE))
            .bind(invoice_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;

        let items = fetch_items(&self.db, invoice_id).await?;
        let payments = fetch_payments(&self.db, invoice_id).await?;
        row.into_model(items, payments)
    }

    /// Manual status override
    ///
    /// Sets status only; payment_status keeps reflecting the amounts and
    /// will be re-derived by the next payment-driven save.
    pub async fn update_status(
        &self,
        invoice_id: Uuid,
        input: UpdateInvoiceStatusInput,
    ) -> AppResult<SuperVendorInvoice> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM super_vendor_invoices WHERE id = $1)",
        )
        .bind(invoice_id)
        .fetch_one(&self.db)
        .await?;
        if !exists {
            return Err(AppError::NotFound("Invoice".to_string()));
        }

        sqlx::query(
            "UPDATE super_vendor_invoices SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(invoice_id)
        .bind(input.status.as_str())
        .execute(&self.db)
        .await?;

        self.get_invoice(invoice_id).await
    }
}

fn invoice_returning_columns() -> String {
    r#"id, super_vendor_id, invoice_number, subtotal, discount, tax_amount,
       total_amount, paid_amount, status, payment_status, due_date, notes,
       created_by, created_at, updated_at"#
        .to_string()
}
