//! Append-only transaction ledger service
//!
//! Records payments against a super-vendor's running balance, serves
//! filterable ledger queries and CSV exports, and implements the admin
//! correction path: deleting a payment-type transaction reverses the
//! aggregates it moved. Invoice-type entries are audit records of invoice
//! creation, so their deletion reverses nothing.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{RecordPaymentInput, SuperVendorTransaction, TransactionType};
use crate::services::super_vendor::{fetch_super_vendor, refresh_metrics};
use shared::models::{derive_payment_status, derive_status, payment_reference};

/// Transaction ledger service
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

/// Query-string filters for ledger reads
#[derive(Debug, Default, Deserialize)]
pub struct LedgerFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub transaction_type: Option<String>,
}

/// Monthly payment totals for trend charts
#[derive(Debug, Serialize, FromRow)]
pub struct MonthlyPaymentTotal {
    pub month: NaiveDate,
    pub total: Decimal,
    pub count: i64,
}

/// Collected amount per payment method
#[derive(Debug, Serialize, FromRow)]
pub struct MethodBreakdown {
    pub payment_method: Option<String>,
    pub total: Decimal,
    pub count: i64,
}

/// Payment statistics bundle for a super-vendor
#[derive(Debug, Serialize)]
pub struct PaymentStats {
    pub monthly_trends: Vec<MonthlyPaymentTotal>,
    pub method_breakdown: Vec<MethodBreakdown>,
}

#[derive(Debug, FromRow)]
pub(crate) struct TransactionRow {
    id: Uuid,
    super_vendor_id: Option<Uuid>,
    transaction_type: String,
    reference_number: String,
    amount: Decimal,
    balance_after: Decimal,
    related_invoice_id: Option<Uuid>,
    payment_method: Option<String>,
    notes: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

const SELECT_TRANSACTION: &str = r#"
    SELECT id, super_vendor_id, transaction_type, reference_number, amount,
           balance_after, related_invoice_id, payment_method, notes,
           created_by, created_at
    FROM super_vendor_transactions
"#;

impl TransactionRow {
    pub(crate) fn into_model(self) -> AppResult<SuperVendorTransaction> {
        let transaction_type = TransactionType::parse(&self.transaction_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown transaction type: {}",
                self.transaction_type
            ))
        })?;
        Ok(SuperVendorTransaction {
            id: self.id,
            super_vendor_id: self.super_vendor_id,
            transaction_type,
            reference_number: self.reference_number,
            amount: self.amount,
            balance_after: self.balance_after,
            related_invoice_id: self.related_invoice_id,
            payment_method: self.payment_method,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }
}

/// Append a ledger entry. Shared with the invoice service, which records
/// invoice-type audit entries through the same path. Takes any executor so
/// callers can run it inside their own transaction.
pub(crate) async fn append_transaction<'e, E>(
    executor: E,
    super_vendor_id: Uuid,
    transaction_type: TransactionType,
    reference_number: &str,
    amount: Decimal,
    balance_after: Decimal,
    related_invoice_id: Option<Uuid>,
    payment_method: Option<&str>,
    notes: Option<&str>,
    created_by: Option<Uuid>,
) -> AppResult<SuperVendorTransaction>
where
    E: sqlx::PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, TransactionRow>(
        r#"
        INSERT INTO super_vendor_transactions (
            super_vendor_id, transaction_type, reference_number, amount,
            balance_after, related_invoice_id, payment_method, notes, created_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, super_vendor_id, transaction_type, reference_number, amount,
                  balance_after, related_invoice_id, payment_method, notes,
                  created_by, created_at
        "#,
    )
    .bind(super_vendor_id)
    .bind(transaction_type.as_str())
    .bind(reference_number)
    .bind(amount)
    .bind(balance_after)
    .bind(related_invoice_id)
    .bind(payment_method)
    .bind(notes)
    .bind(created_by)
    .fetch_one(executor)
    .await?;
    row.into_model()
}

/// Re-derive and persist an invoice's payment state after paid_amount moved.
/// Runs on a single connection so it can participate in the caller's
/// transaction.
pub(crate) async fn rederive_invoice_state(
    conn: &mut sqlx::PgConnection,
    invoice_id: Uuid,
) -> AppResult<()> {
    let amounts: Option<(Decimal, Decimal, Option<NaiveDate>)> = sqlx::query_as(
        "SELECT paid_amount, total_amount, due_date FROM super_vendor_invoices WHERE id = $1",
    )
    .bind(invoice_id)
    .fetch_optional(&mut *conn)
    .await?;
    let (paid, total, due_date) =
        amounts.ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;

    let payment_status = derive_payment_status(paid, total);
    let status = derive_status(paid, total, due_date, Utc::now());

    sqlx::query(
        r#"
        UPDATE super_vendor_invoices
        SET status = $2, payment_status = $3, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(invoice_id)
    .bind(status.as_str())
    .bind(payment_status.as_str())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a payment against a super-vendor's pending balance
    ///
    /// `balance_after` may go negative; overpayment is representable, not
    /// clamped. When an invoice id is supplied the payment is also applied
    /// to that invoice, driving its lifecycle derivation.
    pub async fn record_payment(
        &self,
        super_vendor_id: Uuid,
        actor: Option<Uuid>,
        input: RecordPaymentInput,
    ) -> AppResult<SuperVendorTransaction> {
        if input.amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "Payment amount must be positive".to_string(),
            ));
        }

        let sv = fetch_super_vendor(&self.db, super_vendor_id).await?;

        if let Some(invoice_id) = input.invoice_id {
            let belongs = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM super_vendor_invoices WHERE id = $1 AND super_vendor_id = $2)",
            )
            .bind(invoice_id)
            .bind(super_vendor_id)
            .fetch_one(&self.db)
            .await?;
            if !belongs {
                return Err(AppError::NotFound("Invoice".to_string()));
            }
        }

        let reference = payment_reference(Utc::now().timestamp_millis());
        let balance_after = sv.metrics.total_pending - input.amount;

        // Ledger entry, running total, and invoice application commit
        // together, so paid_amount always equals the sum of the invoice's
        // payment rows.
        let mut tx = self.db.begin().await?;

        let transaction = append_transaction(
            &mut *tx,
            super_vendor_id,
            TransactionType::Payment,
            &reference,
            input.amount,
            balance_after,
            input.invoice_id,
            input.payment_method.as_deref(),
            input.notes.as_deref(),
            actor,
        )
        .await?;

        sqlx::query(
            r#"
            UPDATE super_vendors
            SET total_collected = total_collected + $1, updated_at = now()
            WHERE id = $2
            "#,
        )
        .bind(input.amount)
        .bind(super_vendor_id)
        .execute(&mut *tx)
        .await?;

        if let Some(invoice_id) = input.invoice_id {
            sqlx::query(
                r#"
                INSERT INTO invoice_payments (invoice_id, transaction_id, amount, method, reference)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(invoice_id)
            .bind(transaction.id)
            .bind(input.amount)
            .bind(input.payment_method.as_deref())
            .bind(&reference)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE super_vendor_invoices SET paid_amount = paid_amount + $2, updated_at = now() WHERE id = $1",
            )
            .bind(invoice_id)
            .bind(input.amount)
            .execute(&mut *tx)
            .await?;

            rederive_invoice_state(&mut tx, invoice_id).await?;
        }

        tx.commit().await?;

        refresh_metrics(&self.db, super_vendor_id).await?;

        tracing::info!(
            super_vendor_id = %super_vendor_id,
            reference = %reference,
            amount = %input.amount,
            "Payment recorded"
        );
        Ok(transaction)
    }

    /// Read the ledger, newest first, optionally filtered by date and type
    pub async fn get_ledger(
        &self,
        super_vendor_id: Uuid,
        filter: LedgerFilter,
    ) -> AppResult<Vec<SuperVendorTransaction>> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        if let Some(t) = &filter.transaction_type {
            if TransactionType::parse(t).is_none() {
                return Err(AppError::InvalidInput(format!(
                    "Unknown transaction type: {}",
                    t
                )));
            }
        }

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"{}
            WHERE super_vendor_id = $1
              AND ($2::date IS NULL OR created_at >= $2::date)
              AND ($3::date IS NULL OR created_at < $3::date + INTERVAL '1 day')
              AND ($4::text IS NULL OR transaction_type = $4)
            ORDER BY created_at DESC
            "#,
            SELECT_TRANSACTION
        ))
        .bind(super_vendor_id)
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.transaction_type)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_model()).collect()
    }

    /// Ledger export in CSV form, same filters as the JSON read
    pub async fn export_ledger_csv(
        &self,
        super_vendor_id: Uuid,
        filter: LedgerFilter,
    ) -> AppResult<String> {
        let transactions = self.get_ledger(super_vendor_id, filter).await?;

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .write_record([
                "date",
                "type",
                "reference_number",
                "amount",
                "balance_after",
                "payment_method",
                "notes",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        for t in &transactions {
            writer
                .write_record([
                    t.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    t.transaction_type.as_str().to_string(),
                    t.reference_number.clone(),
                    t.amount.to_string(),
                    t.balance_after.to_string(),
                    t.payment_method.clone().unwrap_or_default(),
                    t.notes.clone().unwrap_or_default(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
    }

    /// Admin correction: delete a ledger entry
    ///
    /// Only payment-type deletions reverse aggregates and invoice
    /// application; invoice-type entries are audit records whose monetary
    /// effect lives on the invoice itself.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> AppResult<()> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE id = $1",
            SELECT_TRANSACTION
        ))
        .bind(transaction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;
        let transaction = row.into_model()?;

        // Reversal and row deletion commit together; a half-applied reversal
        // would leave paid_amount out of step with the payment rows.
        let mut tx = self.db.begin().await?;

        if transaction.transaction_type == TransactionType::Payment {
            if let Some(invoice_id) = transaction.related_invoice_id {
                sqlx::query(
                    "DELETE FROM invoice_payments WHERE invoice_id = $1 AND transaction_id = $2",
                )
                .bind(invoice_id)
                .bind(transaction_id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    "UPDATE super_vendor_invoices SET paid_amount = paid_amount - $2, updated_at = now() WHERE id = $1",
                )
                .bind(invoice_id)
                .bind(transaction.amount)
                .execute(&mut *tx)
                .await?;

                rederive_invoice_state(&mut tx, invoice_id).await?;
            }

            if let Some(super_vendor_id) = transaction.super_vendor_id {
                sqlx::query(
                    r#"
                    UPDATE super_vendors
                    SET total_collected = total_collected - $1, updated_at = now()
                    WHERE id = $2
                    "#,
                )
                .bind(transaction.amount)
                .bind(super_vendor_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        sqlx::query("DELETE FROM super_vendor_transactions WHERE id = $1")
            .bind(transaction_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if transaction.transaction_type == TransactionType::Payment {
            if let Some(super_vendor_id) = transaction.super_vendor_id {
                refresh_metrics(&self.db, super_vendor_id).await?;
            }
        }

        tracing::info!(
            transaction_id = %transaction_id,
            transaction_type = transaction.transaction_type.as_str(),
            reversed = transaction.transaction_type == TransactionType::Payment,
            "Transaction deleted"
        );
        Ok(())
    }

    /// Monthly payment trends (last 12 months) and method breakdown
    pub async fn payment_stats(&self, super_vendor_id: Uuid) -> AppResult<PaymentStats> {
        fetch_super_vendor(&self.db, super_vendor_id).await?;

        let monthly_trends = sqlx::query_as::<_, MonthlyPaymentTotal>(
            r#"
            SELECT date_trunc('month', created_at)::date AS month,
                   SUM(amount) AS total,
                   COUNT(*) AS count
            FROM super_vendor_transactions
            WHERE super_vendor_id = $1
              AND transaction_type = 'payment'
              AND created_at >= date_trunc('month', now()) - INTERVAL '11 months'
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(super_vendor_id)
        .fetch_all(&self.db)
        .await?;

        let method_breakdown = sqlx::query_as::<_, MethodBreakdown>(
            r#"
            SELECT payment_method, SUM(amount) AS total, COUNT(*) AS count
            FROM super_vendor_transactions
            WHERE super_vendor_id = $1 AND transaction_type = 'payment'
            GROUP BY payment_method
            ORDER BY total DESC
            "#,
        )
        .bind(super_vendor_id)
        .fetch_all(&self.db)
        .await?;

        Ok(PaymentStats {
            monthly_trends,
            method_breakdown,
        })
    }
}
