//! Append-only super-vendor transaction ledger models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Audit record of invoice creation, not an independent money movement
    Invoice,
    Payment,
    CreditNote,
    DebitNote,
    Adjustment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Invoice => "invoice",
            TransactionType::Payment => "payment",
            TransactionType::CreditNote => "credit_note",
            TransactionType::DebitNote => "debit_note",
            TransactionType::Adjustment => "adjustment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "invoice" => Some(TransactionType::Invoice),
            "payment" => Some(TransactionType::Payment),
            "credit_note" => Some(TransactionType::CreditNote),
            "debit_note" => Some(TransactionType::DebitNote),
            "adjustment" => Some(TransactionType::Adjustment),
            _ => None,
        }
    }
}

/// One append-only ledger entry
///
/// Never mutated after creation; deletion is an explicit admin correction
/// that reverses aggregates for payment-type entries only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperVendorTransaction {
    pub id: Uuid,
    pub super_vendor_id: Option<Uuid>,
    pub transaction_type: TransactionType,
    pub reference_number: String,
    pub amount: Decimal,
    /// Snapshot of the pending balance immediately after this entry.
    /// Negative values represent overpayment and are not clamped.
    pub balance_after: Decimal,
    pub related_invoice_id: Option<Uuid>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a payment against a super-vendor
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentInput {
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub invoice_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Payment reference: `PAY-SV-<epoch-ms>`
pub fn payment_reference(epoch_millis: i64) -> String {
    format!("PAY-SV-{}", epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_round_trip() {
        for t in [
            TransactionType::Invoice,
            TransactionType::Payment,
            TransactionType::CreditNote,
            TransactionType::DebitNote,
            TransactionType::Adjustment,
        ] {
            assert_eq!(TransactionType::parse(t.as_str()), Some(t));
        }
        assert!(TransactionType::parse("refund").is_none());
    }

    #[test]
    fn test_payment_reference_format() {
        assert_eq!(payment_reference(1700000000000), "PAY-SV-1700000000000");
    }
}
