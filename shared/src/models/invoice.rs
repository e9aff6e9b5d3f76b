//! Super-vendor invoice models and lifecycle derivation
//!
//! `payment_status` is derived purely from `paid_amount` vs `total_amount`;
//! `status` additionally honors the due date (overdue check applied last).
//! Services recompute both via `derive_*` before every persist.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GST default applied when an item does not specify a tax rate
pub const DEFAULT_TAX_RATE: u32 = 18;

/// Invoice lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    PartiallyPaid,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(InvoiceStatus::Draft),
            "pending" => Some(InvoiceStatus::Pending),
            "partially_paid" => Some(InvoiceStatus::PartiallyPaid),
            "paid" => Some(InvoiceStatus::Paid),
            "overdue" => Some(InvoiceStatus::Overdue),
            "cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

/// Payment progress, derived only from amounts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(PaymentStatus::Unpaid),
            "partially_paid" => Some(PaymentStatus::PartiallyPaid),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

/// A stored invoice line item with its derived amounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub product_id: Option<Uuid>,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Input for one invoice line item
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceItemInput {
    pub product_id: Option<Uuid>,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
}

/// Derived amounts for one item
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedItem {
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub tax_rate: Decimal,
    pub taxable: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// Compute item amounts: `taxable = qty * unit_price - discount`,
/// `tax = taxable * rate / 100`, `total = taxable + tax`
pub fn compute_item(item: &InvoiceItemInput) -> ComputedItem {
    let discount = item.discount.unwrap_or(Decimal::ZERO);
    let tax_rate = item.tax_rate.unwrap_or_else(|| Decimal::from(DEFAULT_TAX_RATE));
    let taxable = Decimal::from(item.quantity) * item.unit_price - discount;
    let tax_amount = taxable * tax_rate / Decimal::from(100);
    ComputedItem {
        quantity: item.quantity,
        unit_price: item.unit_price,
        discount,
        tax_rate,
        taxable,
        tax_amount,
        total_amount: taxable + tax_amount,
    }
}

/// A payment applied to an invoice, mirroring a ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePayment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub transaction_id: Uuid,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub method: Option<String>,
    pub reference: String,
}

/// A super-vendor invoice with derived totals and state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperVendorInvoice {
    pub id: Uuid,
    pub super_vendor_id: Option<Uuid>,
    pub invoice_number: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub status: InvoiceStatus,
    pub payment_status: PaymentStatus,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub payments: Vec<InvoicePayment>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for raising an invoice
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceInput {
    pub items: Vec<InvoiceItemInput>,
    pub due_date: Option<NaiveDate>,
    pub discount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Manual status override input
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatusInput {
    pub status: InvoiceStatus,
}

/// Derive payment progress from amounts alone
pub fn derive_payment_status(paid_amount: Decimal, total_amount: Decimal) -> PaymentStatus {
    if paid_amount <= Decimal::ZERO {
        PaymentStatus::Unpaid
    } else if paid_amount < total_amount {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Paid
    }
}

/// Derive invoice status from amounts and the due date
///
/// Overdue is checked last and overrides any non-paid state when there is
/// still a balance due past the due date.
pub fn derive_status(
    paid_amount: Decimal,
    total_amount: Decimal,
    due_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> InvoiceStatus {
    let status = match derive_payment_status(paid_amount, total_amount) {
        PaymentStatus::Unpaid => InvoiceStatus::Pending,
        PaymentStatus::PartiallyPaid => InvoiceStatus::PartiallyPaid,
        PaymentStatus::Paid => InvoiceStatus::Paid,
    };
    let balance_due = total_amount - paid_amount;
    if status != InvoiceStatus::Paid && balance_due > Decimal::ZERO {
        if let Some(due) = due_date {
            if now.date_naive() > due {
                return InvoiceStatus::Overdue;
            }
        }
    }
    status
}

/// Next invoice number in the per-year monotonic sequence
///
/// `last` is the most recent number matching `INV-SV-<year>-*`; the numeric
/// suffix is incremented and zero-padded to four digits, starting at 0001
/// when the year has no invoices yet.
pub fn next_invoice_number(last: Option<&str>, year: i32) -> String {
    let next_seq = last
        .and_then(|n| n.rsplit('-').next())
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .map(|seq| seq + 1)
        .unwrap_or(1);
    format!("INV-SV-{}-{:04}", year, next_seq)
}

/// Invoice number for "now" given the latest number of the current year
pub fn invoice_number_for(now: DateTime<Utc>, last_this_year: Option<&str>) -> String {
    next_invoice_number(last_this_year, now.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_compute_item_default_tax() {
        let item = InvoiceItemInput {
            product_id: None,
            description: None,
            quantity: 2,
            unit_price: dec("1000"),
            discount: None,
            tax_rate: None,
        };
        let computed = compute_item(&item);
        assert_eq!(computed.taxable, dec("2000"));
        assert_eq!(computed.tax_amount, dec("360"));
        assert_eq!(computed.total_amount, dec("2360"));
    }

    #[test]
    fn test_compute_item_with_discount() {
        let item = InvoiceItemInput {
            product_id: None,
            description: None,
            quantity: 3,
            unit_price: dec("500"),
            discount: Some(dec("100")),
            tax_rate: Some(dec("5")),
        };
        let computed = compute_item(&item);
        // 3 * 500 - 100 = 1400; tax 70; total 1470
        assert_eq!(computed.taxable, dec("1400"));
        assert_eq!(computed.tax_amount, dec("70"));
        assert_eq!(computed.total_amount, dec("1470"));
    }

    #[test]
    fn test_derive_payment_status() {
        assert_eq!(
            derive_payment_status(Decimal::ZERO, dec("100")),
            PaymentStatus::Unpaid
        );
        assert_eq!(
            derive_payment_status(dec("50"), dec("100")),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            derive_payment_status(dec("100"), dec("100")),
            PaymentStatus::Paid
        );
        // Overpayment still reads as paid
        assert_eq!(
            derive_payment_status(dec("120"), dec("100")),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_derive_status_overdue_overrides() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            derive_status(Decimal::ZERO, dec("100"), Some(due), now),
            InvoiceStatus::Overdue
        );
        assert_eq!(
            derive_status(dec("40"), dec("100"), Some(due), now),
            InvoiceStatus::Overdue
        );
        // Fully paid never goes overdue
        assert_eq!(
            derive_status(dec("100"), dec("100"), Some(due), now),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_derive_status_before_due_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            derive_status(Decimal::ZERO, dec("100"), Some(due), now),
            InvoiceStatus::Pending
        );
        assert_eq!(
            derive_status(dec("30"), dec("100"), Some(due), now),
            InvoiceStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_next_invoice_number_starts_at_one() {
        assert_eq!(next_invoice_number(None, 2024), "INV-SV-2024-0001");
    }

    #[test]
    fn test_next_invoice_number_increments() {
        assert_eq!(
            next_invoice_number(Some("INV-SV-2024-0007"), 2024),
            "INV-SV-2024-0008"
        );
    }

    #[test]
    fn test_next_invoice_number_resets_across_years() {
        // Year boundary: no invoices for the new year yet
        assert_eq!(next_invoice_number(None, 2025), "INV-SV-2025-0001");
    }

    #[test]
    fn test_next_invoice_number_grows_past_padding() {
        assert_eq!(
            next_invoice_number(Some("INV-SV-2024-9999"), 2024),
            "INV-SV-2024-10000"
        );
    }
}
