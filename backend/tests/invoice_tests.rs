//! Invoice lifecycle tests
//!
//! Covers:
//! - item amount derivation with the 18% default tax rate
//! - status / payment_status derivation from amounts and due date
//! - per-year monotonic invoice numbering

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{
    compute_item, derive_payment_status, derive_status, next_invoice_number, InvoiceItemInput,
    InvoiceStatus, PaymentStatus,
};
use shared::validation::validate_invoice_number;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(quantity: i32, unit_price: &str) -> InvoiceItemInput {
    InvoiceItemInput {
        product_id: None,
        description: None,
        quantity,
        unit_price: dec(unit_price),
        discount: None,
        tax_rate: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The reference invoice: 2 units at 1000 with default 18% GST
    #[test]
    fn test_invoice_amounts_round_trip() {
        let computed = compute_item(&item(2, "1000"));
        assert_eq!(computed.tax_amount, dec("360"));
        assert_eq!(computed.total_amount, dec("2360"));

        // Invoice-level totals over a single item
        let subtotal = Decimal::from(computed.quantity) * computed.unit_price;
        assert_eq!(subtotal, dec("2000"));
        let total = computed.total_amount;
        let paid = Decimal::ZERO;
        assert_eq!(total - paid, dec("2360"));
        assert_eq!(derive_payment_status(paid, total), PaymentStatus::Unpaid);
    }

    /// Paying an invoice in full moves it to paid with zero balance
    #[test]
    fn test_full_payment_settles_invoice() {
        let total = dec("2360");
        let paid = dec("2360");
        assert_eq!(total - paid, Decimal::ZERO);
        assert_eq!(derive_payment_status(paid, total), PaymentStatus::Paid);
        assert_eq!(
            derive_status(paid, total, None, Utc::now()),
            InvoiceStatus::Paid
        );
    }

    /// Reversing the payment restores the unpaid state
    #[test]
    fn test_payment_reversal_restores_unpaid() {
        let total = dec("2360");
        let mut paid = dec("2360");
        paid -= dec("2360");
        assert_eq!(paid, Decimal::ZERO);
        assert_eq!(derive_payment_status(paid, total), PaymentStatus::Unpaid);
        let due = NaiveDate::from_ymd_opt(2099, 1, 1);
        assert_eq!(
            derive_status(paid, total, due, Utc::now()),
            InvoiceStatus::Pending
        );
    }

    /// Partial payment sits between pending and paid
    #[test]
    fn test_partial_payment() {
        let total = dec("2360");
        let paid = dec("1000");
        assert_eq!(
            derive_payment_status(paid, total),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            derive_status(paid, total, None, Utc::now()),
            InvoiceStatus::PartiallyPaid
        );
    }

    /// Overdue overrides status but never payment_status
    #[test]
    fn test_overdue_override() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let total = dec("5000");
        let paid = dec("2000");
        assert_eq!(
            derive_status(paid, total, Some(due), now),
            InvoiceStatus::Overdue
        );
        assert_eq!(
            derive_payment_status(paid, total),
            PaymentStatus::PartiallyPaid
        );
    }

    /// Item-level discount reduces the taxable base before tax
    #[test]
    fn test_item_discount_before_tax() {
        let mut i = item(4, "250");
        i.discount = Some(dec("200"));
        i.tax_rate = Some(dec("10"));
        let computed = compute_item(&i);
        // 4 * 250 - 200 = 800; tax 80; total 880
        assert_eq!(computed.taxable, dec("800"));
        assert_eq!(computed.total_amount, dec("880"));
    }

    /// Numbering is strictly increasing within a year
    #[test]
    fn test_numbering_monotonic_within_year() {
        let first = next_invoice_number(None, 2024);
        assert_eq!(first, "INV-SV-2024-0001");
        let second = next_invoice_number(Some(&first), 2024);
        assert_eq!(second, "INV-SV-2024-0002");
        assert!(second > first);
    }

    /// Sequencing resets across year boundaries, format does not
    #[test]
    fn test_numbering_resets_across_years() {
        let late_2024 = next_invoice_number(Some("INV-SV-2024-0042"), 2024);
        assert_eq!(late_2024, "INV-SV-2024-0043");
        let first_2025 = next_invoice_number(None, 2025);
        assert_eq!(first_2025, "INV-SV-2025-0001");
    }

    /// Generated numbers pass the shared format validation
    #[test]
    fn test_generated_numbers_validate() {
        for last in [None, Some("INV-SV-2024-0009"), Some("INV-SV-2024-9999")] {
            let number = next_invoice_number(last, 2024);
            assert!(validate_invoice_number(&number).is_ok(), "{}", number);
        }
    }

    /// Two creators racing from the same last number collide; the loser's
    /// re-read against the winner's committed number yields a fresh,
    /// strictly higher one
    #[test]
    fn test_collision_retry_allocates_fresh_number() {
        let last = Some("INV-SV-2024-0005");
        let winner = next_invoice_number(last, 2024);
        let loser_first_try = next_invoice_number(last, 2024);
        assert_eq!(winner, loser_first_try); // the collision

        let loser_retry = next_invoice_number(Some(&winner), 2024);
        assert_eq!(loser_retry, "INV-SV-2024-0007");
        assert_ne!(loser_retry, winner);
        assert!(loser_retry > winner);
    }

    /// Header totals are exactly the sums over the item lines, so an invoice
    /// persisted together with its items can never disagree with them
    #[test]
    fn test_header_totals_match_items() {
        let inputs = vec![item(2, "1000"), item(1, "500"), item(3, "250")];
        let computed: Vec<_> = inputs.iter().map(compute_item).collect();

        let subtotal: Decimal = computed
            .iter()
            .map(|c| Decimal::from(c.quantity) * c.unit_price)
            .sum();
        let tax_amount: Decimal = computed.iter().map(|c| c.tax_amount).sum();
        let total_amount: Decimal = computed.iter().map(|c| c.total_amount).sum();
        let total_units: i32 = computed.iter().map(|c| c.quantity).sum();

        assert_eq!(subtotal, dec("3250"));
        assert_eq!(tax_amount, dec("585"));
        assert_eq!(total_amount, dec("3835"));
        assert_eq!(total_units, 6);
        assert_eq!(total_amount, subtotal + tax_amount);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Item derivation: total = taxable + tax, tax = taxable * rate / 100
    #[test]
    fn prop_item_amount_identities(
        quantity in 1i32..1_000,
        unit_price in 1i64..1_000_000,
        tax_rate in 0i64..=28,
    ) {
        let input = InvoiceItemInput {
            product_id: None,
            description: None,
            quantity,
            unit_price: Decimal::from(unit_price),
            discount: None,
            tax_rate: Some(Decimal::from(tax_rate)),
        };
        let c = compute_item(&input);
        prop_assert_eq!(c.taxable, Decimal::from(quantity) * Decimal::from(unit_price));
        prop_assert_eq!(c.tax_amount, c.taxable * Decimal::from(tax_rate) / Decimal::from(100));
        prop_assert_eq!(c.total_amount, c.taxable + c.tax_amount);
    }

    /// Numbering always increments the sequence by exactly one
    #[test]
    fn prop_numbering_increments(seq in 1u32..99_999) {
        let last = format!("INV-SV-2024-{:04}", seq);
        let next = next_invoice_number(Some(&last), 2024);
        let next_seq: u32 = next.rsplit('-').next().unwrap().parse().unwrap();
        prop_assert_eq!(next_seq, seq + 1);
    }

    /// Payment status derivation is total on its inputs: any paid/total pair
    /// lands in exactly one state consistent with the amounts
    #[test]
    fn prop_payment_status_consistent(
        paid in 0i64..10_000_000,
        total in 1i64..10_000_000,
    ) {
        let paid = Decimal::from(paid);
        let total = Decimal::from(total);
        match derive_payment_status(paid, total) {
            PaymentStatus::Unpaid => prop_assert!(paid <= Decimal::ZERO),
            PaymentStatus::PartiallyPaid => {
                prop_assert!(paid > Decimal::ZERO && paid < total)
            }
            PaymentStatus::Paid => prop_assert!(paid >= total),
        }
    }

    /// A fully paid invoice is never overdue, regardless of the due date
    #[test]
    fn prop_paid_never_overdue(days_late in 1i64..3_650) {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let due = (now - chrono::Duration::days(days_late)).date_naive();
        let total = dec("1000");
        prop_assert_eq!(
            derive_status(total, total, Some(due), now),
            InvoiceStatus::Paid
        );
    }
}
