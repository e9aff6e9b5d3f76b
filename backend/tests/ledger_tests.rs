//! Transaction ledger tests
//!
//! Covers:
//! - payment reference format
//! - balance_after arithmetic, including unclamped overpayment
//! - payment-only deletion reversal

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{payment_reference, BusinessMetrics, TransactionType};
use shared::validation::validate_payment_reference;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Payment references carry the epoch-millisecond suffix
    #[test]
    fn test_payment_reference_format() {
        let reference = payment_reference(1_722_000_000_123);
        assert_eq!(reference, "PAY-SV-1722000000123");
        assert!(validate_payment_reference(&reference).is_ok());
    }

    /// balance_after snapshots pending minus the payment amount
    #[test]
    fn test_balance_after_payment() {
        let pending_before = dec("50000");
        let amount = dec("20000");
        assert_eq!(pending_before - amount, dec("30000"));
    }

    /// Overpayment is representable as a negative balance, not clamped
    #[test]
    fn test_overpayment_goes_negative() {
        let pending_before = dec("1000");
        let amount = dec("2500");
        let balance_after = pending_before - amount;
        assert_eq!(balance_after, dec("-1500"));
        assert!(balance_after < Decimal::ZERO);
    }

    /// An invoice-type entry raises the balance by its total
    #[test]
    fn test_balance_after_invoice() {
        let pending_before = dec("10000");
        let invoice_total = dec("2360");
        assert_eq!(pending_before + invoice_total, dec("12360"));
    }

    /// Recording then deleting a payment leaves the aggregates unchanged
    #[test]
    fn test_payment_deletion_reverses_aggregates() {
        let mut m = BusinessMetrics {
            direct_business: dec("100000"),
            total_collected: dec("40000"),
            ..Default::default()
        };
        m.recalculate();
        let before = m.clone();

        // Payment recorded
        m.total_collected += dec("15000");
        m.recalculate();
        assert_eq!(m.total_pending, dec("45000"));

        // Admin correction deletes it
        m.total_collected -= dec("15000");
        m.recalculate();
        assert_eq!(m, before);
    }

    /// Only payment-type deletions reverse state; invoice-type entries are
    /// audit records of invoice creation
    #[test]
    fn test_only_payments_reverse() {
        let reverses = |t: TransactionType| t == TransactionType::Payment;
        assert!(reverses(TransactionType::Payment));
        assert!(!reverses(TransactionType::Invoice));
        assert!(!reverses(TransactionType::CreditNote));
        assert!(!reverses(TransactionType::DebitNote));
        assert!(!reverses(TransactionType::Adjustment));
    }

    /// paid_amount stays equal to the sum of the invoice's payment rows
    /// through application and reversal, since both commit atomically
    #[test]
    fn test_paid_amount_tracks_payment_rows() {
        let mut payments: Vec<Decimal> = Vec::new();
        let mut paid_amount = Decimal::ZERO;

        for amount in [dec("1000"), dec("600"), dec("760")] {
            payments.push(amount);
            paid_amount += amount;
            assert_eq!(paid_amount, payments.iter().copied().sum::<Decimal>());
        }
        assert_eq!(paid_amount, dec("2360"));

        // Deleting the middle payment reverses exactly its amount
        let removed = payments.remove(1);
        paid_amount -= removed;
        assert_eq!(paid_amount, dec("1760"));
        assert_eq!(paid_amount, payments.iter().copied().sum::<Decimal>());
    }

    /// Non-positive payment amounts are invalid
    #[test]
    fn test_payment_amount_must_be_positive() {
        for amount in [dec("0"), dec("-1"), dec("-999.99")] {
            assert!(amount <= Decimal::ZERO);
        }
        assert!(dec("0.01") > Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Replaying a ledger of payments against the starting pending balance
    /// reproduces the final balance_after snapshot
    #[test]
    fn prop_balance_snapshots_consistent(
        pending in 0i64..10_000_000,
        amounts in prop::collection::vec(1i64..100_000, 1..20),
    ) {
        let mut balance = Decimal::from(pending);
        let mut snapshots = Vec::new();
        for amount in &amounts {
            balance -= Decimal::from(*amount);
            snapshots.push(balance);
        }
        let total_paid: i64 = amounts.iter().sum();
        prop_assert_eq!(
            *snapshots.last().unwrap(),
            Decimal::from(pending) - Decimal::from(total_paid)
        );
        // Snapshots are strictly decreasing for positive amounts
        for pair in snapshots.windows(2) {
            prop_assert!(pair[1] < pair[0]);
        }
    }

    /// Applying then reversing any set of payments is a no-op on the metrics
    #[test]
    fn prop_payment_reversal_round_trip(
        business in 1i64..10_000_000,
        amounts in prop::collection::vec(1i64..100_000, 1..10),
    ) {
        let mut m = BusinessMetrics {
            direct_business: Decimal::from(business),
            ..Default::default()
        };
        m.recalculate();
        let before = m.clone();

        for amount in &amounts {
            m.total_collected += Decimal::from(*amount);
        }
        m.recalculate();
        for amount in &amounts {
            m.total_collected -= Decimal::from(*amount);
        }
        m.recalculate();

        prop_assert_eq!(m, before);
    }

    /// Epoch-millisecond references always satisfy the shared validator
    #[test]
    fn prop_payment_reference_valid(millis in 0i64..4_102_444_800_000) {
        prop_assert!(validate_payment_reference(&payment_reference(millis)).is_ok());
    }
}
