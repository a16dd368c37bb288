//! Tests for the Invoice lifecycle state machine
//!
//! Core invariants under test:
//! - status == Paid  ⇔  outstanding_balance == 0
//! - paid_date is set  ⇔  status == Paid
//! - over-payment floors the balance at zero instead of failing

use chrono::NaiveDate;
use invoice_simulator_core_rs::{Invoice, InvoiceStatus};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice(amount: f64) -> Invoice {
    Invoice::new(
        1,
        "BIZ_01".to_string(),
        "BIZ_02".to_string(),
        amount,
        date(2024, 4, 1),
    )
}

#[test]
fn test_new_invoice() {
    let inv = invoice(1_000.0);

    assert_eq!(inv.id(), 1);
    assert_eq!(inv.issuer_id(), "BIZ_01");
    assert_eq!(inv.recipient_id(), "BIZ_02");
    assert_eq!(inv.amount(), 1_000.0);
    assert_eq!(inv.outstanding_balance(), 1_000.0);
    assert_eq!(inv.status(), InvoiceStatus::Issued);
    assert_eq!(inv.paid_date(), None);
    assert!(inv.is_open());
    assert!(inv.payment_ids().is_empty());
}

#[test]
#[should_panic(expected = "amount must be positive")]
fn test_non_positive_amount_panics() {
    invoice(0.0);
}

#[test]
fn test_single_covering_payment_skips_partial() {
    let mut inv = invoice(1_000.0);
    let paid_on = date(2024, 3, 20);

    inv.apply_payment(1_000.0, paid_on, 5);

    assert_eq!(inv.status(), InvoiceStatus::Paid);
    assert_eq!(inv.outstanding_balance(), 0.0);
    assert_eq!(inv.paid_date(), Some(paid_on));
    assert_eq!(inv.payment_ids(), [5]);
    assert!(inv.is_paid());
}

#[test]
fn test_partial_payment_keeps_invoice_open() {
    let mut inv = invoice(1_000.0);

    inv.apply_payment(400.0, date(2024, 3, 20), 5);

    assert_eq!(inv.status(), InvoiceStatus::PartiallyPaid);
    assert!((inv.outstanding_balance() - 600.0).abs() < 1e-9);
    assert_eq!(inv.paid_date(), None);
    assert!(inv.is_open());
}

#[test]
fn test_partial_then_final_payment() {
    let mut inv = invoice(1_000.0);

    inv.apply_payment(300.0, date(2024, 3, 20), 5);
    inv.apply_payment(200.0, date(2024, 3, 22), 6);
    assert_eq!(inv.status(), InvoiceStatus::PartiallyPaid);
    assert!((inv.outstanding_balance() - 500.0).abs() < 1e-9);

    let final_day = date(2024, 3, 25);
    inv.apply_payment(500.0, final_day, 7);

    assert_eq!(inv.status(), InvoiceStatus::Paid);
    assert_eq!(inv.outstanding_balance(), 0.0);
    assert_eq!(inv.paid_date(), Some(final_day));
    assert_eq!(inv.payment_ids(), [5, 6, 7]);
}

#[test]
fn test_overpayment_floors_at_zero() {
    // Boundary behavior: paying 2x the outstanding amount is silently
    // absorbed, never failing and never driving the balance negative.
    let mut inv = invoice(1_000.0);
    let paid_on = date(2024, 3, 20);

    inv.apply_payment(2_000.0, paid_on, 5);

    assert_eq!(inv.outstanding_balance(), 0.0);
    assert_eq!(inv.status(), InvoiceStatus::Paid);
    assert_eq!(inv.paid_date(), Some(paid_on));
}

#[test]
fn test_paid_date_set_once() {
    let mut inv = invoice(1_000.0);
    let first = date(2024, 3, 20);

    inv.apply_payment(1_000.0, first, 5);
    // A later (redundant) payment must not move the paid date
    inv.apply_payment(50.0, date(2024, 3, 28), 6);

    assert_eq!(inv.paid_date(), Some(first));
    assert_eq!(inv.outstanding_balance(), 0.0);
}

proptest! {
    /// Any sequence of positive payments preserves the core invariants.
    #[test]
    fn prop_payment_sequences_preserve_invariants(
        amount in 1.0..100_000.0f64,
        payments in proptest::collection::vec(0.01..50_000.0f64, 1..20),
    ) {
        let mut inv = Invoice::new(
            9,
            "A".to_string(),
            "B".to_string(),
            amount,
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );

        for (i, p) in payments.iter().enumerate() {
            inv.apply_payment(*p, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(), i as u64);

            prop_assert!(inv.outstanding_balance() >= 0.0);
            prop_assert_eq!(
                inv.status() == InvoiceStatus::Paid,
                inv.outstanding_balance() == 0.0
            );
            prop_assert_eq!(inv.paid_date().is_some(), inv.is_paid());
        }

        prop_assert_eq!(inv.payment_ids().len(), payments.len());
    }
}
