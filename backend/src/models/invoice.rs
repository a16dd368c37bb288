//! Invoice model
//!
//! A single obligation from an issuing business to a receiving business.
//! Each invoice has:
//! - Issuer and recipient business IDs
//! - Amount (f64, fixed at creation) and a mutable outstanding balance
//! - A due date and, once fully paid, a paid date
//! - Status (Issued, PartiallyPaid, Paid)
//!
//! # Lifecycle
//!
//! ```text
//! Issued ──(partial payment)──► PartiallyPaid ──(final payment)──► Paid
//!    └──────────────(single covering payment)──────────────────────►┘
//! ```
//!
//! `PartiallyPaid` re-enters itself on every further partial payment.
//!
//! # Invariants
//!
//! 1. `status == Paid` iff `outstanding_balance == 0`
//! 2. `paid_date` is set iff `status == Paid`
//! 3. `outstanding_balance` is non-increasing and floored at zero

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Issued, nothing paid yet
    Issued,

    /// At least one payment applied, balance still outstanding
    PartiallyPaid,

    /// Fully paid, outstanding balance is zero
    Paid,
}

/// A single obligation between two businesses
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use invoice_simulator_core_rs::{Invoice, InvoiceStatus};
///
/// let due = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let mut invoice = Invoice::new(1, "BIZ_01".to_string(), "BIZ_02".to_string(), 1000.0, due);
/// assert_eq!(invoice.status(), InvoiceStatus::Issued);
///
/// invoice.apply_payment(400.0, due, 7);
/// assert_eq!(invoice.status(), InvoiceStatus::PartiallyPaid);
/// assert!((invoice.outstanding_balance() - 600.0).abs() < 1e-9);
///
/// invoice.apply_payment(600.0, due, 8);
/// assert_eq!(invoice.status(), InvoiceStatus::Paid);
/// assert_eq!(invoice.paid_date(), Some(due));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique, monotonically assigned identifier
    id: u64,

    /// Issuing business ID (the creditor)
    issuer_id: String,

    /// Receiving business ID (the debtor)
    recipient_id: String,

    /// Original invoice amount, fixed at creation
    amount: f64,

    /// Date the invoice falls due
    due_date: NaiveDate,

    /// Remaining unpaid amount; starts at `amount`, floored at zero
    outstanding_balance: f64,

    /// Date the invoice became fully paid, set exactly once
    paid_date: Option<NaiveDate>,

    /// Current lifecycle status
    status: InvoiceStatus,

    /// Payments that have touched this invoice, in application order
    payment_ids: Vec<u64>,
}

impl Invoice {
    /// Create a new invoice with its full amount outstanding
    ///
    /// # Panics
    /// Panics if `amount` is not positive. Callers (the ledger) validate
    /// amounts and report a proper error before constructing.
    pub fn new(
        id: u64,
        issuer_id: String,
        recipient_id: String,
        amount: f64,
        due_date: NaiveDate,
    ) -> Self {
        assert!(amount > 0.0, "amount must be positive");

        Self {
            id,
            issuer_id,
            recipient_id,
            amount,
            due_date,
            outstanding_balance: amount,
            paid_date: None,
            status: InvoiceStatus::Issued,
            payment_ids: Vec::new(),
        }
    }

    /// Apply a payment to this invoice, reducing the outstanding balance.
    ///
    /// If the balance reaches (or would cross) zero it is clamped to zero,
    /// the invoice transitions to `Paid` and `paid_date` is stamped;
    /// otherwise the invoice is `PartiallyPaid`. The payment reference is
    /// recorded in either case.
    ///
    /// This operation never fails: over-payment is silently absorbed and
    /// the balance floors at zero. That is a deliberate simplification of
    /// the domain, covered by a boundary test.
    pub fn apply_payment(&mut self, payment_amount: f64, payment_date: NaiveDate, payment_id: u64) {
        self.outstanding_balance -= payment_amount;
        if self.outstanding_balance <= 0.0 {
            self.outstanding_balance = 0.0;
            self.status = InvoiceStatus::Paid;
            if self.paid_date.is_none() {
                self.paid_date = Some(payment_date);
            }
        } else {
            self.status = InvoiceStatus::PartiallyPaid;
        }
        self.payment_ids.push(payment_id);
    }

    /// Invoice ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Issuing business ID
    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    /// Receiving business ID
    pub fn recipient_id(&self) -> &str {
        &self.recipient_id
    }

    /// Original invoice amount
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Due date
    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Remaining unpaid amount
    pub fn outstanding_balance(&self) -> f64 {
        self.outstanding_balance
    }

    /// Date of full payment, if reached
    pub fn paid_date(&self) -> Option<NaiveDate> {
        self.paid_date
    }

    /// Current status
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// True once the invoice is fully paid
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// True while any balance remains outstanding
    pub fn is_open(&self) -> bool {
        self.status != InvoiceStatus::Paid
    }

    /// Payments applied to this invoice, in order
    pub fn payment_ids(&self) -> &[u64] {
        &self.payment_ids
    }
}
