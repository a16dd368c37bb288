//! Payment model
//!
//! A single disbursement from a payer, applied across one or more invoices
//! according to a distribution of percentages. The distribution is an
//! explicit, validated configuration value rather than an optional
//! parameter: either an even split or an explicit percentage list that must
//! match the invoice count and sum to 100.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for validating that explicit percentages sum to 100
const SUM_TOLERANCE: f64 = 1e-6;

/// Errors from distribution validation
#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    #[error("distribution has {actual} percentages for {expected} invoices")]
    DistributionLengthMismatch { expected: usize, actual: usize },

    #[error("distribution percentages sum to {sum}, expected 100")]
    DistributionSumInvalid { sum: f64 },

    #[error("cannot distribute a payment across zero invoices")]
    NoInvoices,
}

/// How a payment's total is split across the invoices it settles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Split the total evenly: `100 / n` percent per invoice
    EvenSplit,

    /// Explicit per-invoice percentages; must match the invoice count and
    /// sum to 100
    Explicit(Vec<f64>),
}

impl Distribution {
    /// Resolve into a concrete percentage list for `invoice_count` invoices
    ///
    /// # Example
    /// ```
    /// use invoice_simulator_core_rs::Distribution;
    ///
    /// let pcts = Distribution::EvenSplit.resolve(4).unwrap();
    /// assert_eq!(pcts, vec![25.0; 4]);
    ///
    /// let total: f64 = Distribution::EvenSplit.resolve(3).unwrap().iter().sum();
    /// assert!((total - 100.0).abs() < 1e-6);
    /// ```
    pub fn resolve(&self, invoice_count: usize) -> Result<Vec<f64>, PaymentError> {
        if invoice_count == 0 {
            return Err(PaymentError::NoInvoices);
        }

        match self {
            Distribution::EvenSplit => {
                Ok(vec![100.0 / invoice_count as f64; invoice_count])
            }
            Distribution::Explicit(percentages) => {
                if percentages.len() != invoice_count {
                    return Err(PaymentError::DistributionLengthMismatch {
                        expected: invoice_count,
                        actual: percentages.len(),
                    });
                }
                let sum: f64 = percentages.iter().sum();
                if (sum - 100.0).abs() > SUM_TOLERANCE {
                    return Err(PaymentError::DistributionSumInvalid { sum });
                }
                Ok(percentages.clone())
            }
        }
    }
}

/// A single disbursement applied across one or more invoices
///
/// Constructed by the ledger after all validation has passed; application to
/// the listed invoices happens immediately and in list order, so from the
/// caller's perspective a payment either fully happens or not at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique, monotonically assigned identifier
    id: u64,

    /// Paying business ID
    payer_id: String,

    /// Total amount disbursed
    amount: f64,

    /// Date the payment was made
    payment_date: NaiveDate,

    /// Invoices this payment was applied to, in application order
    invoice_ids: Vec<u64>,

    /// Resolved percentage split, parallel to `invoice_ids`
    distribution_percentages: Vec<f64>,

    /// Amount routed to each payee (invoice issuer), keyed by business id
    payee_amounts: HashMap<String, f64>,
}

impl Payment {
    /// Create a payment record with a resolved distribution
    ///
    /// # Panics
    /// Panics on internal invariant violations (empty invoice list,
    /// mismatched distribution, non-positive amount). The ledger validates
    /// all of these and reports proper errors before constructing.
    pub fn new(
        id: u64,
        payer_id: String,
        amount: f64,
        payment_date: NaiveDate,
        invoice_ids: Vec<u64>,
        distribution_percentages: Vec<f64>,
    ) -> Self {
        assert!(amount > 0.0, "amount must be positive");
        assert!(!invoice_ids.is_empty(), "invoice list must not be empty");
        assert_eq!(
            invoice_ids.len(),
            distribution_percentages.len(),
            "distribution must be parallel to invoice list"
        );

        Self {
            id,
            payer_id,
            amount,
            payment_date,
            invoice_ids,
            distribution_percentages,
            payee_amounts: HashMap::new(),
        }
    }

    /// Record an amount routed to a payee (accumulates per business)
    pub fn record_payee_amount(&mut self, payee_id: &str, amount: f64) {
        *self.payee_amounts.entry(payee_id.to_string()).or_insert(0.0) += amount;
    }

    /// Payment ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Paying business ID
    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }

    /// Total amount disbursed
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Date the payment was made
    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    /// Invoices the payment was applied to, in order
    pub fn invoice_ids(&self) -> &[u64] {
        &self.invoice_ids
    }

    /// Resolved percentage split, parallel to `invoice_ids`
    pub fn distribution_percentages(&self) -> &[f64] {
        &self.distribution_percentages
    }

    /// Amount routed to each payee
    pub fn payee_amounts(&self) -> &HashMap<String, f64> {
        &self.payee_amounts
    }
}
