//! Invoice issuance and payment application
//!
//! These are the only two operations that mutate more than one business at a
//! time, so they live as free functions over `&mut SimulationState` rather
//! than as methods on `Business`.
//!
//! # Critical Invariants
//!
//! - **Validate-then-mutate**: every precondition is checked before the
//!   first balance-sheet write, so a failed operation leaves no partial
//!   state behind.
//! - **Issuance symmetry**: issuing an invoice moves exactly the invoice
//!   amount into the issuer's receivables and the recipient's payables;
//!   nothing else changes.
//! - **Pre-payment convention**: payment application reduces the payer's
//!   payables by the sum of the invoices' outstanding balances *before* any
//!   payment is applied, and credits each issuer using that same pre-payment
//!   balance scaled by the distribution. When the distribution percentages
//!   do not mirror the outstanding-balance ratios, balance sheets drift from
//!   invoice state. This mirrors the modeled system and is pinned by tests
//!   rather than reconciled away.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::invoice::Invoice;
use crate::models::payment::{Distribution, Payment, PaymentError};
use crate::models::profile::ProfileError;
use crate::models::state::SimulationState;
use crate::rng::RngManager;

/// Errors that can occur during ledger operations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("unknown business: {id}")]
    UnknownBusiness { id: String },

    #[error("unknown invoice: {id}")]
    UnknownInvoice { id: u64 },

    #[error("{recipient} is not a customer of {issuer}")]
    NotACustomer { issuer: String, recipient: String },

    #[error("due date {due_date} precedes the current date {current_date}")]
    DueDateInPast {
        due_date: NaiveDate,
        current_date: NaiveDate,
    },

    #[error("drawn invoice amount {amount} is not positive")]
    NonPositiveAmount { amount: f64 },

    #[error("payment amount {amount} must be positive")]
    NonPositivePayment { amount: f64 },

    #[error("payment must apply to at least one invoice")]
    EmptyInvoiceList,

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Issue an invoice from `issuer_id` to `recipient_id`.
///
/// The amount is drawn from the issuer's profile (normal around the
/// configured per-customer average). Preconditions, each failing with a
/// `LedgerError` before any state changes:
///
/// - both businesses exist,
/// - `due_date` does not precede `current_date`,
/// - the recipient is in the issuer's customer list,
/// - an average is configured for the recipient,
/// - the drawn amount is positive.
///
/// On success the invoice is registered, the issuer's receivables and the
/// recipient's payables both grow by the invoice amount, and the invoice id
/// is appended to both parties' logs.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use invoice_simulator_core_rs::{
///     issue_invoice, AttributeProfile, Business, RngManager, SimulationState,
/// };
///
/// let mut issuer = Business::new("A".into(), "A Corp".into(), AttributeProfile::new(365, 100.0, 0));
/// issuer.add_customer("B");
/// issuer.profile_mut().set_customer_average("B", 1000.0);
/// let recipient = Business::new("B".into(), "B Corp".into(), AttributeProfile::new(365, 100.0, 0));
///
/// let mut state = SimulationState::new(vec![issuer, recipient]);
/// let mut rng = RngManager::new(42);
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let invoice_id = issue_invoice(&mut state, "A", "B", today, today, &mut rng).unwrap();
/// let invoice = state.invoice(invoice_id).unwrap();
/// let amount = invoice.amount();
/// assert!((state.business("A").unwrap().balance_sheet().accounts_receivable() - amount).abs() < 1e-9);
/// assert!((state.business("B").unwrap().balance_sheet().accounts_payable() - amount).abs() < 1e-9);
/// ```
pub fn issue_invoice(
    state: &mut SimulationState,
    issuer_id: &str,
    recipient_id: &str,
    due_date: NaiveDate,
    current_date: NaiveDate,
    rng: &mut RngManager,
) -> Result<u64, LedgerError> {
    let amount = {
        let issuer = state
            .business(issuer_id)
            .ok_or_else(|| LedgerError::UnknownBusiness {
                id: issuer_id.to_string(),
            })?;

        if state.business(recipient_id).is_none() {
            return Err(LedgerError::UnknownBusiness {
                id: recipient_id.to_string(),
            });
        }

        if due_date < current_date {
            return Err(LedgerError::DueDateInPast {
                due_date,
                current_date,
            });
        }

        if !issuer.has_customer(recipient_id) {
            return Err(LedgerError::NotACustomer {
                issuer: issuer_id.to_string(),
                recipient: recipient_id.to_string(),
            });
        }

        issuer.profile().generate_invoice_amount(recipient_id, rng)?
    };

    // The normal draw has an unbounded left tail; a non-positive draw is
    // rejected here and the caller decides whether it is fatal.
    if amount <= 0.0 {
        return Err(LedgerError::NonPositiveAmount { amount });
    }

    let invoice_id = state.allocate_invoice_id();
    let invoice = Invoice::new(
        invoice_id,
        issuer_id.to_string(),
        recipient_id.to_string(),
        amount,
        due_date,
    );

    let issuer = state.business_mut(issuer_id).unwrap();
    issuer.balance_sheet_mut().add_receivable(amount);
    issuer.record_sent_invoice(invoice_id);

    let recipient = state.business_mut(recipient_id).unwrap();
    recipient.balance_sheet_mut().add_payable(amount);
    recipient.record_received_invoice(invoice_id);

    state.add_invoice(invoice);
    Ok(invoice_id)
}

/// Apply a payment from `payer_id` across `invoice_ids`.
///
/// Preconditions, each failing with a `LedgerError` before any state
/// changes: the total amount is positive, the invoice list is non-empty,
/// the payer and every listed invoice exist, and the distribution resolves
/// for the invoice count.
///
/// Effects, in order:
///
/// 1. payer cash decreases by the total amount;
/// 2. payer payables decrease by the sum of the invoices' pre-payment
///    outstanding balances;
/// 3. for each invoice, the issuing business's cash increases and its
///    receivables decrease by `pre-payment outstanding × pct / 100`;
/// 4. the payment applies itself to every invoice in list order
///    (`total × pct / 100` per invoice), recording per-payee amounts;
/// 5. the payment is appended to the payer's log and registered.
///
/// Steps 2 and 3 deliberately use the pre-payment outstanding balances, not
/// the amounts actually settled per the distribution (see module docs).
pub fn issue_payment(
    state: &mut SimulationState,
    payer_id: &str,
    invoice_ids: &[u64],
    total_amount: f64,
    payment_date: NaiveDate,
    distribution: &Distribution,
) -> Result<u64, LedgerError> {
    if total_amount <= 0.0 {
        return Err(LedgerError::NonPositivePayment {
            amount: total_amount,
        });
    }
    if invoice_ids.is_empty() {
        return Err(LedgerError::EmptyInvoiceList);
    }
    if state.business(payer_id).is_none() {
        return Err(LedgerError::UnknownBusiness {
            id: payer_id.to_string(),
        });
    }

    let percentages = distribution.resolve(invoice_ids.len())?;

    // Snapshot issuer and outstanding balance per invoice before any
    // mutation; these pre-payment values drive steps 2 and 3.
    let mut entries = Vec::with_capacity(invoice_ids.len());
    for &invoice_id in invoice_ids {
        let invoice = state
            .invoice(invoice_id)
            .ok_or(LedgerError::UnknownInvoice { id: invoice_id })?;
        entries.push((
            invoice_id,
            invoice.issuer_id().to_string(),
            invoice.outstanding_balance(),
        ));
    }

    // All validation passed; mutations start here.
    let payment_id = state.allocate_payment_id();

    let owed: f64 = entries.iter().map(|(_, _, outstanding)| outstanding).sum();
    let payer = state.business_mut(payer_id).unwrap();
    payer.balance_sheet_mut().add_cash(-total_amount);
    payer.balance_sheet_mut().add_payable(-owed);

    for ((_, issuer_id, outstanding), pct) in entries.iter().zip(&percentages) {
        let credited = outstanding * (pct / 100.0);
        let issuer = state.business_mut(issuer_id).unwrap();
        issuer.balance_sheet_mut().add_cash(credited);
        issuer.balance_sheet_mut().add_receivable(-credited);
    }

    let mut payment = Payment::new(
        payment_id,
        payer_id.to_string(),
        total_amount,
        payment_date,
        invoice_ids.to_vec(),
        percentages.clone(),
    );

    for ((invoice_id, issuer_id, _), pct) in entries.iter().zip(&percentages) {
        let share = total_amount * (pct / 100.0);
        let invoice = state.invoice_mut(*invoice_id).unwrap();
        invoice.apply_payment(share, payment_date, payment_id);
        payment.record_payee_amount(issuer_id, share);
    }

    state.business_mut(payer_id).unwrap().record_payment(payment_id);
    state.add_payment(payment);
    Ok(payment_id)
}
