//! Business model
//!
//! A business owns its attribute profile and balance sheet, a directed
//! customer list ("sells to" edges), and three append-only logs of invoice
//! and payment ids. Businesses are created at simulation setup and never
//! destroyed during a run.

use serde::{Deserialize, Serialize};

use crate::models::balance_sheet::BalanceSheet;
use crate::models::profile::AttributeProfile;

/// A participant in the invoice network
///
/// # Example
/// ```
/// use invoice_simulator_core_rs::{AttributeProfile, Business};
///
/// let profile = AttributeProfile::new(365, 90.0, 10);
/// let mut biz = Business::new("BIZ_01".to_string(), "Business 1".to_string(), profile);
///
/// biz.add_customer("BIZ_02");
/// biz.add_customer("BIZ_02"); // duplicates are ignored
/// assert_eq!(biz.customer_ids(), ["BIZ_02".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    /// Unique business identifier
    id: String,

    /// Display name
    name: String,

    /// Behavioral parameters, owned by this business (never shared)
    profile: AttributeProfile,

    /// Balance sheet, owned exclusively by this business
    balance_sheet: BalanceSheet,

    /// Directed "sells to" edges, in insertion order (drives the
    /// deterministic issuance iteration)
    customer_ids: Vec<String>,

    /// Invoices this business has issued (append-only audit trail)
    sent_invoices: Vec<u64>,

    /// Invoices this business has received (append-only audit trail)
    received_invoices: Vec<u64>,

    /// Payments this business has made (append-only audit trail)
    payments_made: Vec<u64>,
}

impl Business {
    /// Create a business with an empty balance sheet and no relationships
    pub fn new(id: String, name: String, profile: AttributeProfile) -> Self {
        Self {
            id,
            name,
            profile,
            balance_sheet: BalanceSheet::new(),
            customer_ids: Vec::new(),
            sent_invoices: Vec::new(),
            received_invoices: Vec::new(),
            payments_made: Vec::new(),
        }
    }

    /// Add a customer edge if not already present
    pub fn add_customer(&mut self, customer_id: &str) {
        if !self.has_customer(customer_id) {
            self.customer_ids.push(customer_id.to_string());
        }
    }

    /// True if `customer_id` is in this business's customer list
    pub fn has_customer(&self, customer_id: &str) -> bool {
        self.customer_ids.iter().any(|id| id == customer_id)
    }

    /// Business ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Behavioral profile
    pub fn profile(&self) -> &AttributeProfile {
        &self.profile
    }

    /// Mutable behavioral profile (relationship wiring sets customer
    /// averages through this)
    pub fn profile_mut(&mut self) -> &mut AttributeProfile {
        &mut self.profile
    }

    /// Balance sheet
    pub fn balance_sheet(&self) -> &BalanceSheet {
        &self.balance_sheet
    }

    /// Mutable balance sheet (ledger operations are the only writers)
    pub fn balance_sheet_mut(&mut self) -> &mut BalanceSheet {
        &mut self.balance_sheet
    }

    /// Customer edges in insertion order
    pub fn customer_ids(&self) -> &[String] {
        &self.customer_ids
    }

    /// Invoices issued by this business, in issuance order
    pub fn sent_invoices(&self) -> &[u64] {
        &self.sent_invoices
    }

    /// Invoices received by this business, in issuance order
    pub fn received_invoices(&self) -> &[u64] {
        &self.received_invoices
    }

    /// Payments made by this business, in order
    pub fn payments_made(&self) -> &[u64] {
        &self.payments_made
    }

    /// Append to the sent-invoice log
    pub fn record_sent_invoice(&mut self, invoice_id: u64) {
        self.sent_invoices.push(invoice_id);
    }

    /// Append to the received-invoice log
    pub fn record_received_invoice(&mut self, invoice_id: u64) {
        self.received_invoices.push(invoice_id);
    }

    /// Append to the payment log
    pub fn record_payment(&mut self, payment_id: u64) {
        self.payments_made.push(payment_id);
    }
}
