//! Simulation State
//!
//! Holds the complete state of an invoice-network simulation: all
//! businesses, invoices, and payments, each in an id-keyed registry, plus
//! the id allocator for invoice and payment numbering.
//!
//! # Critical Invariants
//!
//! 1. **Fixed enumeration order**: `business_ids()` preserves insertion
//!    order; all passes iterate businesses through it, never through the
//!    map, so a run is reproducible.
//! 2. **Id uniqueness**: invoice and payment ids are allocated monotonically
//!    by the state-owned `IdAllocator`; registering a duplicate panics.
//! 3. **Referential validity**: every invoice/payment id held in a business
//!    log resolves in the corresponding registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::business::Business;
use crate::models::invoice::Invoice;
use crate::models::payment::Payment;

/// Monotonic id source for invoices and payments.
///
/// Owned by the simulation state rather than living in process-global
/// counters, so parallel simulations and tests never interfere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next_invoice_id: u64,
    next_payment_id: u64,
}

impl IdAllocator {
    /// Start numbering at 1
    pub fn new() -> Self {
        Self {
            next_invoice_id: 1,
            next_payment_id: 1,
        }
    }

    /// Allocate the next invoice id
    pub fn next_invoice_id(&mut self) -> u64 {
        let id = self.next_invoice_id;
        self.next_invoice_id += 1;
        id
    }

    /// Allocate the next payment id
    pub fn next_payment_id(&mut self) -> u64 {
        let id = self.next_payment_id;
        self.next_payment_id += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete simulation state
///
/// # Example
/// ```
/// use invoice_simulator_core_rs::{AttributeProfile, Business, SimulationState};
///
/// let businesses = vec![
///     Business::new("BIZ_01".into(), "Business 1".into(), AttributeProfile::new(365, 100.0, 0)),
///     Business::new("BIZ_02".into(), "Business 2".into(), AttributeProfile::new(91, 50.0, 50)),
/// ];
///
/// let state = SimulationState::new(businesses);
/// assert_eq!(state.num_businesses(), 2);
/// assert_eq!(state.business_ids(), ["BIZ_01".to_string(), "BIZ_02".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// All businesses, indexed by ID
    businesses: HashMap<String, Business>,

    /// Business IDs in insertion order (the deterministic iteration order)
    business_order: Vec<String>,

    /// All invoices ever issued, indexed by ID (never deleted)
    invoices: HashMap<u64, Invoice>,

    /// All payments ever made, indexed by ID (never deleted)
    payments: HashMap<u64, Payment>,

    /// Monotonic invoice/payment id source
    ids: IdAllocator,
}

impl SimulationState {
    /// Create a new simulation state with the given businesses
    ///
    /// # Panics
    /// Panics if two businesses share an ID.
    pub fn new(businesses: Vec<Business>) -> Self {
        let mut map = HashMap::with_capacity(businesses.len());
        let mut order = Vec::with_capacity(businesses.len());

        for business in businesses {
            let id = business.id().to_string();
            assert!(
                map.insert(id.clone(), business).is_none(),
                "Business ID {} already exists",
                id
            );
            order.push(id);
        }

        Self {
            businesses: map,
            business_order: order,
            invoices: HashMap::new(),
            payments: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Get reference to a business by ID
    pub fn business(&self, id: &str) -> Option<&Business> {
        self.businesses.get(id)
    }

    /// Get mutable reference to a business by ID
    pub fn business_mut(&mut self, id: &str) -> Option<&mut Business> {
        self.businesses.get_mut(id)
    }

    /// Business IDs in the fixed enumeration order
    pub fn business_ids(&self) -> &[String] {
        &self.business_order
    }

    /// Get reference to all businesses (unordered registry)
    pub fn businesses(&self) -> &HashMap<String, Business> {
        &self.businesses
    }

    /// Get reference to an invoice by ID
    pub fn invoice(&self, id: u64) -> Option<&Invoice> {
        self.invoices.get(&id)
    }

    /// Get mutable reference to an invoice by ID
    pub fn invoice_mut(&mut self, id: u64) -> Option<&mut Invoice> {
        self.invoices.get_mut(&id)
    }

    /// Get reference to a payment by ID
    pub fn payment(&self, id: u64) -> Option<&Payment> {
        self.payments.get(&id)
    }

    /// Register a new invoice
    ///
    /// # Panics
    /// Panics if the invoice ID is already registered.
    pub fn add_invoice(&mut self, invoice: Invoice) {
        let id = invoice.id();
        assert!(
            self.invoices.insert(id, invoice).is_none(),
            "Invoice ID {} already exists",
            id
        );
    }

    /// Register a new payment
    ///
    /// # Panics
    /// Panics if the payment ID is already registered.
    pub fn add_payment(&mut self, payment: Payment) {
        let id = payment.id();
        assert!(
            self.payments.insert(id, payment).is_none(),
            "Payment ID {} already exists",
            id
        );
    }

    /// Allocate the next invoice id
    pub fn allocate_invoice_id(&mut self) -> u64 {
        self.ids.next_invoice_id()
    }

    /// Allocate the next payment id
    pub fn allocate_payment_id(&mut self) -> u64 {
        self.ids.next_payment_id()
    }

    /// Number of businesses in the system
    pub fn num_businesses(&self) -> usize {
        self.businesses.len()
    }

    /// Number of invoices ever issued
    pub fn num_invoices(&self) -> usize {
        self.invoices.len()
    }

    /// Number of payments ever made
    pub fn num_payments(&self) -> usize {
        self.payments.len()
    }

    /// Sum of cash across all balance sheets.
    ///
    /// Full single-invoice payments conserve this total; skewed explicit
    /// distributions may not (see the ledger's pre-payment-outstanding
    /// convention).
    pub fn total_cash(&self) -> f64 {
        self.businesses.values().map(|b| b.balance_sheet().cash()).sum()
    }

    /// Sum of outstanding balances across all open invoices
    pub fn open_invoice_value(&self) -> f64 {
        self.invoices
            .values()
            .filter(|i| i.is_open())
            .map(|i| i.outstanding_balance())
            .sum()
    }
}
