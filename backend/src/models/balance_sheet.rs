//! Balance sheet model
//!
//! Four running totals per business: cash, accounts receivable, accounts
//! payable, and debt. Each field is mutated only through its additive update
//! operation; deltas may be negative and no field is forced non-negative
//! (a payable-heavy business may legitimately run negative cash).

use serde::{Deserialize, Serialize};

/// Running balance-sheet totals for a single business
///
/// Owned exclusively by one `Business`; the ledger operations are the only
/// writers during a simulation run.
///
/// # Example
/// ```
/// use invoice_simulator_core_rs::BalanceSheet;
///
/// let mut sheet = BalanceSheet::new();
/// sheet.add_cash(500.0);
/// sheet.add_cash(-125.5);
/// assert!((sheet.cash() - 374.5).abs() < 1e-9);
/// assert_eq!(sheet.accounts_receivable(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    cash: f64,
    accounts_receivable: f64,
    accounts_payable: f64,
    debt: f64,
}

impl BalanceSheet {
    /// Create a balance sheet with all fields at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust cash by `amount` (positive or negative)
    pub fn add_cash(&mut self, amount: f64) {
        self.cash += amount;
    }

    /// Adjust accounts receivable by `amount`
    pub fn add_receivable(&mut self, amount: f64) {
        self.accounts_receivable += amount;
    }

    /// Adjust accounts payable by `amount`
    pub fn add_payable(&mut self, amount: f64) {
        self.accounts_payable += amount;
    }

    /// Adjust debt by `amount`
    pub fn add_debt(&mut self, amount: f64) {
        self.debt += amount;
    }

    /// Current cash position
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Current accounts receivable
    pub fn accounts_receivable(&self) -> f64 {
        self.accounts_receivable
    }

    /// Current accounts payable
    pub fn accounts_payable(&self) -> f64 {
        self.accounts_payable
    }

    /// Current debt
    pub fn debt(&self) -> f64 {
        self.debt
    }
}
