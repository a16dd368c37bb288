//! Invoice Network Simulator - Core Engine
//!
//! Simulates a network of businesses issuing invoices to and paying one
//! another over discrete days, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Time management (day-stepped simulation calendar)
//! - **models**: Domain types (Business, BalanceSheet, Invoice, Payment, State)
//! - **ledger**: Invoice issuance and payment application
//! - **network**: Customer-relationship wiring
//! - **profiles**: Preset attribute catalog (A1-F5 codes)
//! - **orchestrator**: Daily simulation loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, fixed consumption order)
//! 2. Businesses are iterated in a fixed insertion order
//! 3. An invoice is `Paid` exactly when its outstanding balance is zero
//! 4. Ledger operations validate fully before mutating any balance sheet

// Module declarations
pub mod core;
pub mod ledger;
pub mod models;
pub mod network;
pub mod orchestrator;
pub mod profiles;
pub mod rng;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use ledger::{issue_invoice, issue_payment, LedgerError};
pub use models::{
    balance_sheet::BalanceSheet,
    business::Business,
    event::{Event, EventLog},
    invoice::{Invoice, InvoiceStatus},
    payment::{Distribution, Payment, PaymentError},
    profile::{AttributeProfile, ProfileError},
    state::{IdAllocator, SimulationState},
};
pub use orchestrator::{BusinessConfig, DayResult, Orchestrator, OrchestratorConfig, SimulationError};
pub use rng::RngManager;
