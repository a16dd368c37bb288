//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - Relationship wiring at setup (deterministic random graph)
//! - Probabilistic invoice issuance (per business, per customer)
//! - Payment decisions over due invoices (on-time / late / default)
//! - Event logging (complete simulation history)
//!
//! # Day loop
//!
//! ```text
//! For each day d in 1..=num_days:
//! 1. Issuance pass: every business, every customer in list order,
//!    issues with probability (invoices_per_year / |customers|) / 365;
//!    new invoices fall due 30 days out.
//! 2. Payment pass: every business, every open received invoice at or
//!    past its due date, rolls against the profile's on-time percentage
//!    (halved while 0 < days_overdue <= max_payment_delay); a hit pays
//!    the full outstanding balance; a miss past max_payment_delay is
//!    recorded as a default (reporting only).
//! 3. End-of-day event; balance sheets are reported by the caller.
//! ```
//!
//! A freshly issued invoice cannot be paid the same day: its due date is
//! 30 days ahead and the payment pass only examines invoices already due.
//!
//! # Determinism
//!
//! All randomness flows through the seeded `RngManager` in a fixed order:
//! one uniform draw per (business, customer) in the issuance pass, plus two
//! draws per issued invoice for the amount; one roll per due invoice in the
//! payment pass. Same seed + same config = identical runs.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::core::time::TimeManager;
use crate::ledger::{self, LedgerError};
use crate::models::business::Business;
use crate::models::event::{Event, EventLog};
use crate::models::payment::Distribution;
use crate::models::profile::AttributeProfile;
use crate::models::state::SimulationState;
use crate::network;
use crate::rng::RngManager;

/// Days after issuance at which an invoice falls due
const INVOICE_TERM_DAYS: u64 = 30;

/// Days per year for converting yearly invoice volume into a daily
/// issuance probability
const DAYS_PER_YEAR: f64 = 365.0;

/// Complete orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Number of days to simulate
    pub num_days: usize,

    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// Calendar date of day 0 (setup day)
    pub start_date: NaiveDate,

    /// Per-business configuration, in enumeration order
    pub business_configs: Vec<BusinessConfig>,

    /// Wire a random customer graph at construction. Disable for tests
    /// that build relationships by hand.
    pub wire_random_network: bool,
}

/// Per-business configuration
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    /// Unique business identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Behavioral profile (owned; typically from the preset catalog)
    pub profile: AttributeProfile,
}

/// Result of a single simulated day
#[derive(Debug, Clone, PartialEq)]
pub struct DayResult {
    /// Day number (1-based)
    pub day: usize,

    /// Calendar date of the day
    pub date: NaiveDate,

    /// Invoices issued during the issuance pass
    pub invoices_issued: usize,

    /// Payments made during the payment pass
    pub payments_made: usize,

    /// Default events recorded during the payment pass
    pub defaults_recorded: usize,

    /// Issuance draws discarded because the amount draw was non-positive
    pub discarded_draws: usize,
}

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("simulation already ran its configured {num_days} days")]
    SimulationComplete { num_days: usize },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Main orchestrator owning simulation state and the day loop
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use invoice_simulator_core_rs::orchestrator::{BusinessConfig, Orchestrator, OrchestratorConfig};
/// use invoice_simulator_core_rs::profiles::preset;
///
/// let config = OrchestratorConfig {
///     num_days: 10,
///     rng_seed: 12345,
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     business_configs: vec![
///         BusinessConfig {
///             id: "BIZ_01".to_string(),
///             name: "Business 1".to_string(),
///             profile: preset("A3").unwrap(),
///         },
///         BusinessConfig {
///             id: "BIZ_02".to_string(),
///             name: "Business 2".to_string(),
///             profile: preset("C5").unwrap(),
///         },
///     ],
///     wire_random_network: true,
/// };
///
/// let mut orchestrator = Orchestrator::new(config).unwrap();
/// let results = orchestrator.run().unwrap();
/// assert_eq!(results.len(), 10);
/// ```
pub struct Orchestrator {
    /// Simulation state (businesses, invoices, payments)
    state: SimulationState,

    /// Simulation calendar
    time_manager: TimeManager,

    /// Deterministic RNG
    rng_manager: RngManager,

    /// Event log (all simulation events)
    event_log: EventLog,

    /// Configured number of days
    num_days: usize,
}

impl Orchestrator {
    /// Create a new orchestrator from configuration
    ///
    /// Validates the configuration, builds all businesses, and (unless
    /// disabled) wires the random customer graph.
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let businesses: Vec<Business> = config
            .business_configs
            .into_iter()
            .map(|bc| Business::new(bc.id, bc.name, bc.profile))
            .collect();

        let mut state = SimulationState::new(businesses);
        let mut rng_manager = RngManager::new(config.rng_seed);

        if config.wire_random_network {
            network::wire_random_relationships(&mut state, &mut rng_manager);
        }

        Ok(Self {
            state,
            time_manager: TimeManager::new(config.start_date),
            rng_manager,
            event_log: EventLog::new(),
            num_days: config.num_days,
        })
    }

    /// Validate configuration
    fn validate_config(config: &OrchestratorConfig) -> Result<(), SimulationError> {
        if config.num_days == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_days must be > 0".to_string(),
            ));
        }

        if config.business_configs.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "must have at least one business".to_string(),
            ));
        }

        let mut ids = std::collections::HashSet::new();
        for business_config in &config.business_configs {
            if !ids.insert(&business_config.id) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate business ID: {}",
                    business_config.id
                )));
            }
        }

        Ok(())
    }

    /// Get current day number (0 until the first step)
    pub fn current_day(&self) -> usize {
        self.time_manager.current_day()
    }

    /// Get the calendar date of the current day
    pub fn current_date(&self) -> NaiveDate {
        self.time_manager.current_date()
    }

    /// Configured number of days
    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// True once all configured days have been simulated
    pub fn is_complete(&self) -> bool {
        self.time_manager.current_day() >= self.num_days
    }

    /// Get reference to simulation state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Get mutable reference to simulation state
    ///
    /// Primarily for tests that build bespoke scenarios; direct mutation
    /// bypasses orchestrator invariants.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Get reference to the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Execute one simulated day: issuance pass, then payment pass.
    pub fn step_day(&mut self) -> Result<DayResult, SimulationError> {
        if self.is_complete() {
            return Err(SimulationError::SimulationComplete {
                num_days: self.num_days,
            });
        }

        self.time_manager.advance_day();
        let day = self.time_manager.current_day();
        let date = self.time_manager.current_date();

        let order = self.state.business_ids().to_vec();

        let mut invoices_issued = 0;
        let mut discarded_draws = 0;

        // Issuance pass
        for business_id in &order {
            let business = self.state.business(business_id).unwrap();
            let customers = business.customer_ids().to_vec();
            if customers.is_empty() {
                continue;
            }

            let yearly_volume = business.profile().invoices_per_year() as f64;
            let per_customer_volume = yearly_volume / customers.len() as f64;
            let daily_probability = per_customer_volume / DAYS_PER_YEAR;

            for customer_id in &customers {
                if self.rng_manager.next_f64() >= daily_probability {
                    continue;
                }

                let due_date = date + Days::new(INVOICE_TERM_DAYS);
                match ledger::issue_invoice(
                    &mut self.state,
                    business_id,
                    customer_id,
                    due_date,
                    date,
                    &mut self.rng_manager,
                ) {
                    Ok(invoice_id) => {
                        let amount = self.state.invoice(invoice_id).unwrap().amount();
                        self.event_log.log(Event::InvoiceIssued {
                            day,
                            invoice_id,
                            issuer_id: business_id.clone(),
                            recipient_id: customer_id.clone(),
                            amount,
                            due_date,
                        });
                        invoices_issued += 1;
                    }
                    // A non-positive normal draw means no invoice today,
                    // not a broken run.
                    Err(LedgerError::NonPositiveAmount { .. }) => {
                        discarded_draws += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let mut payments_made = 0;
        let mut defaults_recorded = 0;

        // Payment pass
        for business_id in &order {
            let (on_time_percentage, max_delay, open_invoices) = {
                let business = self.state.business(business_id).unwrap();
                let open: Vec<u64> = business
                    .received_invoices()
                    .iter()
                    .copied()
                    .filter(|id| {
                        self.state
                            .invoice(*id)
                            .map(|invoice| invoice.is_open())
                            .unwrap_or(false)
                    })
                    .collect();
                (
                    business.profile().on_time_payment_percentage(),
                    business.profile().max_payment_delay(),
                    open,
                )
            };

            for invoice_id in open_invoices {
                let (due_date, outstanding) = {
                    let invoice = self.state.invoice(invoice_id).unwrap();
                    (invoice.due_date(), invoice.outstanding_balance())
                };

                if date < due_date {
                    continue;
                }

                let days_overdue = date.signed_duration_since(due_date).num_days().max(0) as u32;

                let mut payment_probability = on_time_percentage;
                if days_overdue > 0 && days_overdue <= max_delay {
                    // Late but within the tolerated window: half as likely
                    payment_probability /= 2.0;
                }

                let roll = self.rng_manager.range(1, 101);
                if roll as f64 <= payment_probability {
                    let payment_id = ledger::issue_payment(
                        &mut self.state,
                        business_id,
                        &[invoice_id],
                        outstanding,
                        date,
                        &Distribution::EvenSplit,
                    )?;
                    self.event_log.log(Event::PaymentMade {
                        day,
                        payment_id,
                        payer_id: business_id.clone(),
                        invoice_ids: vec![invoice_id],
                        amount: outstanding,
                        late: days_overdue > 0,
                    });
                    payments_made += 1;
                } else if days_overdue > max_delay {
                    // Reporting-only: the invoice stays open and will be
                    // re-evaluated tomorrow.
                    self.event_log.log(Event::PaymentDefaulted {
                        day,
                        business_id: business_id.clone(),
                        invoice_id,
                        days_overdue,
                    });
                    defaults_recorded += 1;
                }
            }
        }

        self.event_log.log(Event::EndOfDay {
            day,
            invoices_issued,
            payments_made,
            defaults_recorded,
        });

        Ok(DayResult {
            day,
            date,
            invoices_issued,
            payments_made,
            defaults_recorded,
            discarded_draws,
        })
    }

    /// Run all remaining days to completion
    pub fn run(&mut self) -> Result<Vec<DayResult>, SimulationError> {
        let mut results = Vec::with_capacity(self.num_days - self.current_day());
        while !self.is_complete() {
            results.push(self.step_day()?);
        }
        Ok(results)
    }
}
