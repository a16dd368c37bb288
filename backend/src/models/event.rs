//! Event logging for simulation auditing.
//!
//! The `Event` enum captures every significant state change during a run.
//! Events enable:
//! - Deterministic verification (same seed → identical event log)
//! - Debugging (understand what happened and when)
//! - Reporting (the CLI renders day summaries from events)
//!
//! The `PaymentDefaulted` variant is reporting-only: a default does not
//! transition the invoice to any terminal state and the invoice remains
//! eligible for payment on later days.

use chrono::NaiveDate;

/// Simulation event capturing a state change or classification.
///
/// All events carry the simulation day for temporal ordering. Events are
/// logged in the order they occur within a day.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An invoice was issued
    InvoiceIssued {
        day: usize,
        invoice_id: u64,
        issuer_id: String,
        recipient_id: String,
        amount: f64,
        due_date: NaiveDate,
    },

    /// A payment was made against one or more invoices
    PaymentMade {
        day: usize,
        payment_id: u64,
        payer_id: String,
        invoice_ids: Vec<u64>,
        amount: f64,
        /// True when the invoice was past due at payment time
        late: bool,
    },

    /// A business failed to pay an invoice past its maximum allowed delay.
    /// Reporting-only: the invoice stays open and is re-evaluated daily.
    PaymentDefaulted {
        day: usize,
        business_id: String,
        invoice_id: u64,
        days_overdue: u32,
    },

    /// End-of-day totals
    EndOfDay {
        day: usize,
        invoices_issued: usize,
        payments_made: usize,
        defaults_recorded: usize,
    },
}

impl Event {
    /// Get the simulation day this event occurred on
    pub fn day(&self) -> usize {
        match self {
            Event::InvoiceIssued { day, .. } => *day,
            Event::PaymentMade { day, .. } => *day,
            Event::PaymentDefaulted { day, .. } => *day,
            Event::EndOfDay { day, .. } => *day,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::InvoiceIssued { .. } => "InvoiceIssued",
            Event::PaymentMade { .. } => "PaymentMade",
            Event::PaymentDefaulted { .. } => "PaymentDefaulted",
            Event::EndOfDay { .. } => "EndOfDay",
        }
    }

    /// Get the invoice ID if the event concerns a single invoice
    pub fn invoice_id(&self) -> Option<u64> {
        match self {
            Event::InvoiceIssued { invoice_id, .. } => Some(*invoice_id),
            Event::PaymentDefaulted { invoice_id, .. } => Some(*invoice_id),
            _ => None,
        }
    }

    /// Get the acting business ID, if the event has one
    pub fn business_id(&self) -> Option<&str> {
        match self {
            Event::InvoiceIssued { issuer_id, .. } => Some(issuer_id),
            Event::PaymentMade { payer_id, .. } => Some(payer_id),
            Event::PaymentDefaulted { business_id, .. } => Some(business_id),
            Event::EndOfDay { .. } => None,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// A simple wrapper around `Vec<Event>` with convenience queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no events have been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, in logging order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events for a specific day
    pub fn events_on_day(&self, day: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.day() == day).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events involving a specific business
    pub fn events_for_business(&self, business_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.business_id() == Some(business_id))
            .collect()
    }
}
