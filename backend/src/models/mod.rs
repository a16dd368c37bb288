//! Domain models: businesses, balance sheets, invoices, payments, events,
//! and the simulation state that owns them all.

pub mod balance_sheet;
pub mod business;
pub mod event;
pub mod invoice;
pub mod payment;
pub mod profile;
pub mod state;

pub use balance_sheet::BalanceSheet;
pub use business::Business;
pub use event::{Event, EventLog};
pub use invoice::{Invoice, InvoiceStatus};
pub use payment::{Distribution, Payment, PaymentError};
pub use profile::{AttributeProfile, ProfileError};
pub use state::{IdAllocator, SimulationState};
