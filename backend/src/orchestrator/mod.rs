//! Daily simulation loop
//!
//! The orchestrator owns all simulation state and drives one issuance pass
//! and one payment pass per simulated day.

mod engine;

pub use engine::{
    BusinessConfig, DayResult, Orchestrator, OrchestratorConfig, SimulationError,
};
