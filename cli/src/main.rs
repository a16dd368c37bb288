//! Interactive front-end for the invoice network simulator.
//!
//! Collects the simulation parameters from the terminal (business count,
//! preset profile codes, relationship mode, day count), runs the day loop,
//! and prints a balance-sheet report at the end of every simulated day.
//!
//! All user-input errors are caught and re-prompted; they never abort the
//! process.

mod input;
mod report;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use invoice_simulator_core_rs::orchestrator::{BusinessConfig, Orchestrator, OrchestratorConfig};
use invoice_simulator_core_rs::profiles;

/// Initialize tracing for the process.
///
/// Compact console output, configurable via RUST_LOG. Safe to call once at
/// startup.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn collect_business_configs() -> Result<Vec<BusinessConfig>> {
    let count = input::prompt_positive_usize("Enter the number of businesses to create: ")?;

    let mut configs = Vec::with_capacity(count);
    for i in 1..=count {
        println!();
        println!("Select attributes for Business #{}:", i);
        println!("Choose from A1 to F5.");

        let profile = input::prompt_until("Enter your choice: ", |raw| {
            profiles::preset(raw).ok_or("Invalid choice. Please choose from A1 to F5.")
        })?;

        configs.push(BusinessConfig {
            id: format!("BIZ_{:02}", i),
            name: format!("Business {}", i),
            profile,
        });
    }

    Ok(configs)
}

fn main() -> Result<()> {
    init_tracing();

    let business_configs = collect_business_configs()?;

    println!();
    println!("Setting up customer relationships...");
    let manual = input::prompt_yes_no("Do you want to manually define customer relationships? (yes/no): ")?;
    if manual {
        // Manual wiring is not available yet; fall through to random
        // wiring so the run still produces a connected network.
        println!("Manual relationship definition is not available yet; using random wiring.");
    }

    let num_days = input::prompt_positive_usize("Enter the number of days to simulate: ")?;

    let rng_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_nanos() as u64;
    info!(rng_seed, "seeding simulation (reuse this seed to replay the run)");

    let config = OrchestratorConfig {
        num_days,
        rng_seed,
        start_date: Local::now().date_naive(),
        business_configs,
        wire_random_network: true,
    };

    let mut orchestrator = Orchestrator::new(config).context("failed to set up simulation")?;
    report::print_network(orchestrator.state());

    println!("Simulation starting...");
    while !orchestrator.is_complete() {
        let result = orchestrator
            .step_day()
            .context("simulated day failed")?;
        println!(
            "Day {} of {} ({})",
            result.day,
            orchestrator.num_days(),
            result.date
        );
        report::print_day(&result, orchestrator.state());
    }

    report::print_run_summary(orchestrator.event_log());
    println!("Simulation completed.");
    Ok(())
}
