//! End-to-end orchestrator tests
//!
//! Scenario tests exercise the full day loop: probabilistic issuance,
//! payment decisions, default classification, and determinism.

use chrono::{Days, NaiveDate};
use invoice_simulator_core_rs::orchestrator::{
    BusinessConfig, Orchestrator, OrchestratorConfig, SimulationError,
};
use invoice_simulator_core_rs::profiles::preset;
use invoice_simulator_core_rs::{issue_invoice, AttributeProfile, Event, RngManager};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn business_config(id: &str, profile: AttributeProfile) -> BusinessConfig {
    BusinessConfig {
        id: id.to_string(),
        name: format!("Business {}", id),
        profile,
    }
}

fn preset_config(num_days: usize, seed: u64) -> OrchestratorConfig {
    OrchestratorConfig {
        num_days,
        rng_seed: seed,
        start_date: start_date(),
        business_configs: vec![
            business_config("BIZ_01", preset("C3").unwrap()),
            business_config("BIZ_02", preset("D4").unwrap()),
            business_config("BIZ_03", preset("B5").unwrap()),
            business_config("BIZ_04", preset("F3").unwrap()),
            business_config("BIZ_05", preset("A2").unwrap()),
            business_config("BIZ_06", preset("E4").unwrap()),
        ],
        wire_random_network: true,
    }
}

// ============================================================================
// Configuration validation
// ============================================================================

#[test]
fn test_zero_days_rejected() {
    let mut config = preset_config(0, 1);
    config.num_days = 0;
    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_empty_business_list_rejected() {
    let mut config = preset_config(5, 1);
    config.business_configs.clear();
    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

#[test]
fn test_duplicate_business_ids_rejected() {
    let mut config = preset_config(5, 1);
    config
        .business_configs
        .push(business_config("BIZ_01", preset("A1").unwrap()));
    assert!(matches!(
        Orchestrator::new(config),
        Err(SimulationError::InvalidConfig(_))
    ));
}

// ============================================================================
// Day loop mechanics
// ============================================================================

#[test]
fn test_run_covers_configured_days() {
    let mut orchestrator = Orchestrator::new(preset_config(15, 99)).unwrap();
    assert_eq!(orchestrator.current_day(), 0);
    assert!(!orchestrator.is_complete());

    let results = orchestrator.run().unwrap();

    assert_eq!(results.len(), 15);
    assert!(orchestrator.is_complete());
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.day, i + 1);
        assert_eq!(result.date, start_date() + Days::new((i + 1) as u64));
    }

    // Stepping past the end is an error, not a silent extra day
    assert!(matches!(
        orchestrator.step_day(),
        Err(SimulationError::SimulationComplete { num_days: 15 })
    ));
}

#[test]
fn test_invoices_fall_due_30_days_out() {
    let mut orchestrator = Orchestrator::new(preset_config(20, 4242)).unwrap();
    orchestrator.run().unwrap();

    let issued = orchestrator.event_log().events_of_type("InvoiceIssued");
    assert!(!issued.is_empty(), "seed produced no invoices in 20 days");

    for event in issued {
        if let Event::InvoiceIssued { day, due_date, .. } = event {
            let issue_date = start_date() + Days::new(*day as u64);
            assert_eq!(*due_date, issue_date + Days::new(30));
        }
    }
}

#[test]
fn test_paid_invoices_satisfy_invariants() {
    let mut orchestrator = Orchestrator::new(preset_config(60, 2718)).unwrap();
    orchestrator.run().unwrap();

    let state = orchestrator.state();
    let mut checked = 0;
    for id in 1..=state.num_invoices() as u64 {
        let invoice = state.invoice(id).unwrap();
        if invoice.is_paid() {
            assert_eq!(invoice.outstanding_balance(), 0.0);
            let paid = invoice.paid_date().expect("paid invoice without paid_date");
            // Payments only happen at or after the due date
            assert!(paid >= invoice.due_date());
            checked += 1;
        } else {
            assert!(invoice.paid_date().is_none());
        }
    }
    assert!(checked > 0, "seed produced no paid invoices in 60 days");
}

#[test]
fn test_engine_payments_conserve_total_cash() {
    let mut orchestrator = Orchestrator::new(preset_config(45, 1618)).unwrap();
    orchestrator.run().unwrap();

    // Every engine payment settles a single invoice in full, so cash just
    // moves between businesses and the system total stays at zero.
    assert!(orchestrator.state().total_cash().abs() < 1e-6);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_reproduces_run_exactly() {
    let mut first = Orchestrator::new(preset_config(40, 12345)).unwrap();
    let mut second = Orchestrator::new(preset_config(40, 12345)).unwrap();

    let results1 = first.run().unwrap();
    let results2 = second.run().unwrap();

    assert_eq!(results1, results2);
    assert_eq!(first.event_log(), second.event_log());

    for id in first.state().business_ids() {
        assert_eq!(
            first.state().business(id).unwrap().balance_sheet(),
            second.state().business(id).unwrap().balance_sheet()
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut first = Orchestrator::new(preset_config(40, 1)).unwrap();
    let mut second = Orchestrator::new(preset_config(40, 2)).unwrap();

    first.run().unwrap();
    second.run().unwrap();

    assert_ne!(first.event_log(), second.event_log());
}

// ============================================================================
// Scenario: reliable payer settles on the due date
// ============================================================================

#[test]
fn test_reliable_payer_pays_on_due_date() {
    // Issuer with an extreme invoice frequency (issues every day with
    // certainty) and a perfectly reliable customer: on_time = 100%,
    // max_payment_delay = 0.
    let config = OrchestratorConfig {
        num_days: 31,
        rng_seed: 7,
        start_date: start_date(),
        business_configs: vec![
            business_config("SELLER", AttributeProfile::new(73_000, 100.0, 0)),
            business_config("BUYER", AttributeProfile::new(365, 100.0, 0)),
        ],
        wire_random_network: false,
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();

    {
        let state = orchestrator.state_mut();
        let seller = state.business_mut("SELLER").unwrap();
        seller.add_customer("BUYER");
        seller.profile_mut().set_customer_average("BUYER", 1_000.0);
    }

    let results = orchestrator.run().unwrap();

    // daily_probability = (73000 / 1) / 365 = 200 > 1, so an invoice goes
    // out every single day
    let issued_by_day_30: usize = results[..30].iter().map(|r| r.invoices_issued).sum();
    assert!(issued_by_day_30 >= 1);

    // The day-1 invoice falls due on day 31 and the buyer pays on time
    // with certainty.
    let last = results.last().unwrap();
    assert_eq!(last.day, 31);
    assert_eq!(last.payments_made, 1);
    assert_eq!(last.defaults_recorded, 0);

    for event in orchestrator.event_log().events_of_type("PaymentMade") {
        if let Event::PaymentMade { late, .. } = event {
            assert!(!late, "a fully reliable payer paid late");
        }
    }

    // The paid invoice settled in full on its due date
    let state = orchestrator.state();
    let paid: Vec<_> = (1..=state.num_invoices() as u64)
        .filter_map(|id| state.invoice(id))
        .filter(|invoice| invoice.is_paid())
        .collect();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].paid_date(), Some(paid[0].due_date()));
    assert_eq!(paid[0].outstanding_balance(), 0.0);
}

// ============================================================================
// Scenario: zero delay tolerance makes the halving branch unreachable
// ============================================================================

#[test]
fn test_zero_max_delay_never_halves_probability() {
    // With max_payment_delay = 0 the halving branch needs
    // 0 < days_overdue <= 0, which is unsatisfiable. A 100% payer must
    // therefore pay overdue invoices with certainty; if halving applied,
    // fifty independent rolls at 50% would all have to hit
    // (probability ~9e-16).
    let config = OrchestratorConfig {
        num_days: 1,
        rng_seed: 13,
        start_date: start_date(),
        business_configs: vec![
            business_config("SELLER", AttributeProfile::new(365, 100.0, 0)),
            business_config("BUYER", AttributeProfile::new(365, 100.0, 0)),
        ],
        wire_random_network: false,
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    let mut setup_rng = RngManager::new(555);

    {
        let state = orchestrator.state_mut();
        let seller = state.business_mut("SELLER").unwrap();
        seller.add_customer("BUYER");
        seller.profile_mut().set_customer_average("BUYER", 1_000.0);
    }

    // Build the overdue stock by hand: invoices due on the setup date, so
    // they are already one day overdue when day 1 is processed.
    for _ in 0..50 {
        issue_invoice(
            orchestrator.state_mut(),
            "SELLER",
            "BUYER",
            start_date(),
            start_date(),
            &mut setup_rng,
        )
        .unwrap();
    }

    let results = orchestrator.run().unwrap();

    // Day 1: all fifty are overdue by one day; the probability stays at
    // the base 100% and every invoice is paid late, none defaulted.
    assert_eq!(results[0].payments_made, 50);
    assert_eq!(results[0].defaults_recorded, 0);

    let payments = orchestrator.event_log().events_of_type("PaymentMade");
    assert_eq!(payments.len(), 50);
    for event in payments {
        if let Event::PaymentMade { late, .. } = event {
            assert!(*late, "overdue payments must be classified late");
        }
    }
}

#[test]
fn test_zero_max_delay_defaults_start_the_day_after_due() {
    // A payer that never pays (on_time = 0) with no delay tolerance:
    // the invoice is default-classified from the first overdue day, every
    // day, and stays open forever (reporting-only, no state change).
    let config = OrchestratorConfig {
        num_days: 6,
        rng_seed: 29,
        start_date: start_date(),
        business_configs: vec![
            business_config("SELLER", AttributeProfile::new(365, 100.0, 0)),
            business_config("DEADBEAT", AttributeProfile::new(365, 0.0, 0)),
        ],
        wire_random_network: false,
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    let mut setup_rng = RngManager::new(555);

    {
        let state = orchestrator.state_mut();
        let seller = state.business_mut("SELLER").unwrap();
        seller.add_customer("DEADBEAT");
        seller.profile_mut().set_customer_average("DEADBEAT", 2_000.0);
    }

    let due = start_date() + Days::new(1);
    let invoice_id = issue_invoice(
        orchestrator.state_mut(),
        "SELLER",
        "DEADBEAT",
        due,
        start_date(),
        &mut setup_rng,
    )
    .unwrap();

    let results = orchestrator.run().unwrap();

    // Day 1 (due date, days_overdue = 0): no payment, but also no default
    assert_eq!(results[0].payments_made, 0);
    assert_eq!(results[0].defaults_recorded, 0);

    // Days 2..=6: days_overdue > max_payment_delay immediately, one
    // default classification per day — the invoice is perpetually
    // re-evaluated.
    for result in &results[1..] {
        assert_eq!(result.payments_made, 0);
        assert_eq!(result.defaults_recorded, 1);
    }

    let defaults = orchestrator.event_log().events_of_type("PaymentDefaulted");
    assert_eq!(defaults.len(), 5);
    for (i, event) in defaults.iter().enumerate() {
        if let Event::PaymentDefaulted {
            day,
            invoice_id: id,
            days_overdue,
            ..
        } = event
        {
            assert_eq!(*day, i + 2);
            assert_eq!(*id, invoice_id);
            assert_eq!(*days_overdue as usize, i + 1);
        }
    }

    // Still open, never transitioned to any terminal defaulted state
    let invoice = orchestrator.state().invoice(invoice_id).unwrap();
    assert!(invoice.is_open());
    assert_eq!(invoice.paid_date(), None);
}

// ============================================================================
// Payment distribution plumbing through the engine
// ============================================================================

#[test]
fn test_engine_payments_use_even_split_over_single_invoice() {
    let mut orchestrator = Orchestrator::new(preset_config(60, 31415)).unwrap();
    orchestrator.run().unwrap();

    let state = orchestrator.state();
    assert!(state.num_payments() > 0, "seed produced no payments");

    for id in 1..=state.num_payments() as u64 {
        let payment = state.payment(id).unwrap();
        // Engine payments settle one invoice in full with the even-split
        // default, which resolves to a single 100% share.
        assert_eq!(payment.invoice_ids().len(), 1);
        assert_eq!(payment.distribution_percentages(), [100.0]);

        let invoice = state.invoice(payment.invoice_ids()[0]).unwrap();
        assert!(invoice.payment_ids().contains(&payment.id()));
    }
}
