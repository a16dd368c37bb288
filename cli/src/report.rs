//! Console reporting.
//!
//! Renders the wired network, the end-of-day balance sheets, and a final
//! run summary. Reporting only reads state; it never mutates it.

use invoice_simulator_core_rs::orchestrator::DayResult;
use invoice_simulator_core_rs::{EventLog, SimulationState};

/// Print the customer relationships and configured averages after wiring.
pub fn print_network(state: &SimulationState) {
    for id in state.business_ids() {
        let business = state.business(id).unwrap();
        let customers: Vec<&str> = business
            .customer_ids()
            .iter()
            .map(String::as_str)
            .collect();
        println!("{} sells to: {:?}", business.name(), customers);
        for customer in business.customer_ids() {
            match business.profile().customer_average(customer) {
                Some(average) => {
                    println!("    Average invoice for {}: {:.2}", customer, average)
                }
                None => println!("    Average invoice for {}: N/A", customer),
            }
        }
    }
}

/// Print every business's identity, attributes, and balance sheet for the
/// day that just finished.
pub fn print_day(result: &DayResult, state: &SimulationState) {
    println!(
        "\nEnd of Day {}: Business Details and Balance Sheets\n{}",
        result.day,
        "-".repeat(60)
    );

    for id in state.business_ids() {
        let business = state.business(id).unwrap();
        let profile = business.profile();
        println!(
            "{} [{}] invoices/year: {}, on-time: {}%, max delay: {} days",
            business.name(),
            business.id(),
            profile.invoices_per_year(),
            profile.on_time_payment_percentage(),
            profile.max_payment_delay()
        );

        let sheet = business.balance_sheet();
        println!(
            "    cash: {:.2}, receivable: {:.2}, payable: {:.2}, debt: {:.2}\n",
            sheet.cash(),
            sheet.accounts_receivable(),
            sheet.accounts_payable(),
            sheet.debt()
        );
    }

    println!(
        "Day totals: {} invoices issued, {} payments made, {} defaults",
        result.invoices_issued, result.payments_made, result.defaults_recorded
    );
}

/// Print run-level totals from the event log.
pub fn print_run_summary(event_log: &EventLog) {
    let issued = event_log.events_of_type("InvoiceIssued").len();
    let paid = event_log.events_of_type("PaymentMade").len();
    let defaults = event_log.events_of_type("PaymentDefaulted").len();

    println!("\n{}", "=".repeat(60));
    println!(
        "Run summary: {} invoices issued, {} payments made, {} default events",
        issued, paid, defaults
    );
}
