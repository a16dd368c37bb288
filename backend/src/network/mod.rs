//! Customer-relationship wiring
//!
//! Builds the directed "sells to" graph at simulation setup and seeds each
//! relationship with a calibrated average invoice amount. All randomness
//! (pair shuffling, base amounts) goes through the shared `RngManager`, so
//! wiring is part of the deterministic replay surface.
//!
//! Relationships are never mutual: when the pair (A sells to B) is
//! enumerated, the reverse candidate (B sells to A) is skipped.

use crate::models::state::SimulationState;
use crate::rng::RngManager;

/// Bounds for the calibrated average invoice amount
const MIN_AVERAGE: f64 = 1_000.0;
const MAX_AVERAGE: f64 = 100_000.0;

/// Wire random customer relationships across all businesses.
///
/// Candidate pairs are enumerated in the fixed business order (skipping the
/// reverse of any pair already listed), shuffled, and then linked subject to
/// an `n - 1` customer cap per business. Each new edge stores a calibrated
/// average invoice amount on the seller's profile.
pub fn wire_random_relationships(state: &mut SimulationState, rng: &mut RngManager) {
    let ids = state.business_ids().to_vec();

    let mut pairs: Vec<(String, String)> = Vec::new();
    for seller in &ids {
        for customer in &ids {
            if seller == customer {
                continue;
            }
            let reverse = (customer.clone(), seller.clone());
            if !pairs.contains(&reverse) {
                pairs.push((seller.clone(), customer.clone()));
            }
        }
    }

    rng.shuffle(&mut pairs);

    let max_customers = ids.len().saturating_sub(1);
    for (seller_id, customer_id) in pairs {
        let seller = state.business(&seller_id).unwrap();
        if seller.has_customer(&customer_id) || seller.customer_ids().len() >= max_customers {
            continue;
        }

        let seller_volume = seller.profile().invoices_per_year();
        let customer_volume = state
            .business(&customer_id)
            .unwrap()
            .profile()
            .invoices_per_year();

        let average = calibrated_average(seller_volume, customer_volume, rng);

        let seller = state.business_mut(&seller_id).unwrap();
        seller.add_customer(&customer_id);
        seller.profile_mut().set_customer_average(&customer_id, average);
    }
}

/// Calibrate an average invoice amount for a seller/customer pair.
///
/// A uniform base in [1000, 10000] is scaled by the seller's inverse
/// invoice frequency (fewer invoices per year → larger amounts per invoice)
/// and by the customer's relative frequency, then clamped to
/// [1000, 100000].
pub fn calibrated_average(seller_volume: u32, customer_volume: u32, rng: &mut RngManager) -> f64 {
    let base = rng.range(1_000, 10_001) as f64;
    let seller_adjustment = 365.0 / seller_volume as f64;
    let customer_adjustment = customer_volume as f64 / 365.0;

    (base * seller_adjustment * customer_adjustment).clamp(MIN_AVERAGE, MAX_AVERAGE)
}
