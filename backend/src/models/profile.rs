//! Behavioral attribute profile
//!
//! An `AttributeProfile` bundles the parameters that govern how a business
//! invoices and pays: yearly invoice volume, per-customer average invoice
//! amounts (populated lazily as relationships are wired), on-time payment
//! probability, and the maximum tolerated payment delay.
//!
//! Every probabilistic operation takes `&mut RngManager` so all draws flow
//! through the single seeded generator.
//!
//! Profiles are owned per business: the preset catalog hands out fresh
//! instances, so writes to `customer_averages` are never visible to another
//! business.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::RngManager;

/// Std-dev of an invoice amount draw as a fraction of the customer average
const AMOUNT_SPREAD: f64 = 0.2;

/// Errors from profile draw operations
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("no average invoice amount defined for customer {customer}")]
    MissingAverage { customer: String },

    #[error("max_payment_delay is 0, no delay window to draw from")]
    NoDelayWindow,
}

/// Behavioral parameters assigned to a business at creation
///
/// # Example
/// ```
/// use invoice_simulator_core_rs::{AttributeProfile, RngManager};
///
/// let mut profile = AttributeProfile::new(365, 80.0, 20);
/// profile.set_customer_average("BIZ_02", 1500.0);
///
/// let mut rng = RngManager::new(42);
/// let amount = profile.generate_invoice_amount("BIZ_02", &mut rng).unwrap();
/// assert!(amount > 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeProfile {
    /// Average number of invoices this business sends per year
    invoices_per_year: u32,

    /// Average invoice amount per customer, keyed by business id.
    /// Set lazily as relationships are established; an absent (or zero)
    /// entry means "unset".
    customer_averages: HashMap<String, f64>,

    /// Probability in [0, 100] of paying an invoice on time
    on_time_payment_percentage: f64,

    /// Maximum number of days a payment can be delayed
    max_payment_delay: u32,
}

impl AttributeProfile {
    /// Create a profile with no customer averages configured
    ///
    /// # Panics
    /// Panics if `invoices_per_year` is zero or the percentage is outside
    /// [0, 100].
    pub fn new(invoices_per_year: u32, on_time_payment_percentage: f64, max_payment_delay: u32) -> Self {
        assert!(invoices_per_year > 0, "invoices_per_year must be positive");
        assert!(
            (0.0..=100.0).contains(&on_time_payment_percentage),
            "on_time_payment_percentage must be within [0, 100]"
        );

        Self {
            invoices_per_year,
            customer_averages: HashMap::new(),
            on_time_payment_percentage,
            max_payment_delay,
        }
    }

    /// Set or update the average invoice amount for a customer.
    ///
    /// No sign validation is performed; callers are expected to pass
    /// positive values.
    pub fn set_customer_average(&mut self, customer_id: &str, average_amount: f64) {
        self.customer_averages
            .insert(customer_id.to_string(), average_amount);
    }

    /// Get the configured average for a customer, if set
    pub fn customer_average(&self, customer_id: &str) -> Option<f64> {
        self.customer_averages.get(customer_id).copied()
    }

    /// Draw a random invoice amount for the given customer.
    ///
    /// Samples a normal distribution centered at the stored average with a
    /// standard deviation of 20% of the average. A missing or zero average
    /// is an error. Extreme draws may be non-positive; callers clamp or
    /// reject such draws.
    pub fn generate_invoice_amount(
        &self,
        customer_id: &str,
        rng: &mut RngManager,
    ) -> Result<f64, ProfileError> {
        let average = self.customer_average(customer_id).unwrap_or(0.0);
        if average == 0.0 {
            return Err(ProfileError::MissingAverage {
                customer: customer_id.to_string(),
            });
        }

        Ok(rng.normal(average, AMOUNT_SPREAD * average))
    }

    /// Decide whether a payment will be made on time.
    ///
    /// True with probability `on_time_payment_percentage / 100`.
    pub fn decides_to_pay_on_time(&self, rng: &mut RngManager) -> bool {
        rng.next_f64() * 100.0 <= self.on_time_payment_percentage
    }

    /// Draw a payment delay in days, uniform over [1, max_payment_delay].
    ///
    /// Fails when `max_payment_delay` is zero: there is no valid window and
    /// callers must guard that case.
    pub fn generate_payment_delay(&self, rng: &mut RngManager) -> Result<u32, ProfileError> {
        if self.max_payment_delay == 0 {
            return Err(ProfileError::NoDelayWindow);
        }

        Ok(rng.range(1, self.max_payment_delay as i64 + 1) as u32)
    }

    /// Yearly invoice volume
    pub fn invoices_per_year(&self) -> u32 {
        self.invoices_per_year
    }

    /// On-time payment probability in [0, 100]
    pub fn on_time_payment_percentage(&self) -> f64 {
        self.on_time_payment_percentage
    }

    /// Maximum payment delay in days
    pub fn max_payment_delay(&self) -> u32 {
        self.max_payment_delay
    }

    /// Number of customers with a configured average
    pub fn num_customer_averages(&self) -> usize {
        self.customer_averages.len()
    }
}
