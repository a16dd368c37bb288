//! Preset attribute catalog
//!
//! A static mapping from two-character codes to profile parameter bundles.
//! The first character is a payment-reliability tier (A best through F
//! worst), the second an invoice-frequency tier (1 lowest through 5
//! highest). The full A1–F5 grid is the cross product of the two tiers.
//!
//! Lookups return a fresh, owned `AttributeProfile` so no two businesses
//! ever share customer-average state.

use crate::models::profile::AttributeProfile;

/// All valid preset codes, reliability-major (A1, A2, ... F5)
pub fn preset_codes() -> Vec<String> {
    let mut codes = Vec::with_capacity(30);
    for tier in ['A', 'B', 'C', 'D', 'E', 'F'] {
        for freq in ['1', '2', '3', '4', '5'] {
            codes.push(format!("{}{}", tier, freq));
        }
    }
    codes
}

/// Look up a preset profile by its two-character code.
///
/// Case-insensitive; surrounding whitespace is ignored. Returns `None` for
/// anything outside the A1–F5 grid.
///
/// # Example
/// ```
/// use invoice_simulator_core_rs::profiles::preset;
///
/// let profile = preset("a3").unwrap();
/// assert_eq!(profile.invoices_per_year(), 365);
/// assert_eq!(profile.on_time_payment_percentage(), 100.0);
/// assert_eq!(profile.max_payment_delay(), 0);
///
/// assert!(preset("G1").is_none());
/// assert!(preset("A6").is_none());
/// ```
pub fn preset(code: &str) -> Option<AttributeProfile> {
    let code = code.trim().to_ascii_uppercase();
    let mut chars = code.chars();
    let (tier, freq) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }

    let (on_time_percentage, max_delay) = match tier {
        'A' => (100.0, 0),
        'B' => (90.0, 10),
        'C' => (80.0, 20),
        'D' => (70.0, 30),
        'E' => (60.0, 40),
        'F' => (50.0, 50),
        _ => return None,
    };

    let invoices_per_year = match freq {
        '1' => 91,
        '2' => 123,
        '3' => 365,
        '4' => 730,
        '5' => 1095,
        _ => return None,
    };

    Some(AttributeProfile::new(
        invoices_per_year,
        on_time_percentage,
        max_delay,
    ))
}
