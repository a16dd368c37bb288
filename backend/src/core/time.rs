//! Time management for the simulation
//!
//! The simulation operates in discrete days anchored to a calendar start
//! date. This module provides deterministic time advancement and maps day
//! numbers onto calendar dates for due-date arithmetic.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete days
///
/// Day 0 is the setup day (no simulation activity); `advance_day` moves to
/// day 1, 2, ... The date of day `d` is `start_date + d` days.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use invoice_simulator_core_rs::TimeManager;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let mut time = TimeManager::new(start);
/// assert_eq!(time.current_day(), 0);
/// assert_eq!(time.current_date(), start);
///
/// time.advance_day();
/// assert_eq!(time.current_day(), 1);
/// assert_eq!(time.current_date(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Calendar date of day 0
    start_date: NaiveDate,
    /// Days elapsed since simulation start
    current_day: usize,
}

impl TimeManager {
    /// Create a new TimeManager anchored at the given start date
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            current_day: 0,
        }
    }

    /// Advance time by one day
    pub fn advance_day(&mut self) {
        self.current_day += 1;
    }

    /// Get the current day (0-indexed; 0 is the setup day)
    pub fn current_day(&self) -> usize {
        self.current_day
    }

    /// Get the calendar date of the current day
    pub fn current_date(&self) -> NaiveDate {
        self.date_of_day(self.current_day)
    }

    /// Get the calendar date of an arbitrary day number
    pub fn date_of_day(&self, day: usize) -> NaiveDate {
        self.start_date + Days::new(day as u64)
    }

    /// Get the simulation start date (day 0)
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_advance_crosses_month_boundary() {
        let mut time = TimeManager::new(start());
        time.advance_day();
        assert_eq!(
            time.current_date(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_date_of_day_is_stable() {
        let mut time = TimeManager::new(start());
        let day_five = time.date_of_day(5);
        for _ in 0..10 {
            time.advance_day();
        }
        // Advancing the clock must not change past date mappings
        assert_eq!(time.date_of_day(5), day_five);
        assert_eq!(time.current_day(), 10);
    }
}
