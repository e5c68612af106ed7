//! Rent schedule resolution.

use chrono::NaiveDate;

use rentsplit_shared::config::RentPeriod;

use super::error::BillingError;

/// Selects the rent period in effect on `date`.
///
/// `periods` must be sorted ascending by effective date (the config loader
/// enforces this). The walk goes newest to oldest and returns the first
/// period whose effective date is on or before `date`.
///
/// # Errors
///
/// Returns `ScheduleNotFound` when `date` precedes every period.
pub fn resolve_as_of(periods: &[RentPeriod], date: NaiveDate) -> Result<&RentPeriod, BillingError> {
    periods
        .iter()
        .rev()
        .find(|period| period.since <= date)
        .ok_or(BillingError::ScheduleNotFound { date })
}
