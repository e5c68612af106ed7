//! Billing error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use rentsplit_shared::AppError;

use crate::calendar::BillingMonth;

/// Billing-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// No rent schedule entry applies to the target date.
    #[error("No rent schedule entry applies to {date}")]
    ScheduleNotFound {
        /// Date the lookup was performed for.
        date: NaiveDate,
    },

    /// No utility data exists for the billing month.
    #[error("No utility info for {month}")]
    NoUtilityInfo {
        /// The missing billing month.
        month: BillingMonth,
    },

    /// The person is not part of the resolved rent split.
    #[error("No rent split entry for {name}")]
    UnknownPerson {
        /// Name that was looked up.
        name: String,
    },

    /// A cost component was constructed with zero payers.
    #[error("A cost component must be divided among at least one payer")]
    InvalidPayerCount,

    /// The two independently computed statement totals disagree.
    ///
    /// This signals a builder defect, not a data problem, and is never
    /// reconciled silently.
    #[error("Statement total mismatch: {via_components} from components, {via_sums} from sums")]
    TotalMismatch {
        /// Total computed by summing component shares.
        via_components: Decimal,
        /// Total computed from rent plus the divided utility sum.
        via_sums: Decimal,
    },
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match &err {
            BillingError::ScheduleNotFound { .. }
            | BillingError::NoUtilityInfo { .. }
            | BillingError::UnknownPerson { .. } => Self::NotFound(err.to_string()),
            BillingError::InvalidPayerCount => Self::Validation(err.to_string()),
            BillingError::TotalMismatch { .. } => Self::Internal(err.to_string()),
        }
    }
}
