//! Billing calendar math.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returns the first calendar day of the month after `date`.
///
/// December rolls over to January of the next year. The due date of a
/// billing run is always the first of the month following "today".
#[must_use]
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 of a valid month always exists")
}

/// A calendar billing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl BillingMonth {
    /// The billing month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for BillingMonth {
    /// Renders as zero-padded `YYYY-MM`, the form used in diagnostics.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
