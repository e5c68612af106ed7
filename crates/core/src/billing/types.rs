//! Billing data types.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// Rounds a monetary amount half-up to two decimal places.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One line of a person's statement: a cost, the number of payers sharing
/// it, and this person's share of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentComponent {
    /// Line label, e.g. `Rent` or a utility category name.
    pub label: String,
    /// Full amount of the cost.
    pub total: Decimal,
    /// Number of payers the cost is divided among, at least 1.
    pub divided_among: u32,
    /// This person's share: the full amount when undivided, otherwise
    /// `total / divided_among` in exact decimal arithmetic.
    pub share: Decimal,
}

impl RentComponent {
    /// Creates a component and computes its share.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayerCount` when `divided_among` is zero.
    pub fn new(
        label: impl Into<String>,
        total: Decimal,
        divided_among: u32,
    ) -> Result<Self, BillingError> {
        let share = match divided_among {
            0 => return Err(BillingError::InvalidPayerCount),
            1 => total,
            n => total / Decimal::from(n),
        };
        Ok(Self {
            label: label.into(),
            total,
            divided_among,
            share,
        })
    }
}

impl std::fmt::Display for RentComponent {
    /// `{label}: {share}` when undivided; `{label}: {share} = {total} /
    /// {divided_among}` when divided, preserving the divisor for the
    /// recipient's benefit. Amounts render with two decimal places.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.divided_among == 1 {
            write!(f, "{}: {:.2}", self.label, round_cents(self.share))
        } else {
            write!(
                f,
                "{}: {:.2} = {:.2} / {}",
                self.label,
                round_cents(self.share),
                round_cents(self.total),
                self.divided_among
            )
        }
    }
}

/// Itemized statement for one person: rent line, one line per utility
/// category, and a cross-checked total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStatement {
    /// Person the statement is for.
    pub person: String,
    /// Due date of the charge: the first of the following month.
    pub due_date: NaiveDate,
    /// Ordered components: rent first, then utilities by category name.
    pub components: Vec<RentComponent>,
    /// Authoritative total: the rounded sum of component shares.
    pub total: Decimal,
}

impl BillingStatement {
    /// Full English name of the due month, used in the subject line.
    #[must_use]
    pub fn due_month_name(&self) -> String {
        self.due_date.format("%B").to_string()
    }
}
