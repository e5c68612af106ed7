//! Statement building for a single billing run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use rentsplit_shared::HouseholdConfig;

use crate::calendar::{first_of_next_month, BillingMonth};

use super::error::BillingError;
use super::schedule;
use super::types::{round_cents, BillingStatement, RentComponent};

/// Builds itemized statements for one billing run.
///
/// Construction resolves everything shared across people: the due date, the
/// rent split in effect on the due date, the billing month's utility table,
/// and the payer count. The resolved values are plain fields computed once
/// and reused for every person queried in the run.
#[derive(Debug)]
pub struct StatementBuilder<'a> {
    due_date: NaiveDate,
    schedule_since: NaiveDate,
    rents: &'a BTreeMap<String, Decimal>,
    utilities: &'a BTreeMap<String, Decimal>,
    num_payers: u32,
}

impl<'a> StatementBuilder<'a> {
    /// Resolves the schedule and utility data for a run anchored at `today`.
    ///
    /// Rent is resolved against the due date (first of the following month).
    /// Utilities are looked up for `today`'s month: the bill on hand is for
    /// the month currently being lived through, not the month being paid for.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotFound` if no rent period applies to the due date,
    /// or `NoUtilityInfo` if the utility table has no entry for `today`'s
    /// month.
    pub fn new(config: &'a HouseholdConfig, today: NaiveDate) -> Result<Self, BillingError> {
        let due_date = first_of_next_month(today);
        let period = schedule::resolve_as_of(&config.rent, due_date)?;

        let month = BillingMonth::of(today);
        let utilities = config
            .utilities
            .get(&month.year)
            .and_then(|months| months.get(&month.month))
            .ok_or(BillingError::NoUtilityInfo { month })?;

        Ok(Self {
            due_date,
            schedule_since: period.since,
            rents: &period.splits,
            utilities,
            num_payers: config.num_payers(),
        })
    }

    /// Due date of this run.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Effective date of the rent period this run resolved to.
    #[must_use]
    pub const fn schedule_since(&self) -> NaiveDate {
        self.schedule_since
    }

    /// Number of payers sharing each utility cost.
    #[must_use]
    pub const fn num_payers(&self) -> u32 {
        self.num_payers
    }

    /// Rent owed by `name` as of the due date.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPerson` when `name` has no entry in the resolved split.
    pub fn rent_for(&self, name: &str) -> Result<Decimal, BillingError> {
        self.rents
            .get(name)
            .copied()
            .ok_or_else(|| BillingError::UnknownPerson {
                name: name.to_string(),
            })
    }

    /// Each utility category's per-payer share, keyed by category.
    #[must_use]
    pub fn utility_shares(&self) -> BTreeMap<String, Decimal> {
        let payers = Decimal::from(self.num_payers);
        self.utilities
            .iter()
            .map(|(category, amount)| (category.clone(), *amount / payers))
            .collect()
    }

    /// Ordered component list for `name`: the rent line first, then one line
    /// per utility category in ascending category-name order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPerson` when `name` has no entry in the resolved split.
    pub fn components_for(&self, name: &str) -> Result<Vec<RentComponent>, BillingError> {
        let mut components = Vec::with_capacity(self.utilities.len() + 1);
        components.push(RentComponent::new("Rent", self.rent_for(name)?, 1)?);
        for (category, amount) in self.utilities {
            components.push(RentComponent::new(
                category.clone(),
                *amount,
                self.num_payers,
            )?);
        }
        Ok(components)
    }

    /// Builds the cross-checked statement for `name`.
    ///
    /// The authoritative total is the rounded sum of component shares. A
    /// second, independent path recomputes it as rent plus the evenly divided
    /// utility sum. A disagreement after rounding is returned as
    /// `TotalMismatch` rather than reconciled.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPerson` for an unconfigured name, or `TotalMismatch`
    /// on an internal consistency failure.
    pub fn statement_for(&self, name: &str) -> Result<BillingStatement, BillingError> {
        let components = self.components_for(name)?;
        let via_components = round_cents(components.iter().map(|c| c.share).sum());

        let utility_sum: Decimal = self.utilities.values().copied().sum();
        let via_sums =
            round_cents(self.rent_for(name)? + utility_sum / Decimal::from(self.num_payers));

        if via_components != via_sums {
            return Err(BillingError::TotalMismatch {
                via_components,
                via_sums,
            });
        }

        Ok(BillingStatement {
            person: name.to_string(),
            due_date: self.due_date,
            components,
            total: via_components,
        })
    }
}
