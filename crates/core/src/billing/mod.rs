//! Rent and utility billing.
//!
//! Resolves the applicable rent schedule, splits shared utility costs among
//! payers, and produces per-person itemized statements with a cross-checked
//! total.

pub mod error;
pub mod schedule;
pub mod service;
pub mod types;


pub use error::BillingError;
pub use service::StatementBuilder;
pub use types::{round_cents, BillingStatement, RentComponent};
