//! Shared configuration, errors, and mail transport for Rentsplit.
//!
//! This crate provides everything the billing core and the CLI have in common:
//! - Household configuration model with full load-time validation
//! - Runtime SMTP settings sourced from the environment
//! - Application-wide error types with exit-code mapping
//! - Mail message envelope and SMTP transport

pub mod config;
pub mod email;
pub mod error;
pub mod types;

pub use config::{HouseholdConfig, SmtpConfig};
pub use email::Mailer;
pub use error::{AppError, AppResult};
pub use types::MailMessage;
