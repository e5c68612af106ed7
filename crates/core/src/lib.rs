//! Core billing logic for Rentsplit.
//!
//! This crate contains pure business logic with ZERO transport or filesystem
//! dependencies. All domain types, calculations, and message composition live
//! here.
//!
//! # Modules
//!
//! - `calendar` - Due-date math and billing months
//! - `billing` - Rent schedule resolution, utility splitting, statements
//! - `message` - Statement-to-email composition

pub mod billing;
pub mod calendar;
pub mod message;
