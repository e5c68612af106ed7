//! Common types used across the application.

pub mod message;

pub use message::MailMessage;
