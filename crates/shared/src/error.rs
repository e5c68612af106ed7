//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data violated a billing rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required schedule entry, utility month, or person is missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Mail transport failure.
    #[error("Mail transport error: {0}")]
    Mail(String),

    /// Internal consistency failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    ///
    /// Follows the `sysexits.h` conventions: 78 for configuration problems,
    /// 65 for bad input data, 75 for transport failures, 70 for internal
    /// software errors.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 78,
            Self::Validation(_) | Self::NotFound(_) => 65,
            Self::Mail(_) => 75,
            Self::Internal(_) => 70,
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<crate::email::MailError> for AppError {
    fn from(err: crate::email::MailError) -> Self {
        Self::Mail(err.to_string())
    }
}
