//! Mail transport for outgoing statements.
//!
//! Uses `lettre` for SMTP transport. The billing core composes a
//! [`MailMessage`]; this module only moves it.

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::types::MailMessage;

/// Mail transport errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// Failed to build the email message.
    #[error("Failed to build email: {0}")]
    Build(String),
    /// Failed to send the email.
    #[error("Failed to send email: {0}")]
    Send(String),
    /// A recipient or sender address did not parse.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// SMTP mailer for rent statements.
#[derive(Clone)]
pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    /// Creates a new mailer.
    #[must_use]
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Creates the SMTP transport.
    ///
    /// With credentials configured this negotiates TLS against the relay;
    /// without them it speaks plain SMTP, which is what a localhost relay
    /// expects.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            let creds = Credentials::new(username.clone(), password.clone());
            Ok(
                AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
                    .map_err(|e| MailError::Send(e.to_string()))?
                    .port(self.config.port)
                    .credentials(creds)
                    .build(),
            )
        } else {
            Ok(
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.config.host.as_str())
                    .port(self.config.port)
                    .build(),
            )
        }
    }

    /// Sends a composed statement.
    ///
    /// # Errors
    ///
    /// Returns an error if an address does not parse, the message cannot be
    /// built, or the transport fails.
    pub async fn send(&self, mail: &MailMessage) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(
                mail.from
                    .parse()
                    .map_err(|e| MailError::InvalidAddress(format!("{e}")))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|e| MailError::InvalidAddress(format!("{e}")))?);

        if let Some(cc) = &mail.cc {
            builder = builder.cc(cc
                .parse()
                .map_err(|e| MailError::InvalidAddress(format!("{e}")))?);
        }

        let message = builder
            .bcc(mail
                .bcc
                .parse()
                .map_err(|e| MailError::InvalidAddress(format!("{e}")))?)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        Ok(())
    }
}
