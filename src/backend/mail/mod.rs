//! Mail Module
//!
//! Outbound email delivery. Handlers depend on the [`Mailer`] trait only;
//! the server picks an implementation at startup:
//!
//! - **`SmtpMailer`** - real delivery through lettre, used when SMTP settings
//!   are configured
//! - **`LogMailer`** - writes the message to the log instead of sending it,
//!   used for local development
//!
//! # Module Structure
//!
//! ```text
//! mail/
//! ├── mod.rs  - Mailer trait, message type, log mailer, templates
//! └── smtp.rs - lettre SMTP transport
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// SMTP transport
pub mod smtp;

pub use smtp::SmtpMailer;

/// A message ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Recipient address
    pub to: String,
    pub subject: String,
    /// HTML body
    pub html: String,
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    /// Sender or recipient address could not be parsed
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Message could not be assembled
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// SMTP transport failure
    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound email sender
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Mailer that only logs what it would have sent
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.html,
            "SMTP not configured, email not delivered"
        );
        Ok(())
    }
}

/// Build the verification email for `to` pointing at `{base_url}/auth/verify/{code}`
pub fn verification_email(to: &str, base_url: &str, code: &str) -> OutgoingEmail {
    let link = format!("{}/auth/verify/{}", base_url.trim_end_matches('/'), code);
    OutgoingEmail {
        to: to.to_string(),
        subject: "Verify your email".to_string(),
        html: format!(r#"<a target="_blank" href="{link}">Click to verify your email</a>"#),
    }
}
