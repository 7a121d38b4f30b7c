//! Delivery of verification links.
//!
//! With the `MAIL_*` settings present links go out over SMTP; without them
//! they are only logged and the signup response carries the link instead.

use crate::config::MailSettings;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use std::time::Duration;

pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);
const SUBJECT: &str = "Verify your account";

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Invalid message: {0}")]
    Message(#[from] lettre::error::Error),
}

/// Delivers verification links.
pub trait Mailer: Send + Sync {
    /// Returns whether the message was handed to the transport.
    fn send_verification(&self, to: &str, verify_url: &str) -> bool;

    /// Short label for startup logs.
    fn describe(&self) -> String;
}

/// Writes the link to the log instead of sending mail; callers then surface
/// the link in the signup response.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_verification(&self, to: &str, verify_url: &str) -> bool {
        tracing::info!(%to, %verify_url, "No mail transport configured, verification link logged");
        false
    }

    fn describe(&self) -> String {
        "log only".to_string()
    }
}

pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
    endpoint: String,
}

impl SmtpMailer {
    /// Builds the transport without connecting; failures surface on send.
    pub fn new(settings: &MailSettings) -> Result<Self, MailerError> {
        let builder = if settings.use_tls {
            SmtpTransport::starttls_relay(&settings.server)?
        } else {
            SmtpTransport::builder_dangerous(&settings.server)
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from: settings.sender.parse()?,
            endpoint: format!("smtp://{}:{}", settings.server, settings.port),
        })
    }

    fn message(&self, to: &str, verify_url: &str) -> Result<Message, MailerError> {
        let body = format!(
            "Hello,\n\nFollow the link below to verify your email address.\n\n{verify_url}\n\n\
             The link is valid for 24 hours.\n"
        );

        Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(MailerError::from)
    }
}

impl Mailer for SmtpMailer {
    fn send_verification(&self, to: &str, verify_url: &str) -> bool {
        let message = match self.message(to, verify_url) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(%to, error = %e, "Verification email not built");
                return false;
            }
        };

        match self.transport.send(&message) {
            Ok(_) => {
                tracing::info!(%to, "Verification email sent");
                true
            }
            Err(e) => {
                tracing::error!(%to, error = %e, "Failed to send verification email");
                false
            }
        }
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// SMTP when configured, otherwise the log fallback.
pub fn build_mailer(settings: Option<&MailSettings>) -> Result<Arc<dyn Mailer>, MailerError> {
    match settings {
        Some(settings) => Ok(Arc::new(SmtpMailer::new(settings)?)),
        None => Ok(Arc::new(LogMailer)),
    }
}
