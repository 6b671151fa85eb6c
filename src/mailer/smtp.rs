//! SMTP relay via lettre.
//!
//! The SMTP envelope is built from the parsed addresses; the message data is
//! the stored raw bytes.

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::message::{Mailbox, Mailboxes};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use secrecy::ExposeSecret;

use crate::config::SmtpConfig;
use crate::error::DispatchError;
use crate::mailer::{Mailer, OutboundEmail, SentEmail};

pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, DispatchError> {
        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| DispatchError::Build(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send_raw(&self, email: &OutboundEmail) -> Result<SentEmail, DispatchError> {
        let envelope = smtp_envelope(&email.source, &email.destinations)?;
        let transport = self.transport.clone();
        let raw = email.raw.clone();

        tokio::task::spawn_blocking(move || transport.send_raw(&envelope, &raw))
            .await
            .map_err(|e| DispatchError::Rejected {
                relay: "smtp".into(),
                reason: format!("SMTP send task failed: {e}"),
            })?
            .map_err(|e| DispatchError::Rejected {
                relay: "smtp".into(),
                reason: format!("SMTP send failed: {e}"),
            })?;

        Ok(SentEmail::default())
    }
}

/// Build the SMTP envelope from header-style address strings.
///
/// An empty source becomes the null reverse-path. Each destination may hold
/// several comma-separated mailboxes.
pub fn smtp_envelope(source: &str, destinations: &[String]) -> Result<Envelope, DispatchError> {
    let from = if source.trim().is_empty() {
        None
    } else {
        let mailbox: Mailbox = source.parse().map_err(|e| DispatchError::InvalidAddress {
            address: source.to_string(),
            reason: format!("{e}"),
        })?;
        Some(mailbox.email)
    };

    let mut to = Vec::new();
    for destination in destinations {
        let mailboxes: Mailboxes =
            destination
                .parse()
                .map_err(|e| DispatchError::InvalidAddress {
                    address: destination.clone(),
                    reason: format!("{e}"),
                })?;
        to.extend(mailboxes.into_iter().map(|mailbox| mailbox.email));
    }

    Envelope::new(from, to).map_err(|e| DispatchError::Build(format!("SMTP envelope: {e}")))
}
