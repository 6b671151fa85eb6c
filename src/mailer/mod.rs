//! Outbound mail relays.
//!
//! Supports:
//! - **SES**: `SendRawEmail` via aws-sdk-ses
//! - **SMTP**: authenticated submission via lettre
//!
//! Both send the stored bytes as-is. Nothing is re-serialized on the way out.

pub mod ses;
pub mod smtp;

pub use ses::SesMailer;
pub use smtp::SmtpMailer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RelayConfig;
use crate::error::DispatchError;

/// A raw message ready for the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub source: String,
    pub destinations: Vec<String>,
    /// Exact bytes read from the object store.
    pub raw: Vec<u8>,
}

/// What the relay reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentEmail {
    /// Relay-assigned id, when the relay hands one out.
    pub relay_message_id: Option<String>,
}

/// Send side of the forwarder.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Short relay name for logs and errors.
    fn name(&self) -> &str;

    /// Hand a raw message to the relay, once.
    async fn send_raw(&self, email: &OutboundEmail) -> Result<SentEmail, DispatchError>;
}

/// Create the configured relay.
pub fn create_mailer(
    relay: &RelayConfig,
    sdk_config: &aws_config::SdkConfig,
) -> Result<Arc<dyn Mailer>, DispatchError> {
    match relay {
        RelayConfig::Ses => {
            tracing::info!("Using SES relay");
            Ok(Arc::new(SesMailer::from_conf(sdk_config)))
        }
        RelayConfig::Smtp(smtp) => {
            tracing::info!("Using SMTP relay ({}:{})", smtp.host, smtp.port);
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_config::{BehaviorVersion, Region};
    use secrecy::SecretString;

    use super::*;
    use crate::config::SmtpConfig;

    fn sdk_config() -> aws_config::SdkConfig {
        aws_config::SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build()
    }

    #[test]
    fn create_ses_mailer() {
        let mailer = create_mailer(&RelayConfig::Ses, &sdk_config()).unwrap();
        assert_eq!(mailer.name(), "ses");
    }

    #[test]
    fn create_smtp_mailer_does_not_connect() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let relay = RelayConfig::Smtp(SmtpConfig {
            host: "smtp.example.com".into(),
            port: 2525,
            username: "relay".into(),
            password: SecretString::from("hunter2"),
        });
        let mailer = create_mailer(&relay, &sdk_config()).unwrap();
        assert_eq!(mailer.name(), "smtp");
    }
}
