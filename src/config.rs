//! Configuration types.
//!
//! [`ForwarderConfig`] is resolved from the environment on every invocation.
//! [`RelayConfig`] is resolved once at startup, when the relay client is built.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Prefix under which inbound raw messages are stored.
pub const KEY_PREFIX: &str = "emails/";

/// Default SMTP submission port.
const DEFAULT_SMTP_PORT: u16 = 587;

/// Per-invocation forwarder configuration.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Bucket holding the raw inbound messages.
    pub bucket_name: String,
    /// Configured destination address.
    ///
    /// Required, but the parsed `To` header is what the message is forwarded
    /// to. This value never reaches the relay.
    pub destination_email: String,
}

impl ForwarderConfig {
    /// Build config from `BUCKET_NAME` and `DESTINATION_EMAIL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket_name: required(&lookup, "BUCKET_NAME")?,
            destination_email: required(&lookup, "DESTINATION_EMAIL")?,
        })
    }
}

/// Which relay carries the forwarded message.
#[derive(Debug, Clone)]
pub enum RelayConfig {
    /// Amazon SES `SendRawEmail`.
    Ses,
    /// Authenticated SMTP submission.
    Smtp(SmtpConfig),
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl RelayConfig {
    /// Build relay config from `FORWARD_RELAY` (`ses` when unset) and,
    /// for `smtp`, the `SMTP_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let relay = lookup("FORWARD_RELAY").unwrap_or_else(|| "ses".to_string());

        match relay.trim().to_ascii_lowercase().as_str() {
            "ses" => Ok(Self::Ses),
            "smtp" => {
                let port = match lookup("SMTP_PORT") {
                    Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                        key: "SMTP_PORT".into(),
                        message: format!("{e}"),
                    })?,
                    None => DEFAULT_SMTP_PORT,
                };
                Ok(Self::Smtp(SmtpConfig {
                    host: required(&lookup, "SMTP_HOST")?,
                    port,
                    username: required(&lookup, "SMTP_USERNAME")?,
                    password: SecretString::from(required(&lookup, "SMTP_PASSWORD")?),
                }))
            }
            other => Err(ConfigError::InvalidValue {
                key: "FORWARD_RELAY".into(),
                message: format!("unknown relay {other:?}, expected \"ses\" or \"smtp\""),
            }),
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}
