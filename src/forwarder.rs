//! The forwarding sequence: fetch, parse, re-send.
//!
//! One straight-line pass per invocation:
//! 1. `emails/{messageId}` is read from the configured bucket
//! 2. The bytes are decoded as UTF-8 and parsed for `From`/`To`/`Subject`
//! 3. The original bytes go to the relay with the parsed source and destination
//!
//! Any failure ends the invocation. Nothing is retried or deduplicated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::ForwarderConfig;
use crate::error::{MessageError, Result};
use crate::event::SesEvent;
use crate::mailer::{Mailer, OutboundEmail};
use crate::message::ParsedEmail;
use crate::store::{ObjectStore, object_key};

/// Result handed back to the invoking runtime on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub status_code: u16,
    pub body: String,
}

impl ForwardResponse {
    pub fn forwarded(source: &str, destination: &str) -> Self {
        Self {
            status_code: 200,
            body: format!("Email from {source} forwarded to {destination}"),
        }
    }
}

/// Holds the client handles built at startup.
pub struct Forwarder {
    store: Arc<dyn ObjectStore>,
    mailer: Arc<dyn Mailer>,
}

impl Forwarder {
    pub fn new(store: Arc<dyn ObjectStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Forward the message named by `event`.
    ///
    /// `config.destination_email` is not consulted: the message goes to its
    /// own `To` header.
    pub async fn handle(
        &self,
        config: &ForwarderConfig,
        event: &SesEvent,
    ) -> Result<ForwardResponse> {
        let message_id = event.message_id().inspect_err(|e| {
            error!(error = %e, "Event carries no message id");
        })?;
        let key = object_key(message_id);

        let notified = event.first_mail();
        info!(
            message_id = %message_id,
            bucket = %config.bucket_name,
            key = %key,
            notified_source = notified.and_then(|m| m.source.as_deref()).unwrap_or("-"),
            notified_destination = %notified.map(|m| m.destination.join(", ")).unwrap_or_default(),
            timestamp = notified.and_then(|m| m.timestamp.as_deref()).unwrap_or("-"),
            "Forwarding stored email"
        );

        let raw_bytes = self
            .store
            .get_object(&config.bucket_name, &key)
            .await
            .inspect_err(|e| {
                error!(message_id = %message_id, error = %e, "Failed to fetch stored email");
            })?;
        debug!(message_id = %message_id, size = raw_bytes.len(), "Fetched stored email");

        let raw_email = String::from_utf8(raw_bytes)
            .map_err(MessageError::from)
            .inspect_err(|e| {
                error!(message_id = %message_id, error = %e, "Failed to decode stored email");
            })?;

        let parsed = ParsedEmail::parse(&raw_email).inspect_err(|e| {
            error!(message_id = %message_id, error = %e, "Failed to parse stored email");
        })?;
        debug!(
            message_id = %message_id,
            source = %parsed.source,
            destination = %parsed.destination,
            subject = %parsed.subject,
            payload_len = parsed.payload.as_ref().map_or(0, String::len),
            "Parsed stored email"
        );

        let outbound = OutboundEmail {
            source: parsed.source.clone(),
            destinations: vec![parsed.destination.clone()],
            raw: raw_email.into_bytes(),
        };

        let sent = self.mailer.send_raw(&outbound).await.inspect_err(|e| {
            error!(
                message_id = %message_id,
                relay = self.mailer.name(),
                error = %e,
                "Failed to forward email"
            );
        })?;

        info!(
            message_id = %message_id,
            relay = self.mailer.name(),
            relay_message_id = sent.relay_message_id.as_deref().unwrap_or("-"),
            source = %parsed.source,
            destination = %parsed.destination,
            size = outbound.raw.len(),
            "Forwarded email"
        );

        Ok(ForwardResponse::forwarded(&parsed.source, &parsed.destination))
    }
}
