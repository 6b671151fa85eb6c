//! SES relay.

use async_trait::async_trait;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::primitives::Blob;
use aws_sdk_ses::types::RawMessage;

use crate::error::DispatchError;
use crate::mailer::{Mailer, OutboundEmail, SentEmail};

pub struct SesMailer {
    client: aws_sdk_ses::Client,
}

impl SesMailer {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_ses::Client::new(sdk_config))
    }
}

#[async_trait]
impl Mailer for SesMailer {
    fn name(&self) -> &str {
        "ses"
    }

    async fn send_raw(&self, email: &OutboundEmail) -> Result<SentEmail, DispatchError> {
        let raw_message = RawMessage::builder()
            .data(Blob::new(email.raw.clone()))
            .build()
            .map_err(|e| DispatchError::Build(e.to_string()))?;

        let output = self
            .client
            .send_raw_email()
            .source(&email.source)
            .set_destinations(Some(email.destinations.clone()))
            .raw_message(raw_message)
            .send()
            .await
            .map_err(|err| DispatchError::Rejected {
                relay: "ses".into(),
                reason: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(SentEmail {
            relay_message_id: Some(output.message_id().to_string()),
        })
    }
}
