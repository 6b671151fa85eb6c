//! SES receipt notification, as delivered to the handler.
//!
//! Only the fields the forwarder reads are modelled. Everything else in the
//! notification is ignored by serde.

use serde::Deserialize;

use crate::error::EventError;

#[derive(Debug, Clone, Deserialize)]
pub struct SesEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SesRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesRecord {
    pub ses: SesPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesPayload {
    pub mail: SesMail,
}

/// The `mail` object of a receipt notification.
///
/// `source`, `destination` and `timestamp` are informational; the forwarder
/// always takes addresses from the stored message itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SesMail {
    pub message_id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl SesEvent {
    /// The message id of the first record.
    pub fn message_id(&self) -> Result<&str, EventError> {
        self.first_mail()
            .map(|mail| mail.message_id.as_str())
            .ok_or(EventError::NoRecords)
    }

    /// The `mail` object of the first record, if any.
    pub fn first_mail(&self) -> Option<&SesMail> {
        self.records.first().map(|record| &record.ses.mail)
    }
}
