//! Envelope extraction from a stored raw message.

use mail_parser::{HeaderName, MessageParser};

use crate::error::MessageError;

/// Fields extracted from a raw internet message.
///
/// Missing headers become empty strings rather than errors; the forwarder
/// passes whatever it found to the relay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEmail {
    /// `From` header value as written, quoting and encoded-words intact.
    pub source: String,
    /// `To` header value as written.
    pub destination: String,
    /// Decoded `Subject`.
    pub subject: String,
    /// Decoded text body, falling back to the HTML body.
    pub payload: Option<String>,
}

impl ParsedEmail {
    /// Parse a raw message.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let parsed = MessageParser::default()
            .parse(raw.as_bytes())
            .ok_or(MessageError::Parse)?;

        let source = raw_header(&parsed, HeaderName::From);
        let destination = raw_header(&parsed, HeaderName::To);
        let subject = parsed.subject().unwrap_or_default().to_string();
        let payload = parsed
            .body_text(0)
            .or_else(|| parsed.body_html(0))
            .map(|body| body.into_owned());

        Ok(Self {
            source,
            destination,
            subject,
            payload,
        })
    }
}

/// Header value exactly as it appears in the message, minus surrounding
/// whitespace. Empty if the header is absent.
fn raw_header<'x>(parsed: &mail_parser::Message<'x>, name: HeaderName<'x>) -> String {
    parsed
        .header_raw(name)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
