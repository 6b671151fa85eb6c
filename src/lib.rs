//! SES Forward: re-sends stored inbound email through an outbound relay.

pub mod config;
pub mod error;
pub mod event;
pub mod forwarder;
pub mod mailer;
pub mod message;
pub mod store;
