//! Error types for SES Forward.

use std::string::FromUtf8Error;

/// Top-level error type for a forwarding invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Trigger event errors.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Event contains no records")]
    NoRecords,
}

/// Object store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Failed to fetch s3://{bucket}/{key}: {reason}")]
    Request {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("Failed to read body of {key}: {reason}")]
    Body { key: String, reason: String },
}

/// Raw message decoding and parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Stored message is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),

    #[error("Stored message could not be parsed as an internet message")]
    Parse,
}

/// Mail relay errors.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Relay {relay} rejected the message: {reason}")]
    Rejected { relay: String, reason: String },

    #[error("Failed to build send request: {0}")]
    Build(String),
}

/// Result type alias for the forwarder.
pub type Result<T> = std::result::Result<T, Error>;
