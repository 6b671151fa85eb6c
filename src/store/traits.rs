//! `ObjectStore` trait: the read side of the forwarder.

use async_trait::async_trait;

use crate::config::KEY_PREFIX;
use crate::error::StoreError;

/// Read-only access to raw stored messages.
///
/// Implementations are stateless handles to a remote store and are shared
/// across invocations without locking.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object at `(bucket, key)`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Key of the raw message stored for `message_id`.
pub fn object_key(message_id: &str) -> String {
    format!("{KEY_PREFIX}{message_id}")
}
