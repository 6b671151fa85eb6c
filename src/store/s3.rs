//! S3-backed [`ObjectStore`].

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::error::StoreError;
use crate::store::ObjectStore;

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from shared AWS configuration.
    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_s3::Client::new(sdk_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    StoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StoreError::Request {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        reason: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let body = output.body.collect().await.map_err(|e| StoreError::Body {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        Ok(body.into_bytes().to_vec())
    }
}
