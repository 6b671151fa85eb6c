//! Object storage for inbound raw messages.

pub mod s3;
pub mod traits;

pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, object_key};
