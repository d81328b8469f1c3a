//! Object storage access and the change-notification model.
//!
//! The filter talks to storage through [`ObjectStore`]: one read of the
//! source object and one write of the filtered result. Neither operation is
//! retried; failures are classified and handed back to the caller.

pub mod client;
pub mod event;
pub mod memory;

pub use client::{classify_error_code, S3ObjectStore};
pub use event::{decode_object_key, ChangeNotification, S3Event};
pub use memory::MemoryObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use thiserror::Error;

/// Storage operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Get,
    Put,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOperation::Get => write!(f, "get"),
            StorageOperation::Put => write!(f, "put"),
        }
    }
}

/// Why a storage operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    NotFound,
    AccessDenied,
    QuotaExceeded,
    /// Transport failures, timeouts and anything unclassified
    Io,
}

impl StorageErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorKind::NotFound => "not_found",
            StorageErrorKind::AccessDenied => "access_denied",
            StorageErrorKind::QuotaExceeded => "quota_exceeded",
            StorageErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone)]
#[error("storage {operation} s3://{bucket}/{key} failed ({kind}): {message}")]
pub struct StorageError {
    pub operation: StorageOperation,
    pub kind: StorageErrorKind,
    pub bucket: String,
    pub key: String,
    pub message: String,
}

impl StorageError {
    pub fn new(
        operation: StorageOperation,
        kind: StorageErrorKind,
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Read/write access to buckets
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full body of `bucket/key`
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    /// Store `body` at `bucket/key`, replacing any existing object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
