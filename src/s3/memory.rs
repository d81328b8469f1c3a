//! In-memory object store for tests and local runs

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{ObjectStore, StorageError, StorageErrorKind, StorageOperation};

/// An object held by [`MemoryObjectStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// Store that keeps objects in a `(bucket, key)` map
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<(String, String), StoredObject>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    /// Simulate errors if set
    fail_reads: Arc<RwLock<Option<StorageErrorKind>>>,
    fail_writes: Arc<RwLock<Option<StorageErrorKind>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without counting it as a write
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.objects.write().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: None,
            },
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.object(bucket, key).is_some()
    }

    /// Number of objects in `bucket`
    pub fn object_count(&self, bucket: &str) -> usize {
        self.objects
            .read()
            .keys()
            .filter(|(b, _)| b == bucket)
            .count()
    }

    /// Number of `get_object` calls, including failed ones
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put_object` calls, including failed ones
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every read fail with `kind` (`None` restores normal behaviour)
    pub fn set_read_failure(&self, kind: Option<StorageErrorKind>) {
        *self.fail_reads.write() = kind;
    }

    /// Make every write fail with `kind` (`None` restores normal behaviour)
    pub fn set_write_failure(&self, kind: Option<StorageErrorKind>) {
        *self.fail_writes.write() = kind;
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = *self.fail_reads.read() {
            return Err(StorageError::new(
                StorageOperation::Get,
                kind,
                bucket,
                key,
                "Simulated read failure",
            ));
        }

        self.object(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| {
                StorageError::new(
                    StorageOperation::Get,
                    StorageErrorKind::NotFound,
                    bucket,
                    key,
                    "NoSuchKey",
                )
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = *self.fail_writes.read() {
            return Err(StorageError::new(
                StorageOperation::Put,
                kind,
                bucket,
                key,
                "Simulated write failure",
            ));
        }

        self.objects.write().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: Some(content_type.to_string()),
            },
        );
        Ok(())
    }
}
