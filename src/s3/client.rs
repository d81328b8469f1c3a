//! Object store backed by the AWS S3 SDK.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;

use super::{ObjectStore, StorageError, StorageErrorKind, StorageOperation};

/// [`ObjectStore`] over a shared SDK client.
///
/// The client is cheap to clone and is built once per execution
/// environment, so warm invocations reuse its connection pool.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &S3Client {
        &self.client
    }
}

/// Map an S3 error code onto a [`StorageErrorKind`].
pub fn classify_error_code(code: Option<&str>) -> StorageErrorKind {
    match code {
        Some("NoSuchKey") | Some("NoSuchBucket") | Some("NotFound") => StorageErrorKind::NotFound,
        Some("AccessDenied")
        | Some("Forbidden")
        | Some("AllAccessDisabled")
        | Some("InvalidAccessKeyId")
        | Some("SignatureDoesNotMatch")
        | Some("ExpiredToken") => StorageErrorKind::AccessDenied,
        Some("QuotaExceeded")
        | Some("ServiceQuotaExceeded")
        | Some("SlowDown")
        | Some("TooManyRequests")
        | Some("Throttling") => StorageErrorKind::QuotaExceeded,
        _ => StorageErrorKind::Io,
    }
}

fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> StorageErrorKind
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ServiceError(service) => classify_error_code(service.err().code()),
        // Timeouts, dispatch and response parsing failures
        _ => StorageErrorKind::Io,
    }
}

fn storage_error<E, R>(
    operation: StorageOperation,
    bucket: &str,
    key: &str,
    err: SdkError<E, R>,
) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let kind = classify_sdk_error(&err);
    StorageError::new(
        operation,
        kind,
        bucket,
        key,
        DisplayErrorContext(&err).to_string(),
    )
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error(StorageOperation::Get, bucket, key, e))?;

        let body = response.body.collect().await.map_err(|e| {
            StorageError::new(
                StorageOperation::Get,
                StorageErrorKind::Io,
                bucket,
                key,
                format!("Failed to read object body: {e}"),
            )
        })?;

        Ok(body.into_bytes())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| storage_error(StorageOperation::Put, bucket, key, e))
    }
}
