// Error handling integration tests
//
// Every failure is returned to the caller as an error, never as a response,
// and nothing is written to the destination bucket once a step has failed.

use super::test_harness::*;
use image::ImageFormat;
use serde_json::json;
use serverless_filter_bot::error::FilterError;
use serverless_filter_bot::s3::{StorageErrorKind, StorageOperation};

fn expect_storage_error(err: FilterError) -> serverless_filter_bot::s3::StorageError {
    match err {
        FilterError::Storage(e) => e,
        other => panic!("Expected storage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_source_object_is_not_found() {
    let (handler, store) = setup();

    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "vanished.png"))
        .await
        .unwrap_err();

    let storage = expect_storage_error(err);
    assert_eq!(storage.operation, StorageOperation::Get);
    assert_eq!(storage.kind, StorageErrorKind::NotFound);
    assert_eq!(storage.bucket, SOURCE_BUCKET);
    assert_eq!(storage.key, "vanished.png");
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_read_access_denied_propagates() {
    let (handler, store) = setup();
    store.insert(
        SOURCE_BUCKET,
        "secret.png",
        encode_as(&gradient(64, 64), ImageFormat::Png),
    );
    store.set_read_failure(Some(StorageErrorKind::AccessDenied));

    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "secret.png"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "StorageError");
    assert_eq!(expect_storage_error(err).kind, StorageErrorKind::AccessDenied);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_write_failure_propagates() {
    let (handler, store) = setup();
    store.insert(
        SOURCE_BUCKET,
        "cat.png",
        encode_as(&gradient(64, 64), ImageFormat::Png),
    );

    // Scenario 1: quota exceeded on upload
    store.set_write_failure(Some(StorageErrorKind::QuotaExceeded));
    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "cat.png"))
        .await
        .unwrap_err();
    let storage = expect_storage_error(err);
    assert_eq!(storage.operation, StorageOperation::Put);
    assert_eq!(storage.kind, StorageErrorKind::QuotaExceeded);
    assert_eq!(storage.bucket, DESTINATION_BUCKET);
    assert_eq!(storage.key, "filtered-cat.png");

    // Scenario 2: destination denies writes
    store.set_write_failure(Some(StorageErrorKind::AccessDenied));
    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "cat.png"))
        .await
        .unwrap_err();
    assert_eq!(expect_storage_error(err).kind, StorageErrorKind::AccessDenied);

    assert!(!store.contains(DESTINATION_BUCKET, "filtered-cat.png"));
}

#[tokio::test]
async fn test_undecodable_object_writes_nothing() {
    let (handler, store) = setup();

    // Scenario 1: no recognizable format at all
    store.insert(SOURCE_BUCKET, "notes.txt", b"just some text".to_vec());
    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "notes.txt"))
        .await
        .unwrap_err();
    assert!(matches!(err, FilterError::Image(_)));

    // Scenario 2: PNG signature with a truncated body
    let mut truncated = encode_as(&gradient(64, 64), ImageFormat::Png);
    truncated.truncate(40);
    store.insert(SOURCE_BUCKET, "broken.png", truncated);
    let err = handler
        .handle_value(s3_event(SOURCE_BUCKET, "broken.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "DecodeError");

    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_malformed_events_are_rejected() {
    let (handler, store) = setup();

    let payloads = [
        json!({}),
        json!({ "Records": [] }),
        json!({ "Records": [{ "s3": { "bucket": { "name": SOURCE_BUCKET } } }] }),
        json!({ "Records": [{ "s3": { "bucket": { "name": "" }, "object": { "key": "a.png" } } }] }),
        json!([1, 2, 3]),
    ];

    for payload in payloads {
        let err = handler.handle_value(payload).await.unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidEvent(_)),
            "expected invalid event, got {:?}",
            err
        );
    }

    assert_eq!(store.read_count(), 0);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_errors_map_to_runtime_diagnostics() {
    let err = FilterError::InvalidEvent("event contains no records".to_string());
    let diagnostic: lambda_runtime::Diagnostic = err.into();
    assert_eq!(diagnostic.error_type, "InvalidEvent");
    assert!(diagnostic.error_message.contains("no records"));
}
