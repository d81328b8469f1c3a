//! Object-created notification as delivered by the storage service.
//!
//! Only the fields the filter needs are modelled; everything else in the
//! payload is ignored during deserialization.

use serde::Deserialize;

use crate::error::FilterError;

#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

/// The bucket and decoded key of the object that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub source_bucket_name: String,
    pub object_key: String,
}

impl ChangeNotification {
    /// Build from the first record of an event. Further records are not read.
    pub fn from_event(event: &S3Event) -> Result<Self, FilterError> {
        let record = event
            .records
            .first()
            .ok_or_else(|| FilterError::InvalidEvent("event contains no records".to_string()))?;

        if record.s3.bucket.name.is_empty() {
            return Err(FilterError::InvalidEvent(
                "record has an empty bucket name".to_string(),
            ));
        }

        let object_key = decode_object_key(&record.s3.object.key)?;
        if object_key.is_empty() {
            return Err(FilterError::InvalidEvent(
                "record has an empty object key".to_string(),
            ));
        }

        Ok(Self {
            source_bucket_name: record.s3.bucket.name.clone(),
            object_key,
        })
    }

    /// Parse a raw JSON payload and build from its first record.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FilterError> {
        let event: S3Event = serde_json::from_value(value)
            .map_err(|e| FilterError::InvalidEvent(format!("malformed event: {}", e)))?;
        Self::from_event(&event)
    }
}

/// Decode a notification object key.
///
/// Keys arrive form-encoded: spaces as `+` and other reserved bytes as
/// `%XX` escapes.
pub fn decode_object_key(raw: &str) -> Result<String, FilterError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| FilterError::InvalidEvent(format!("object key is not valid UTF-8: {}", e)))
}
