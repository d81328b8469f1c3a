//! Object-created event handler.
//!
//! One invocation handles one notification: fetch the new object from the
//! source bucket, turn it grayscale, stamp the watermark and upload the
//! result to the destination bucket as `filtered-<key>`.
//!
//! Events for any other bucket are acknowledged and ignored without touching
//! storage. Every failure after that point is logged with its context and
//! returned to the runtime; nothing is written unless every earlier step
//! succeeded.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::Config;
use crate::error::FilterError;
use crate::imaging::{self, EncodedImage, OutputFormat, SourceFormat};
use crate::s3::{ChangeNotification, ObjectStore, S3Event, StorageError};
use crate::watermark::{apply_watermark, load_font, LoadedFont, WatermarkPlacement, WatermarkSpec};

/// Prefix added to the source key to form the output key
pub const OUTPUT_KEY_PREFIX: &str = "filtered-";

pub const SUCCESS_MESSAGE: &str = "Image processed successfully!";
pub const IGNORED_MARKER: &str = "Ignored.";

/// Destination key for a source object key.
pub fn output_key(object_key: &str) -> String {
    format!("{}{}", OUTPUT_KEY_PREFIX, object_key)
}

/// What an invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Processed { output_key: String },
    /// The event came from a bucket other than the configured source
    Ignored,
}

impl Outcome {
    pub fn response(&self) -> HandlerResponse {
        let body = match self {
            Outcome::Processed { output_key } => serde_json::json!({
                "message": SUCCESS_MESSAGE,
                "output_key": output_key,
            }),
            Outcome::Ignored => serde_json::Value::from(IGNORED_MARKER),
        };

        HandlerResponse {
            status_code: 200,
            body: body.to_string(),
        }
    }
}

/// Result returned to the runtime. `body` holds JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl From<Outcome> for HandlerResponse {
    fn from(outcome: Outcome) -> Self {
        outcome.response()
    }
}

/// A filtered image ready to upload.
#[derive(Debug)]
pub struct ProcessedImage {
    pub source_format: SourceFormat,
    pub encoded: EncodedImage,
    pub placement: WatermarkPlacement,
    pub width: u32,
    pub height: u32,
}

/// Grayscale, watermark and re-encode one image.
///
/// Pure apart from logging. `key` is only used to detect the format when
/// the content alone does not identify it.
pub fn process_image(
    data: &[u8],
    key: &str,
    font: &LoadedFont,
) -> Result<ProcessedImage, FilterError> {
    let source_format = imaging::detect_format(data, key)?;
    let decoded = imaging::decode(data, source_format)?;

    let mut canvas = imaging::to_grayscale(&decoded);
    drop(decoded);

    let placement = apply_watermark(&mut canvas, font, &WatermarkSpec::FIXED)?;

    let output_format = OutputFormat::preserving(source_format);
    let encoded = imaging::encode(&canvas, output_format)?;

    Ok(ProcessedImage {
        source_format,
        encoded,
        placement,
        width: canvas.width(),
        height: canvas.height(),
    })
}

/// Handles change notifications against an [`ObjectStore`].
pub struct WatermarkHandler<S> {
    config: Config,
    store: S,
    font: LoadedFont,
}

impl<S: ObjectStore> WatermarkHandler<S> {
    /// Build a handler, loading the configured font once.
    ///
    /// A missing or unusable font file falls back to the embedded font.
    pub fn new(config: Config, store: S) -> Result<Self, FilterError> {
        let font = load_font(config.font_path.as_deref())?;
        Ok(Self::with_font(config, store, font))
    }

    pub fn with_font(config: Config, store: S, font: LoadedFont) -> Self {
        Self {
            config,
            store,
            font,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Handle a raw invocation payload.
    pub async fn handle_value(
        &self,
        payload: serde_json::Value,
    ) -> Result<HandlerResponse, FilterError> {
        let notification = ChangeNotification::from_value(payload).map_err(log_invalid_event)?;
        self.process(notification).await.map(HandlerResponse::from)
    }

    /// Handle a parsed event.
    pub async fn handle(&self, event: &S3Event) -> Result<HandlerResponse, FilterError> {
        let notification = ChangeNotification::from_event(event).map_err(log_invalid_event)?;
        self.process(notification).await.map(HandlerResponse::from)
    }

    /// Run the pipeline for one notification.
    pub async fn process(&self, notification: ChangeNotification) -> Result<Outcome, FilterError> {
        let ChangeNotification {
            source_bucket_name: bucket,
            object_key: key,
        } = notification;

        info!(bucket = %bucket, key = %key, "Processing image");

        if bucket != self.config.source_bucket_name {
            info!(
                bucket = %bucket,
                source_bucket = %self.config.source_bucket_name,
                "Ignoring event from non-source bucket"
            );
            return Ok(Outcome::Ignored);
        }

        let data = self
            .store
            .get_object(&bucket, &key)
            .await
            .map_err(log_storage_error)?;

        let processed = process_image(&data, &key, &self.font).map_err(|e| {
            error!(
                operation = "process",
                bucket = %bucket,
                key = %key,
                error_kind = e.kind(),
                error = %e,
                "Failed to process image"
            );
            e
        })?;
        drop(data);

        let destination = &self.config.destination_bucket_name;
        let destination_key = output_key(&key);
        let size = processed.encoded.data.len();

        self.store
            .put_object(
                destination,
                &destination_key,
                Bytes::from(processed.encoded.data),
                processed.encoded.content_type,
            )
            .await
            .map_err(log_storage_error)?;

        info!(
            source_key = %key,
            destination_bucket = %destination,
            destination_key = %destination_key,
            format = processed.encoded.format.as_str(),
            width = processed.width,
            height = processed.height,
            bytes = size,
            "Successfully filtered image"
        );

        Ok(Outcome::Processed {
            output_key: destination_key,
        })
    }
}

fn log_invalid_event(e: FilterError) -> FilterError {
    error!(error_kind = e.kind(), error = %e, "Rejected invocation payload");
    e
}

fn log_storage_error(e: StorageError) -> FilterError {
    error!(
        operation = %e.operation,
        bucket = %e.bucket,
        key = %e.key,
        error_kind = e.kind.as_str(),
        error = %e.message,
        "Storage operation failed"
    );
    FilterError::Storage(e)
}
