// Shared fixtures for the handler integration tests

use image::codecs::gif::GifEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage, ImageEncoder, ImageFormat, Rgb, RgbImage};
use serde_json::json;
use serverless_filter_bot::config::Config;
use serverless_filter_bot::handler::WatermarkHandler;
use serverless_filter_bot::s3::MemoryObjectStore;
use std::io::Cursor;

pub const SOURCE_BUCKET: &str = "filter-bot-uploads";
pub const DESTINATION_BUCKET: &str = "filter-bot-output";

pub fn test_config() -> Config {
    Config {
        source_bucket_name: SOURCE_BUCKET.to_string(),
        destination_bucket_name: DESTINATION_BUCKET.to_string(),
        font_path: None,
    }
}

/// Handler over a fresh in-memory store; the store handle shares state.
pub fn setup() -> (WatermarkHandler<MemoryObjectStore>, MemoryObjectStore) {
    let store = MemoryObjectStore::new();
    let handler = WatermarkHandler::new(test_config(), store.clone())
        .expect("handler should build with the embedded font");
    (handler, store)
}

/// Object-created notification in the platform's wire shape.
pub fn s3_event(bucket: &str, key: &str) -> serde_json::Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-05-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{}", bucket) },
                "object": { "key": key, "size": 2048, "eTag": "0123456789abcdef" }
            }
        }]
    })
}

/// Colourful gradient so grayscale conversion is observable.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
        ])
    })
}

pub fn encode_as(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ImageFormat::Gif => {
            let rgba = DynamicImage::ImageRgb8(img.clone()).to_rgba8();
            let mut encoder = GifEncoder::new(&mut buffer);
            encoder
                .encode(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)
                .unwrap();
        }
        ImageFormat::WebP => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)
                .unwrap();
        }
        other => img.write_to(&mut buffer, other).unwrap(),
    }
    buffer.into_inner()
}
