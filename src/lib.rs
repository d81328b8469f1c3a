//! Grayscale-and-watermark filter for newly uploaded images.
//!
//! [`handler::WatermarkHandler`] reacts to object-created notifications,
//! [`imaging`] and [`watermark`] do the pixel work, and [`s3`] abstracts the
//! bucket access so the pipeline runs the same against S3 or in memory.

pub mod config;
pub mod error;
pub mod handler;
pub mod imaging;
pub mod logging;
pub mod s3;
pub mod watermark;
