//! Image capture module
//!
//! This module consolidates:
//! - Uploaded photo type (image.rs)
//! - Flattened snapshot for the AI service (snapshot.rs)

pub mod image;
pub mod snapshot;

pub use self::image::SourceImage;
pub use snapshot::Snapshot;
