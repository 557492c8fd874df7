//! Region rendering module
//!
//! This module contains:
//! - Geometry shared between the live overlay and the snapshot
//! - Image rendering using tiny-skia and PNG encoding

pub mod geometry;
pub mod image;

pub use self::image::{
    RegionStyle, draw_preview_on_image, draw_regions_on_image, encode_png, overlay_image,
    write_png,
};
