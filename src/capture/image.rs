//! Source image type for uploaded room photos

use std::path::Path;

use anyhow::{Context, bail};
use image::RgbaImage;

use crate::domain::FrameSize;

/// Largest photo accepted for upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A decoded room photo at its intrinsic resolution
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: RgbaImage,
}

impl SourceImage {
    /// Decode an uploaded file
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            bail!(
                "Photo is {} bytes, uploads are limited to {} bytes",
                bytes.len(),
                MAX_UPLOAD_BYTES
            );
        }
        let rgba = image::load_from_memory(bytes)
            .context("Failed to decode photo")?
            .to_rgba8();
        log::debug!("SourceImage decoded: {}x{} pixels", rgba.width(), rgba.height());
        Ok(Self { rgba })
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Intrinsic size of the photo
    pub fn frame(&self) -> FrameSize {
        FrameSize::new(self.rgba.width(), self.rgba.height())
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(rgba: RgbaImage) -> Self {
        Self { rgba }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::encode_png;

    #[test]
    fn test_decodes_png_at_intrinsic_size() {
        let png = encode_png(&RgbaImage::new(40, 30)).unwrap();
        let source = SourceImage::from_bytes(&png).unwrap();
        assert_eq!(source.frame(), FrameSize::new(40, 30));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(SourceImage::from_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = SourceImage::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("limited"));
    }
}
