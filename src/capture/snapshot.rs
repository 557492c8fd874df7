//! Flattened snapshot of the edited photo
//!
//! The snapshot is taken at the photo's intrinsic resolution so that the
//! regions recorded against intrinsic pixels still line up with it.

use crate::domain::{FrameSize, Region};
use crate::render::{RegionStyle, draw_regions_on_image, encode_png};

use super::image::SourceImage;

#[derive(Clone, Debug)]
pub struct Snapshot {
    /// PNG-encoded still frame
    pub png: Vec<u8>,
    pub frame: FrameSize,
    /// Selector revision the snapshot was taken at
    pub revision: u64,
}

impl Snapshot {
    /// Flatten the photo (and optionally the region outlines) into a PNG
    pub fn capture(
        source: &SourceImage,
        regions: &[Region],
        style: &RegionStyle,
        composite: bool,
        revision: u64,
    ) -> anyhow::Result<Self> {
        let mut img = source.rgba.clone();
        if composite {
            draw_regions_on_image(&mut img, regions, style);
        }
        let png = encode_png(&img)?;
        log::debug!(
            "Snapshot captured: {}x{}, {} region(s), {} bytes",
            img.width(),
            img.height(),
            regions.len(),
            png.len()
        );
        Ok(Self {
            png,
            frame: source.frame(),
            revision,
        })
    }

    /// Whether nothing changed since the snapshot was taken
    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn source() -> SourceImage {
        SourceImage::from(RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn test_snapshot_is_intrinsic_size() {
        let snap = Snapshot::capture(
            &source(),
            &[Region::new(200.0, 150.0, 60.0)],
            &RegionStyle::default(),
            true,
            3,
        )
        .unwrap();

        assert_eq!(snap.frame, FrameSize::new(400, 300));
        let decoded = image::load_from_memory(&snap.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 300));
    }

    #[test]
    fn test_composite_flag_controls_overlay() {
        let regions = [Region::new(200.0, 150.0, 60.0)];
        let style = RegionStyle::default();

        let with = Snapshot::capture(&source(), &regions, &style, true, 1).unwrap();
        let without = Snapshot::capture(&source(), &regions, &style, false, 1).unwrap();

        let with = image::load_from_memory(&with.png).unwrap().to_rgba8();
        let without = image::load_from_memory(&without.png).unwrap().to_rgba8();
        assert_ne!(*with.get_pixel(260, 150), Rgba([255, 255, 255, 255]));
        assert_eq!(*without.get_pixel(260, 150), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_revision_tracking() {
        let snap = Snapshot::capture(&source(), &[], &RegionStyle::default(), true, 7).unwrap();
        assert!(snap.is_current(7));
        assert!(!snap.is_current(8));
    }
}
