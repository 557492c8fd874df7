//! Coordinate normalizer
//!
//! Converts intrinsic-pixel regions into `[0, 1]` coordinates for the AI
//! service and back. The width and height must be the frame the regions were
//! measured against; the snapshot carries that frame alongside its pixels.
//!
//! Wire contract: `x / width`, `y / height` (or `1 - y / height` with the
//! bottom-left axis), `radius / min(width, height)`.

use crate::config::AxisConvention;
use crate::domain::{FrameSize, NormalizedRegion, Region};

/// Normalize regions against a frame; empty when either side is zero
pub fn normalize(
    regions: &[Region],
    width: u32,
    height: u32,
    axis: AxisConvention,
) -> Vec<NormalizedRegion> {
    if width == 0 || height == 0 {
        log::warn!("Refusing to normalize against a {}x{} frame", width, height);
        return Vec::new();
    }

    let (w, h) = (width as f32, height as f32);
    let min_side = FrameSize::new(width, height).min_side() as f32;

    regions
        .iter()
        .map(|r| {
            let y = r.y / h;
            NormalizedRegion {
                x: r.x / w,
                y: match axis {
                    AxisConvention::TopLeft => y,
                    AxisConvention::BottomLeft => 1.0 - y,
                },
                radius: r.radius / min_side,
            }
        })
        .collect()
}

/// Scale normalized regions back up to intrinsic pixels
pub fn denormalize(
    normalized: &[NormalizedRegion],
    width: u32,
    height: u32,
    axis: AxisConvention,
) -> Vec<Region> {
    let (w, h) = (width as f32, height as f32);
    let min_side = w.min(h);

    normalized
        .iter()
        .map(|n| {
            let y = match axis {
                AxisConvention::TopLeft => n.y,
                AxisConvention::BottomLeft => 1.0 - n.y,
            };
            Region::new(n.x * w, y * h, n.radius * min_side)
        })
        .collect()
}
