//! Shared geometry for region overlays
//!
//! Constants and path math used when stroking regions onto the photo,
//! both for the live overlay and for the flattened snapshot.

/// Region stroke constants
pub mod stroke {
    /// Extra width of the dark border drawn under a region stroke
    pub const BORDER_EXTRA: f32 = 2.0;
    /// Alpha of the border stroke
    pub const BORDER_ALPHA: u8 = 200;
    /// Dash pattern (on, off) of the preview stroke, in stroke widths
    pub const PREVIEW_DASH: [f32; 2] = [3.0, 2.0];
    /// Thinnest stroke that is still drawn
    pub const MIN_THICKNESS: f32 = 1.0;
}

/// Circle bezier approximation constant: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f32 = 0.552_284_8;

/// Control points for the four cubic segments of a circle
///
/// Each entry is (c1x, c1y, c2x, c2y, x, y), starting from the top point.
pub fn circle_segments(cx: f32, cy: f32, r: f32) -> [(f32, f32, f32, f32, f32, f32); 4] {
    let k = r * BEZIER_K;
    [
        // Top to right
        (cx + k, cy - r, cx + r, cy - k, cx + r, cy),
        // Right to bottom
        (cx + r, cy + k, cx + k, cy + r, cx, cy + r),
        // Bottom to left
        (cx - k, cy + r, cx - r, cy + k, cx - r, cy),
        // Left to top
        (cx - r, cy - k, cx - k, cy - r, cx, cy - r),
    ]
}

/// Stroke width for a photo, never thinner than one pixel
#[inline]
pub fn stroke_width(thickness: f32) -> f32 {
    thickness.max(stroke::MIN_THICKNESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_close_the_circle() {
        let segs = circle_segments(10.0, 20.0, 5.0);
        let last = segs[3];
        assert_eq!((last.4, last.5), (10.0, 15.0));
        assert_eq!((segs[0].4, segs[0].5), (15.0, 20.0));
        assert_eq!((segs[1].4, segs[1].5), (10.0, 25.0));
        assert_eq!((segs[2].4, segs[2].5), (5.0, 20.0));
    }

    #[test]
    fn test_stroke_width_floor() {
        assert_eq!(stroke_width(0.2), 1.0);
        assert_eq!(stroke_width(4.0), 4.0);
    }
}
