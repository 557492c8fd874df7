//! Geometric types for room photos and on-screen coordinates

use serde::{Deserialize, Serialize};

/// A point in either display or intrinsic pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }
}

/// Intrinsic (decoded) pixel dimensions of the source image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Length of the shorter side, the radius reference for normalization
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// On-screen bounding box of the displayed image, in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// How the image is laid out inside its on-screen box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Image fills the box, axes scaled independently
    #[default]
    Stretch,
    /// Image keeps its aspect ratio and is centered (letterboxed)
    Contain,
}

/// Transform from display coordinates to intrinsic image pixels
///
/// Built fresh for every pointer event since the on-screen box can change
/// between events (viewport resize, layout shifts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMapping {
    /// Display position of the image's top-left corner
    origin_x: f32,
    origin_y: f32,
    /// Intrinsic pixels per display pixel
    scale_x: f32,
    scale_y: f32,
    frame: FrameSize,
}

impl ViewportMapping {
    /// Compute the mapping, or None if nothing is displayed
    pub fn compute(frame: FrameSize, display: DisplayRect, fit: FitMode) -> Option<Self> {
        if frame.is_empty() || display.is_empty() {
            return None;
        }

        let img_w = frame.width as f32;
        let img_h = frame.height as f32;

        let mapping = match fit {
            FitMode::Stretch => Self {
                origin_x: display.left,
                origin_y: display.top,
                scale_x: img_w / display.width,
                scale_y: img_h / display.height,
                frame,
            },
            FitMode::Contain => {
                let display_scale = (display.width / img_w).min(display.height / img_h);
                let content_w = img_w * display_scale;
                let content_h = img_h * display_scale;
                let image_scale = 1.0 / display_scale;
                Self {
                    origin_x: display.left + (display.width - content_w) / 2.0,
                    origin_y: display.top + (display.height - content_h) / 2.0,
                    scale_x: image_scale,
                    scale_y: image_scale,
                    frame,
                }
            }
        };
        Some(mapping)
    }

    /// Map a display point into intrinsic pixels
    ///
    /// Points outside the image map outside the frame; a drag may leave the
    /// photo while the pointer is captured.
    pub fn to_intrinsic(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.origin_x) * self.scale_x,
            y: (p.y - self.origin_y) * self.scale_y,
        }
    }

    /// Clamp an intrinsic point onto the frame
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0.0, self.frame.width as f32),
            y: p.y.clamp(0.0, self.frame.height as f32),
        }
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_x, self.scale_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_stretch_mapping_doubles_half_size_display() {
        let frame = FrameSize::new(400, 300);
        let display = DisplayRect::new(0.0, 0.0, 200.0, 150.0);
        let mapping = ViewportMapping::compute(frame, display, FitMode::Stretch).unwrap();

        let p = mapping.to_intrinsic(Point::new(100.0, 100.0));
        assert!(approx(p.x, 200.0));
        assert!(approx(p.y, 200.0));
    }

    #[test]
    fn test_stretch_mapping_respects_offset_and_uneven_axes() {
        let frame = FrameSize::new(400, 300);
        // Stretched to a square box placed at (50, 20)
        let display = DisplayRect::new(50.0, 20.0, 100.0, 100.0);
        let mapping = ViewportMapping::compute(frame, display, FitMode::Stretch).unwrap();

        assert_eq!(mapping.scale(), (4.0, 3.0));
        let p = mapping.to_intrinsic(Point::new(75.0, 70.0));
        assert!(approx(p.x, 100.0));
        assert!(approx(p.y, 150.0));
    }

    #[test]
    fn test_contain_mapping_letterboxes() {
        // 400x200 image in a 200x200 box: displayed at 200x100, 50px bars top/bottom
        let frame = FrameSize::new(400, 200);
        let display = DisplayRect::new(0.0, 0.0, 200.0, 200.0);
        let mapping = ViewportMapping::compute(frame, display, FitMode::Contain).unwrap();

        let top_left = mapping.to_intrinsic(Point::new(0.0, 50.0));
        assert!(approx(top_left.x, 0.0));
        assert!(approx(top_left.y, 0.0));

        let center = mapping.to_intrinsic(Point::new(100.0, 100.0));
        assert!(approx(center.x, 200.0));
        assert!(approx(center.y, 100.0));
    }

    #[test]
    fn test_points_outside_image_map_outside_and_clamp_to_frame() {
        let frame = FrameSize::new(400, 200);
        let display = DisplayRect::new(0.0, 0.0, 200.0, 200.0);
        let mapping = ViewportMapping::compute(frame, display, FitMode::Contain).unwrap();

        // In the letterbox bar above the image
        let p = mapping.to_intrinsic(Point::new(0.0, 10.0));
        assert!(approx(p.y, -80.0));
        assert_eq!(mapping.clamp(p), Point::new(0.0, 0.0));

        let p = mapping.to_intrinsic(Point::new(250.0, 190.0));
        assert_eq!(mapping.clamp(p), Point::new(400.0, 200.0));
    }

    #[test]
    fn test_no_mapping_without_image_or_display() {
        let display = DisplayRect::new(0.0, 0.0, 200.0, 150.0);
        assert!(ViewportMapping::compute(FrameSize::new(0, 300), display, FitMode::Stretch).is_none());

        let frame = FrameSize::new(400, 300);
        let hidden = DisplayRect::new(0.0, 0.0, 0.0, 150.0);
        assert!(ViewportMapping::compute(frame, hidden, FitMode::Contain).is_none());
    }

    #[test]
    fn test_frame_min_side() {
        assert_eq!(FrameSize::new(400, 300).min_side(), 300);
        assert!(FrameSize::new(0, 10).is_empty());
    }
}
