//! Region types for circled areas of interest
//!
//! `Region` lives in intrinsic pixel space of the source image.
//! `NormalizedRegion` is the resolution-independent form sent over the wire.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// A circle in intrinsic image pixels, measured from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A region divided by (width, height, min(width, height)) of its frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRegion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// How a drag from `start` to `end` becomes a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircleConvention {
    /// The drag spans the diameter: center at the midpoint
    #[default]
    Diameter,
    /// The drag is the radius: center at the start point
    Radius,
}

impl CircleConvention {
    /// Circle for a drag; preview and commit both go through here
    pub fn circle(self, start: Point, end: Point) -> Region {
        match self {
            CircleConvention::Diameter => {
                let c = start.midpoint(end);
                Region::new(c.x, c.y, start.distance(end) * 0.5)
            }
            CircleConvention::Radius => Region::new(start.x, start.y, start.distance(end)),
        }
    }
}
