//! Pointer input for the region selector
//!
//! Mouse and touch events are reduced to a single optional position in
//! display (viewport) coordinates.

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// One pointer sample as delivered by the host UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum PointerInput {
    Mouse { x: f32, y: f32 },
    /// Active touch points; the first one drives the gesture
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        PointerInput::Mouse { x, y }
    }

    pub fn touch(touches: impl IntoIterator<Item = Point>) -> Self {
        PointerInput::Touch {
            touches: touches.into_iter().collect(),
        }
    }

    /// Display position, or None when the event carries no pointer data
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { x, y } => Some(Point::new(*x, *y)),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_without_points_has_no_position() {
        assert_eq!(PointerInput::touch([]).position(), None);
    }

    #[test]
    fn test_first_touch_wins() {
        let input = PointerInput::touch([Point::new(1.0, 2.0), Point::new(9.0, 9.0)]);
        assert_eq!(input.position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_deserialize_tagged() {
        let input: PointerInput =
            serde_json::from_str(r#"{"device":"mouse","x":3.0,"y":4.0}"#).unwrap();
        assert_eq!(input, PointerInput::mouse(3.0, 4.0));
    }
}
