//! Multipart request for the AI interior endpoint

use reqwest::multipart::{Form, Part};

use crate::capture::Snapshot;
use crate::config::AxisConvention;
use crate::domain::{NormalizedRegion, Region};
use crate::normalize::normalize;

use super::error::SubmitError;

/// File name the service expects for the uploaded still
pub const UPLOAD_FILE_NAME: &str = "room-image.png";

/// Everything sent for one generation
#[derive(Clone, Debug, PartialEq)]
pub struct EditRequest {
    /// PNG bytes of the snapshot
    pub image: Vec<u8>,
    pub image_width: u32,
    pub image_height: u32,
    pub circles: Vec<NormalizedRegion>,
}

impl EditRequest {
    /// Build a request from the current snapshot and regions.
    ///
    /// Regions are checked before the snapshot so that an empty selection is
    /// always reported as such.
    pub fn assemble(
        snapshot: Option<&Snapshot>,
        regions: &[Region],
        axis: AxisConvention,
    ) -> Result<Self, SubmitError> {
        if regions.is_empty() {
            return Err(SubmitError::NoRegions);
        }
        let snapshot = snapshot
            .filter(|s| !s.frame.is_empty() && !s.png.is_empty())
            .ok_or(SubmitError::MissingSnapshot)?;

        let circles = normalize(
            regions,
            snapshot.frame.width,
            snapshot.frame.height,
            axis,
        );

        Ok(Self {
            image: snapshot.png.clone(),
            image_width: snapshot.frame.width,
            image_height: snapshot.frame.height,
            circles,
        })
    }

    /// `circles` form field: a JSON array of `{x, y, radius}`
    pub fn circles_json(&self) -> String {
        serde_json::to_string(&self.circles).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn to_form(&self) -> reqwest::Result<Form> {
        let image = Part::bytes(self.image.clone())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/png")?;

        Ok(Form::new()
            .part("image", image)
            .text("imageWidth", self.image_width.to_string())
            .text("imageHeight", self.image_height.to_string())
            .text("circles", self.circles_json()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrameSize;

    fn snapshot() -> Snapshot {
        Snapshot {
            png: vec![0x89, b'P', b'N', b'G'],
            frame: FrameSize::new(400, 300),
            revision: 1,
        }
    }

    #[test]
    fn test_no_regions_checked_first() {
        assert!(matches!(
            EditRequest::assemble(None, &[], AxisConvention::TopLeft),
            Err(SubmitError::NoRegions)
        ));
        assert!(matches!(
            EditRequest::assemble(Some(&snapshot()), &[], AxisConvention::TopLeft),
            Err(SubmitError::NoRegions)
        ));
    }

    #[test]
    fn test_missing_snapshot() {
        let regions = [Region::new(10.0, 10.0, 5.0)];
        assert!(matches!(
            EditRequest::assemble(None, &regions, AxisConvention::TopLeft),
            Err(SubmitError::MissingSnapshot)
        ));

        let mut empty = snapshot();
        empty.frame = FrameSize::new(0, 300);
        assert!(matches!(
            EditRequest::assemble(Some(&empty), &regions, AxisConvention::TopLeft),
            Err(SubmitError::MissingSnapshot)
        ));
    }

    #[test]
    fn test_assemble_normalizes_against_snapshot_frame() {
        let req = EditRequest::assemble(
            Some(&snapshot()),
            &[Region::new(200.0, 260.0, 60.0)],
            AxisConvention::TopLeft,
        )
        .unwrap();

        assert_eq!((req.image_width, req.image_height), (400, 300));
        assert_eq!(req.image, snapshot().png);
        assert_eq!(req.circles.len(), 1);
        assert!((req.circles[0].x - 0.5).abs() < 1e-4);
        assert!((req.circles[0].y - 0.8667).abs() < 1e-3);
        assert!((req.circles[0].radius - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_circles_json_shape() {
        let req = EditRequest {
            image: Vec::new(),
            image_width: 2,
            image_height: 2,
            circles: vec![NormalizedRegion {
                x: 0.5,
                y: 0.25,
                radius: 0.125,
            }],
        };
        let parsed: serde_json::Value = serde_json::from_str(&req.circles_json()).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{ "x": 0.5, "y": 0.25, "radius": 0.125 }])
        );
    }

    #[test]
    fn test_form_builds() {
        let req = EditRequest::assemble(
            Some(&snapshot()),
            &[Region::new(1.0, 1.0, 1.0)],
            AxisConvention::BottomLeft,
        )
        .unwrap();
        let form = req.to_form().unwrap();
        assert!(!form.boundary().is_empty());
    }
}
