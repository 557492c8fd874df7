//! Image rendering for regions using tiny-skia
//!
//! These functions draw regions onto an RgbaImage at intrinsic resolution,
//! for the live overlay and for the snapshot sent to the AI service.

use std::io;

use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use super::geometry::{self, stroke};
use crate::config::{HomesCanvasConfig, ShapeColor};
use crate::domain::Region;

/// How regions are stroked
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub color: ShapeColor,
    /// Stroke thickness in intrinsic pixels
    pub thickness: f32,
    /// Whether to draw a dark border under the stroke
    pub shadow: bool,
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self::from(&HomesCanvasConfig::default())
    }
}

impl From<&HomesCanvasConfig> for RegionStyle {
    fn from(config: &HomesCanvasConfig) -> Self {
        Self {
            color: config.region_color,
            thickness: config.stroke_thickness,
            shadow: config.region_shadow,
        }
    }
}

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

/// Build a circle path using cubic bezier curves
fn build_circle_path(region: &Region) -> Option<tiny_skia::Path> {
    if region.radius <= 0.0 {
        return None;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(region.x, region.y - region.radius);
    for (c1x, c1y, c2x, c2y, x, y) in geometry::circle_segments(region.x, region.y, region.radius) {
        pb.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }
    pb.close();
    pb.finish()
}

fn stroke_circle(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: &RegionStyle, dash: Option<StrokeDash>) {
    let width = geometry::stroke_width(style.thickness);
    let line_cap = if dash.is_some() {
        LineCap::Butt
    } else {
        LineCap::Round
    };

    // Draw border first
    if style.shadow {
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, stroke::BORDER_ALPHA);
        paint.anti_alias = true;

        let border = Stroke {
            width: width + stroke::BORDER_EXTRA * 2.0,
            line_cap,
            line_join: LineJoin::Round,
            dash: dash.clone(),
            ..Default::default()
        };
        pixmap.stroke_path(path, &paint, &border, Transform::identity(), None);
    }

    let [r, g, b, a] = style.color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let main = Stroke {
        width,
        line_cap,
        line_join: LineJoin::Round,
        dash,
        ..Default::default()
    };
    pixmap.stroke_path(path, &paint, &main, Transform::identity(), None);
}

/// Draw committed regions as solid circle outlines
pub fn draw_regions_on_image(img: &mut RgbaImage, regions: &[Region], style: &RegionStyle) {
    if regions.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for region in regions {
            let Some(path) = build_circle_path(region) else {
                continue;
            };
            stroke_circle(pixmap, &path, style, None);
        }
    });
}

/// Draw the in-progress circle as a dashed outline
pub fn draw_preview_on_image(img: &mut RgbaImage, preview: &Region, style: &RegionStyle) {
    let Some(path) = build_circle_path(preview) else {
        return;
    };
    let width = geometry::stroke_width(style.thickness);
    let dash = StrokeDash::new(
        vec![stroke::PREVIEW_DASH[0] * width, stroke::PREVIEW_DASH[1] * width],
        0.0,
    );

    with_pixmap(img, |pixmap| stroke_circle(pixmap, &path, style, dash));
}

/// Compose the overlay: photo, committed regions, then the preview on top
pub fn overlay_image(
    source: &RgbaImage,
    regions: &[Region],
    preview: Option<&Region>,
    style: &RegionStyle,
) -> RgbaImage {
    let mut img = source.clone();
    draw_regions_on_image(&mut img, regions, style);
    if let Some(preview) = preview {
        draw_preview_on_image(&mut img, preview, style);
    }
    img
}

/// Encode an RGBA image as PNG
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn red_style(thickness: f32) -> RegionStyle {
        RegionStyle {
            color: ShapeColor {
                r: 1.0,
                g: 0.0,
                b: 0.0,
            },
            thickness,
            shadow: false,
        }
    }

    fn is_reddish(p: &Rgba<u8>) -> bool {
        p[0] > 200 && p[1] < 80 && p[2] < 80
    }

    #[test]
    fn test_region_outline_is_drawn() {
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        draw_regions_on_image(&mut img, &[Region::new(50.0, 50.0, 30.0)], &red_style(4.0));

        assert!(is_reddish(img.get_pixel(80, 50)));
        assert!(is_reddish(img.get_pixel(50, 20)));
        // Inside and outside stay untouched
        assert_eq!(*img.get_pixel(50, 50), WHITE);
        assert_eq!(*img.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        draw_regions_on_image(&mut img, &[Region::new(10.0, 10.0, 0.0)], &red_style(4.0));
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_preview_is_dashed() {
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        draw_preview_on_image(&mut img, &Region::new(50.0, 50.0, 40.0), &red_style(2.0));

        let (mut drawn, mut gaps) = (0, 0);
        for deg in 0..360 {
            let a = (deg as f32).to_radians();
            let x = (50.0 + 40.0 * a.cos()).floor() as u32;
            let y = (50.0 + 40.0 * a.sin()).floor() as u32;
            if *img.get_pixel(x, y) == WHITE {
                gaps += 1;
            } else {
                drawn += 1;
            }
        }
        assert!(drawn > 0);
        assert!(gaps > 0);
    }

    #[test]
    fn test_overlay_leaves_source_untouched() {
        let source = RgbaImage::from_pixel(60, 60, WHITE);
        let out = overlay_image(
            &source,
            &[Region::new(30.0, 30.0, 20.0)],
            Some(&Region::new(30.0, 30.0, 10.0)),
            &RegionStyle::default(),
        );
        assert!(source.pixels().all(|p| *p == WHITE));
        assert!(out.pixels().any(|p| *p != WHITE));
        assert_eq!(out.dimensions(), source.dimensions());
    }

    #[test]
    fn test_encode_png_keeps_dimensions() {
        let img = RgbaImage::from_pixel(7, 5, WHITE);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (7, 5));
    }
}
