//! Headless drawing pad rendered with tiny-skia
//!
//! The surface is always fully opaque: it starts black and only ever receives
//! opaque strokes or images composited over black. That keeps tiny-skia's
//! premultiplied buffer byte-identical to a straight RGBA image.

use crate::models::config::CanvasConfig;
use crate::models::point::Point;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Square RGBA drawing surface with white-on-black round strokes
#[derive(Clone)]
pub struct DrawingSurface {
    pixmap: Pixmap,
    line_width: f32,
    last_point: Option<Point>,
}

impl DrawingSurface {
    /// Create a black pad of `config.size` x `config.size` pixels
    pub fn new(config: &CanvasConfig) -> Result<Self, String> {
        let mut pixmap = Pixmap::new(config.size, config.size)
            .ok_or_else(|| format!("Invalid canvas size: {}", config.size))?;
        pixmap.fill(Color::BLACK);

        Ok(Self {
            pixmap,
            line_width: config.line_width,
            last_point: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Start a new stroke at `point` without painting anything
    pub fn begin_stroke(&mut self, point: Point) {
        self.last_point = Some(point);
    }

    /// Paint the segment from the previous stroke point to `point`
    ///
    /// Without a preceding `begin_stroke` this only moves the pen.
    pub fn extend_stroke(&mut self, point: Point) {
        if let Some(from) = self.last_point {
            self.stroke_segment(from, point);
        }
        self.last_point = Some(point);
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Fill the whole pad black
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::BLACK);
        self.last_point = None;
    }

    /// Replace the pad content with `image`, scaled to fit and centered
    pub fn place_image(&mut self, image: &DynamicImage) {
        self.clear();

        let (pad_w, pad_h) = (self.width(), self.height());
        let (img_w, img_h) = (image.width(), image.height());
        if img_w == 0 || img_h == 0 {
            return;
        }

        let scale = (pad_w as f64 / img_w as f64).min(pad_h as f64 / img_h as f64);
        let w = ((img_w as f64 * scale).round() as u32).clamp(1, pad_w);
        let h = ((img_h as f64 * scale).round() as u32).clamp(1, pad_h);
        let x = (pad_w - w) / 2;
        let y = (pad_h - h) / 2;

        let scaled = imageops::resize(&image.to_rgba8(), w, h, FilterType::Triangle);

        let mut composed = self.to_image();
        imageops::overlay(&mut composed, &scaled, x as i64, y as i64);
        self.pixmap.data_mut().copy_from_slice(composed.as_raw());
    }

    /// Current pad content as a straight RGBA image
    pub fn to_image(&self) -> RgbaImage {
        let (w, h) = (self.width(), self.height());
        // Pixmap data length always equals w * h * 4
        RgbaImage::from_raw(w, h, self.pixmap.data().to_vec()).unwrap_or_else(|| RgbaImage::new(w, h))
    }

    pub fn to_dynamic_image(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.to_image())
    }

    /// Write the pad to `path` as PNG
    pub fn save_png(&self, path: &Path) -> Result<(), String> {
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| format!("Failed to save canvas to {:?}: {}", path, e))
    }

    fn stroke_segment(&mut self, from: Point, to: Point) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = true;

        // A zero-length segment still leaves a round dot
        if from.distance(&to) < f32::EPSILON {
            if let Some(dot) = PathBuilder::from_circle(to.x, to.y, self.line_width / 2.0) {
                self.pixmap.fill_path(
                    &dot,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: self.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
