use crate::models::config::ResizeFilter;
use crate::models::pixel_grid::{PixelGrid, GRID_SIDE};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

/// Shrinks a drawing surface to the 28x28 grayscale grid the classifier expects
pub struct DownsampleService {
    filter: ResizeFilter,
}

impl Default for DownsampleService {
    fn default() -> Self {
        Self::new(ResizeFilter::default())
    }
}

impl DownsampleService {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    /// Full pipeline: resize to 28x28 → average channels
    pub fn downsample(&self, image: &DynamicImage) -> PixelGrid {
        let small = self.resize(image);

        PixelGrid::from_resized(small.pixels().map(Self::grayscale).collect())
    }

    /// Resize to exactly 28x28 RGBA, ignoring aspect ratio
    pub fn resize(&self, image: &DynamicImage) -> RgbaImage {
        image
            .resize_exact(GRID_SIDE, GRID_SIDE, self.filter_type())
            .to_rgba8()
    }

    /// (R + G + B) / 3, alpha ignored
    pub fn grayscale(pixel: &Rgba<u8>) -> f32 {
        let [r, g, b, _a] = pixel.0;
        (r as f32 + g as f32 + b as f32) / 3.0
    }

    fn filter_type(&self) -> FilterType {
        match self.filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
        }
    }
}
