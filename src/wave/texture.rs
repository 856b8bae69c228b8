//! Tileable two-wave texture synthesis.

use image::{Pixel, Rgba, RgbaImage};
use std::f64::consts::PI;

use super::{DEFAULT_AMPLITUDE_RATIO, DEFAULT_WATER_LEVEL_RATIO, DEFAULT_WAVE_LENGTH_RATIO};
use crate::color::Color;

/// A rasterized background + front wave pair at default proportions.
///
/// Tiled horizontally and clamped vertically, then moved by the per-frame
/// transform, it stands in for re-rasterizing the wave every frame.
///
/// The bitmap is one column wider than the target, so it tiles with a period
/// of `width + 1` pixels while a full shift cycle moves it by `width` pixels.
/// The wave therefore jumps by one pixel each time the shift wraps from 1
/// back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTexture {
    image: RgbaImage,
    view_width: u32,
    view_height: u32,
    default_water_level: f32,
    default_amplitude: f32,
    background_curve: Vec<f32>,
    front_shift: usize,
    background_color: Color,
    front_color: Color,
}

impl WaveTexture {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Texture width in pixels, one more than the view width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Texture height in pixels, one more than the view height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Target size the texture was generated for.
    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    /// Water level in pixels used at generation time.
    pub fn default_water_level(&self) -> f32 {
        self.default_water_level
    }

    pub fn default_amplitude(&self) -> f32 {
        self.default_amplitude
    }

    /// Crest height of the background wave for every column.
    pub fn background_curve(&self) -> &[f32] {
        &self.background_curve
    }

    /// Crest height of the front wave at column `x`.
    pub fn front_curve_at(&self, x: usize) -> f32 {
        let len = self.background_curve.len();
        self.background_curve[(x + self.front_shift) % len]
    }

    pub fn front_curve(&self) -> Vec<f32> {
        (0..self.background_curve.len()).map(|x| self.front_curve_at(x)).collect()
    }

    pub fn colors(&self) -> (Color, Color) {
        (self.front_color, self.background_color)
    }
}

/// Builds [`WaveTexture`]s. Pure: identical inputs give identical textures.
pub struct WaveTextureBuilder;

impl WaveTextureBuilder {
    /// Synthesize the texture for a `width`×`height` target.
    ///
    /// Returns `None` while either dimension is zero, so callers keep whatever
    /// texture they already have.
    pub fn build(width: u32, height: u32, background: Color, front: Color) -> Option<WaveTexture> {
        if width == 0 || height == 0 {
            return None;
        }

        let angular_frequency = 2.0 * PI / DEFAULT_WAVE_LENGTH_RATIO as f64 / width as f64;
        let amplitude = height as f64 * DEFAULT_AMPLITUDE_RATIO as f64;
        let water_level = height as f64 * DEFAULT_WATER_LEVEL_RATIO as f64;

        let end_x = width as usize + 1;
        let end_y = height + 1;

        // y = A * sin(wx) + h
        let background_curve: Vec<f32> = (0..end_x)
            .map(|x| (water_level + amplitude * (x as f64 * angular_frequency).sin()) as f32)
            .collect();

        let mut image = RgbaImage::new(end_x as u32, end_y);
        for (x, &y) in background_curve.iter().enumerate() {
            fill_column(&mut image, x as u32, y, background);
        }

        let front_shift = width as usize / 4;
        for x in 0..end_x {
            let y = background_curve[(x + front_shift) % end_x];
            fill_column(&mut image, x as u32, y, front);
        }

        Some(WaveTexture {
            image,
            view_width: width,
            view_height: height,
            default_water_level: water_level as f32,
            default_amplitude: amplitude as f32,
            background_curve,
            front_shift,
            background_color: background,
            front_color: front,
        })
    }
}

/// Paint every pixel of column `x` whose center lies at or below `top`.
fn fill_column(image: &mut RgbaImage, x: u32, top: f32, color: Color) {
    let height = image.height();
    let first = (top - 0.5).ceil().clamp(0.0, height as f32) as u32;
    let paint = Rgba(color.to_rgba());
    for y in first..height {
        image.get_pixel_mut(x, y).blend(&paint);
    }
}
