//! Visual style of the gauge: border, wave colors and label.

use crate::color::Color;

pub const DEFAULT_BACKGROUND_WAVE_COLOR: Color = Color::from_argb(0x28FF_FFFF);
pub const DEFAULT_FRONT_WAVE_COLOR: Color = Color::from_argb(0x3CFF_FFFF);
pub const DEFAULT_TEXT_COLOR: Color = Color::from_argb(0xFF21_2121);
pub const DEFAULT_BORDER_COLOR: Color = Color::BLACK;
/// Label size in scale-independent pixels.
pub const DEFAULT_TEXT_SIZE_SP: f32 = 22.0;

/// Convert a scale-independent size to pixels, rounding half up.
pub fn sp_to_px(sp: f32, scaled_density: f32) -> f32 {
    sp * scaled_density + 0.5
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Stroke width in pixels. Zero disables the border.
    pub width: f32,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: 0.0,
            color: DEFAULT_BORDER_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub border: Border,
    pub front_wave_color: Color,
    pub background_wave_color: Color,
    pub text: Option<String>,
    pub text_color: Color,
    /// Label size in pixels.
    pub text_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            border: Border::default(),
            front_wave_color: DEFAULT_FRONT_WAVE_COLOR,
            background_wave_color: DEFAULT_BACKGROUND_WAVE_COLOR,
            text: None,
            text_color: DEFAULT_TEXT_COLOR,
            text_size: sp_to_px(DEFAULT_TEXT_SIZE_SP, 1.0),
        }
    }
}
