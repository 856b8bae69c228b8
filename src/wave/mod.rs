//! Wave synthesis and per-frame wave transforms.
//!
//! The wave is rasterized once per size into a tileable texture using fixed
//! default proportions, and every frame only the affine transform applied to
//! that texture changes:
//!
//! ```text
//! +------------------------+
//! | wave length            |__________
//! |   /\          |   /\   |  |
//! |  /  \         |  /  \  | amplitude
//! | /    \        | /    \ |  |
//! |/      \       |/      \|__|_______
//! |        \      /        |  |
//! |         \    /         |  |
//! |          \  /          |  |
//! |           \/           | water level
//! |                        |  |
//! +------------------------+__|_______
//! ```

pub mod texture;
pub mod transform;

pub use texture::{WaveTexture, WaveTextureBuilder};
pub use transform::{invert_matrix, scale_about, WaveFrameTransformer};

use serde::{Deserialize, Serialize};

pub const DEFAULT_AMPLITUDE_RATIO: f32 = 0.05;
pub const DEFAULT_WATER_LEVEL_RATIO: f32 = 0.5;
pub const DEFAULT_WAVE_LENGTH_RATIO: f32 = 1.0;
pub const DEFAULT_WAVE_SHIFT_RATIO: f32 = 0.0;

/// Continuous wave state sampled by the frame transformer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    /// Wave height as a fraction of the target height.
    pub amplitude_ratio: f32,
    /// Wave period as a fraction of the target width.
    pub wave_length_ratio: f32,
    /// Horizontal phase as a fraction of the target width.
    pub wave_shift_ratio: f32,
    /// Fill level, 0 = empty and 1 = full.
    pub water_level_ratio: f32,
    /// Target fill level the water animates toward.
    pub progress_value: f32,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            amplitude_ratio: DEFAULT_AMPLITUDE_RATIO,
            wave_length_ratio: DEFAULT_WAVE_LENGTH_RATIO,
            wave_shift_ratio: DEFAULT_WAVE_SHIFT_RATIO,
            water_level_ratio: DEFAULT_WATER_LEVEL_RATIO,
            progress_value: DEFAULT_WATER_LEVEL_RATIO,
        }
    }
}

/// Shape the wave fill is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Circle,
    Square,
}

impl ShapeType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" | "round" => Some(Self::Circle),
            "square" | "rect" | "rectangle" => Some(Self::Square),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Circle, Self::Square]
    }
}
