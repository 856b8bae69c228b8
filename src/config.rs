//! Initial gauge configuration.
//!
//! Every field is optional in serialized form; missing fields take the
//! documented defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Color;
use crate::style::{
    sp_to_px, Border, StyleConfig, DEFAULT_BACKGROUND_WAVE_COLOR, DEFAULT_BORDER_COLOR,
    DEFAULT_FRONT_WAVE_COLOR, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE_SP,
};
use crate::wave::{
    ShapeType, DEFAULT_AMPLITUDE_RATIO, DEFAULT_WATER_LEVEL_RATIO, DEFAULT_WAVE_LENGTH_RATIO,
    DEFAULT_WAVE_SHIFT_RATIO,
};

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveGaugeConfig {
    /// Initial wave height as a fraction of the height.
    pub amplitude_ratio: f32,
    /// Target fill level the water animates to after construction.
    pub water_level: f32,
    pub wave_length_ratio: f32,
    pub wave_shift_ratio: f32,
    pub shape: ShapeType,
    pub front_color: Color,
    pub background_color: Color,
    pub text: Option<String>,
    pub text_color: Color,
    /// Label size in scale-independent pixels.
    pub text_size_sp: f32,
    /// Pixels per scale-independent pixel.
    pub scaled_density: f32,
    pub border_width: u32,
    pub border_color: Color,
    /// Run the shift and amplitude animations.
    pub animate: bool,
}

impl Default for WaveGaugeConfig {
    fn default() -> Self {
        Self {
            amplitude_ratio: DEFAULT_AMPLITUDE_RATIO,
            water_level: DEFAULT_WATER_LEVEL_RATIO,
            wave_length_ratio: DEFAULT_WAVE_LENGTH_RATIO,
            wave_shift_ratio: DEFAULT_WAVE_SHIFT_RATIO,
            shape: ShapeType::Circle,
            front_color: DEFAULT_FRONT_WAVE_COLOR,
            background_color: DEFAULT_BACKGROUND_WAVE_COLOR,
            text: None,
            text_color: DEFAULT_TEXT_COLOR,
            text_size_sp: DEFAULT_TEXT_SIZE_SP,
            scaled_density: 1.0,
            border_width: 0,
            border_color: DEFAULT_BORDER_COLOR,
            animate: true,
        }
    }
}

impl WaveGaugeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::debug!("Loaded gauge config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn text_size_px(&self) -> f32 {
        sp_to_px(self.text_size_sp, self.scaled_density)
    }

    pub fn to_style(&self) -> StyleConfig {
        StyleConfig {
            border: Border {
                width: self.border_width as f32,
                color: self.border_color,
            },
            front_wave_color: self.front_color,
            background_wave_color: self.background_color,
            text: self.text.clone(),
            text_color: self.text_color,
            text_size: self.text_size_px(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = WaveGaugeConfig::default();
        assert_eq!(config.amplitude_ratio, 0.05);
        assert_eq!(config.water_level, 0.5);
        assert_eq!(config.shape, ShapeType::Circle);
        assert_eq!(config.background_color.to_argb(), 0x28FF_FFFF);
        assert_eq!(config.front_color.to_argb(), 0x3CFF_FFFF);
        assert_eq!(config.text_color.to_argb(), 0xFF21_2121);
        assert_eq!(config.text_size_px(), 22.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WaveGaugeConfig::from_json_str(
            r##"{ "shape": "square", "border_width": 10, "border_color": "#44FFFFFF", "text": "42" }"##,
        )
        .unwrap();
        assert_eq!(config.shape, ShapeType::Square);
        assert_eq!(config.border_width, 10);
        assert_eq!(config.border_color, Color::from_argb(0x44FF_FFFF));
        assert_eq!(config.text.as_deref(), Some("42"));
        assert_eq!(config.wave_length_ratio, 1.0);
        assert!(config.animate);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            WaveGaugeConfig::from_json_str(r#"{ "front_color": "blue" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            WaveGaugeConfig::from_json_str(r#"{ "shape": "hexagon" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = WaveGaugeConfig {
            text: Some("hello".into()),
            scaled_density: 2.0,
            ..Default::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(WaveGaugeConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.json");
        std::fs::write(&path, r#"{ "water_level": 0.8 }"#).unwrap();
        assert_eq!(WaveGaugeConfig::from_file(&path).unwrap().water_level, 0.8);
        assert!(matches!(
            WaveGaugeConfig::from_file(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_to_style() {
        let config = WaveGaugeConfig {
            border_width: 6,
            ..Default::default()
        };
        let style = config.to_style();
        assert_eq!(style.border.width, 6.0);
        assert_eq!(style.text_size, 22.5);
    }
}
