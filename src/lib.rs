//! Wave Gauge Core
//!
//! Animated sine-wave "liquid fill" gauge rendering, independent of any GUI toolkit.
//!
//! # Features
//!
//! - Tileable two-wave texture synthesis, regenerated only on size or color changes
//! - Per-frame affine wave transforms (phase, amplitude, wavelength, water level)
//! - Circle and square composites with optional border and a centered label
//! - Independent time-driven animators with easing and repeat modes
//! - CPU rasterization of frames into RGBA images, PNG output
//! - JSON configuration via serde

pub mod animation;
pub mod color;
pub mod config;
pub mod gauge;
pub mod render;
pub mod style;
pub mod wave;

// Re-export commonly used types
pub use animation::{Animator, EaseFn, RepeatMode};
pub use color::{parse_hex_color, Color};
pub use config::{ConfigError, WaveGaugeConfig};
pub use gauge::WaveGauge;
pub use render::{
    rasterize, save_png, ApproxTextMetrics, DrawCommand, Frame, Paint, RenderError, TextMeasure,
};
pub use style::{Border, StyleConfig};
pub use tiny_skia::Transform;
pub use wave::{ShapeType, WaveFrameTransformer, WaveParameters, WaveTexture, WaveTextureBuilder};

/// Errors surfaced by the gauge's I/O edges.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Build a gauge from a JSON config file.
pub fn load_gauge<P: AsRef<std::path::Path>>(config_path: P) -> Result<WaveGauge, GaugeError> {
    let config = WaveGaugeConfig::from_file(config_path)?;
    Ok(WaveGauge::new(config))
}

/// Render the gauge's current frame to a PNG file.
pub fn render_png<P: AsRef<std::path::Path>>(
    gauge: &WaveGauge,
    output_path: P,
) -> Result<(), GaugeError> {
    let image = gauge.render();
    save_png(&image, output_path)?;
    Ok(())
}
