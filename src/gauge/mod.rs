//! The stateful gauge component.
//!
//! [`WaveGauge`] owns the wave parameters, their three animation drivers, the
//! style and the cached texture. The host feeds it size changes and frame
//! ticks and pulls a [`Frame`] (or a rendered image) whenever a redraw is
//! requested.

use image::RgbaImage;
use std::time::Duration;

use crate::animation::{Animator, RepeatMode, DECELERATE, LINEAR};
use crate::color::Color;
use crate::config::WaveGaugeConfig;
use crate::render::{rasterize, ApproxTextMetrics, Frame, TextMeasure};
use crate::style::{Border, StyleConfig};
use crate::wave::{ShapeType, WaveFrameTransformer, WaveParameters, WaveTexture, WaveTextureBuilder};

pub const WAVE_SHIFT_PERIOD: Duration = Duration::from_millis(1000);
pub const AMPLITUDE_PERIOD: Duration = Duration::from_millis(5000);
pub const WATER_LEVEL_DURATION: Duration = Duration::from_millis(3000);
pub const MIN_ANIMATED_AMPLITUDE: f32 = 0.0001;
pub const MAX_ANIMATED_AMPLITUDE: f32 = 0.05;

pub struct WaveGauge {
    params: WaveParameters,
    shape: ShapeType,
    style: StyleConfig,
    width: u32,
    height: u32,
    texture: Option<WaveTexture>,
    texture_rebuilds: u64,
    shift_anim: Animator<f32>,
    amplitude_anim: Animator<f32>,
    level_anim: Animator<f32>,
    metrics: Box<dyn TextMeasure>,
    redraw_requested: bool,
}

impl Default for WaveGauge {
    fn default() -> Self {
        Self::new(WaveGaugeConfig::default())
    }
}

impl std::fmt::Debug for WaveGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveGauge")
            .field("params", &self.params)
            .field("shape", &self.shape)
            .field("style", &self.style)
            .field("size", &(self.width, self.height))
            .field("has_texture", &self.texture.is_some())
            .field("texture_rebuilds", &self.texture_rebuilds)
            .finish()
    }
}

impl WaveGauge {
    /// Create a gauge. The water starts empty and animates to `config.water_level`.
    pub fn new(config: WaveGaugeConfig) -> Self {
        let params = WaveParameters {
            amplitude_ratio: config.amplitude_ratio,
            wave_length_ratio: config.wave_length_ratio,
            wave_shift_ratio: config.wave_shift_ratio,
            water_level_ratio: 0.0,
            progress_value: config.water_level,
        };

        let mut shift_anim = Animator::new(0.0, 1.0, WAVE_SHIFT_PERIOD)
            .with_easing(LINEAR)
            .with_repeat(RepeatMode::Loop);
        let mut amplitude_anim =
            Animator::new(MIN_ANIMATED_AMPLITUDE, MAX_ANIMATED_AMPLITUDE, AMPLITUDE_PERIOD)
                .with_easing(LINEAR)
                .with_repeat(RepeatMode::Reverse);
        if !config.animate {
            shift_anim.stop();
            amplitude_anim.stop();
        }

        Self {
            params,
            shape: config.shape,
            style: config.to_style(),
            width: 0,
            height: 0,
            texture: None,
            texture_rebuilds: 0,
            shift_anim,
            amplitude_anim,
            level_anim: level_animator(0.0, config.water_level),
            metrics: Box::new(ApproxTextMetrics::default()),
            redraw_requested: true,
        }
    }

    /// Replace the label metrics with the host's text engine.
    pub fn with_text_metrics<M: TextMeasure + 'static>(mut self, metrics: M) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    // ==================== Host hooks ====================

    /// The target was resized. Regenerates the texture for a positive size.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rebuild_texture();
        self.invalidate();
    }

    /// Advance all running animations by one frame.
    pub fn tick(&mut self, delta: Duration) {
        let mut changed = false;
        if self.shift_anim.is_running() {
            self.params.wave_shift_ratio = self.shift_anim.tick(delta);
            changed = true;
        }
        if self.amplitude_anim.is_running() {
            self.params.amplitude_ratio = self.amplitude_anim.tick(delta);
            changed = true;
        }
        if self.level_anim.is_running() {
            self.params.water_level_ratio = self.level_anim.tick(delta);
            changed = true;
        }
        if changed {
            self.invalidate();
        }
    }

    /// Draw commands for the current state.
    pub fn frame(&self) -> Frame {
        WaveFrameTransformer::compose_frame(
            self.texture.as_ref(),
            &self.params,
            self.shape,
            &self.style,
            self.metrics.as_ref(),
        )
    }

    /// Rasterize the current frame. Empty until a size is known.
    pub fn render(&self) -> RgbaImage {
        rasterize(&self.frame(), self.texture.as_ref())
    }

    /// Whether something changed since the last call. Clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn texture(&self) -> Option<&WaveTexture> {
        self.texture.as_ref()
    }

    /// Number of times the texture has been regenerated.
    pub fn texture_rebuilds(&self) -> u64 {
        self.texture_rebuilds
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn params(&self) -> &WaveParameters {
        &self.params
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Whether the water level is still moving toward the progress value.
    pub fn is_level_animating(&self) -> bool {
        self.level_anim.is_running()
    }

    // ==================== Progress ====================

    /// Animate the water level from where it is now to `progress` over 3 s.
    pub fn set_progress_value(&mut self, progress: f32) {
        self.params.progress_value = progress;
        self.level_anim.retarget(progress);
        log::debug!(
            "Water level retargeted {:.3} -> {:.3}",
            self.params.water_level_ratio,
            progress
        );
        self.invalidate();
    }

    pub fn progress_value(&self) -> f32 {
        self.params.progress_value
    }

    // ==================== Wave parameters ====================

    pub fn wave_shift_ratio(&self) -> f32 {
        self.params.wave_shift_ratio
    }

    /// Shift the wave horizontally by `value` times the width. Running shift
    /// animation overwrites this on the next tick; see [`Self::set_wave_motion`].
    pub fn set_wave_shift_ratio(&mut self, value: f32) {
        if self.params.wave_shift_ratio != value {
            self.params.wave_shift_ratio = value;
            self.invalidate();
        }
    }

    pub fn water_level_ratio(&self) -> f32 {
        self.params.water_level_ratio
    }

    /// Jump the water level to `value`, cancelling any level animation.
    pub fn set_water_level_ratio(&mut self, value: f32) {
        self.level_anim = level_animator(value, value);
        self.level_anim.stop();
        if self.params.water_level_ratio != value {
            self.params.water_level_ratio = value;
            self.invalidate();
        }
    }

    pub fn amplitude_ratio(&self) -> f32 {
        self.params.amplitude_ratio
    }

    pub fn set_amplitude_ratio(&mut self, value: f32) {
        if self.params.amplitude_ratio != value {
            self.params.amplitude_ratio = value;
            self.invalidate();
        }
    }

    pub fn wave_length_ratio(&self) -> f32 {
        self.params.wave_length_ratio
    }

    pub fn set_wave_length_ratio(&mut self, value: f32) {
        self.params.wave_length_ratio = value;
        self.invalidate();
    }

    /// Start or stop the endless shift and amplitude animations.
    pub fn set_wave_motion(&mut self, enabled: bool) {
        if enabled {
            self.shift_anim.start();
            self.amplitude_anim.start();
        } else {
            self.shift_anim.stop();
            self.amplitude_anim.stop();
        }
        self.invalidate();
    }

    pub fn is_wave_motion_enabled(&self) -> bool {
        self.shift_anim.is_running() || self.amplitude_anim.is_running()
    }

    // ==================== Style ====================

    pub fn shape_type(&self) -> ShapeType {
        self.shape
    }

    pub fn set_shape_type(&mut self, shape: ShapeType) {
        self.shape = shape;
        self.invalidate();
    }

    pub fn text(&self) -> Option<&str> {
        self.style.text.as_deref()
    }

    pub fn set_text<S: Into<String>>(&mut self, text: Option<S>) {
        self.style.text = text.map(Into::into);
        self.invalidate();
    }

    pub fn text_color(&self) -> Color {
        self.style.text_color
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
        self.invalidate();
    }

    /// Label size in pixels.
    pub fn text_size(&self) -> f32 {
        self.style.text_size
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.style.text_size = size;
        self.invalidate();
    }

    pub fn border(&self) -> Border {
        self.style.border
    }

    pub fn set_border(&mut self, width: u32, color: Color) {
        self.style.border = Border {
            width: width as f32,
            color,
        };
        self.invalidate();
    }

    /// Front and background wave colors.
    pub fn wave_colors(&self) -> (Color, Color) {
        (self.style.front_wave_color, self.style.background_wave_color)
    }

    /// Change the wave colors. The texture is regenerated only once a size is known.
    pub fn set_wave_color(&mut self, front: Color, background: Color) {
        self.style.front_wave_color = front;
        self.style.background_wave_color = background;
        if self.width > 0 && self.height > 0 {
            self.rebuild_texture();
            self.invalidate();
        }
    }

    fn rebuild_texture(&mut self) {
        let built = WaveTextureBuilder::build(
            self.width,
            self.height,
            self.style.background_wave_color,
            self.style.front_wave_color,
        );
        match built {
            Some(texture) => {
                self.texture = Some(texture);
                self.texture_rebuilds += 1;
                log::debug!(
                    "Rebuilt wave texture for {}x{} (rebuild #{})",
                    self.width,
                    self.height,
                    self.texture_rebuilds
                );
            }
            None => log::debug!(
                "Keeping previous wave texture, size {}x{} is empty",
                self.width,
                self.height
            ),
        }
    }

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }
}

fn level_animator(from: f32, to: f32) -> Animator<f32> {
    Animator::new(from, to, WATER_LEVEL_DURATION).with_easing(DECELERATE)
}
