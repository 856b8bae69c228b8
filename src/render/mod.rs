//! Frame composition and CPU rasterization.
//!
//! A frame is a flat list of [`DrawCommand`]s in painting order. Hosts with
//! their own drawing surface replay the commands; [`raster::rasterize`]
//! executes them into an [`image::RgbaImage`] through `tiny_skia`.

pub mod compose;
pub mod raster;
pub mod text;

pub use raster::{rasterize, save_png, RenderError};
pub use text::{ApproxTextMetrics, TextMeasure};

use tiny_skia::Transform;

use crate::color::Color;

/// How a shape is filled or stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// The wave texture, sampled through `matrix` (texture space to target space).
    /// Repeats horizontally, clamps vertically.
    Wave { matrix: Transform },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    StrokeCircle {
        center: (f32, f32),
        radius: f32,
        stroke_width: f32,
        color: Color,
    },
    FillCircle {
        center: (f32, f32),
        radius: f32,
        paint: Paint,
    },
    StrokeRect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        stroke_width: f32,
        color: Color,
    },
    FillRect {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        paint: Paint,
    },
    /// Text drawn with its baseline starting at `(x, baseline)`.
    Text {
        text: String,
        x: f32,
        baseline: f32,
        size: f32,
        color: Color,
    },
}

/// One frame worth of draw commands for a `width`×`height` target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
