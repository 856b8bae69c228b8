//! Per-frame composite: border, wave fill and centered label.

use super::{DrawCommand, Frame, Paint, TextMeasure};
use crate::style::StyleConfig;
use crate::wave::{ShapeType, WaveFrameTransformer, WaveParameters, WaveTexture};

impl WaveFrameTransformer {
    /// Build the draw commands for one frame.
    ///
    /// Without a texture the target size is unknown, so the frame is empty.
    pub fn compose_frame(
        texture: Option<&WaveTexture>,
        params: &WaveParameters,
        shape: ShapeType,
        style: &StyleConfig,
        metrics: &dyn TextMeasure,
    ) -> Frame {
        let Some(texture) = texture else {
            return Frame::default();
        };

        let (width, height) = texture.view_size();
        let (w, h) = (width as f32, height as f32);
        let paint = Paint::Wave {
            matrix: Self::shader_matrix(texture, params),
        };
        let border = style.border;
        let bw = border.width;

        let mut frame = Frame::empty(width, height);
        match shape {
            ShapeType::Circle => {
                let center = (w / 2.0, h / 2.0);
                if bw > 0.0 {
                    frame.commands.push(DrawCommand::StrokeCircle {
                        center,
                        radius: (w - bw) / 2.0 - 1.0,
                        stroke_width: bw,
                        color: border.color,
                    });
                }
                frame.commands.push(DrawCommand::FillCircle {
                    center,
                    radius: w / 2.0 - bw,
                    paint,
                });
            }
            ShapeType::Square => {
                if bw > 0.0 {
                    frame.commands.push(DrawCommand::StrokeRect {
                        left: bw / 2.0,
                        top: bw / 2.0,
                        right: w - bw / 2.0 - 0.5,
                        bottom: h - bw / 2.0 - 0.5,
                        stroke_width: bw,
                        color: border.color,
                    });
                }
                frame.commands.push(DrawCommand::FillRect {
                    left: bw,
                    top: bw,
                    right: w - bw,
                    bottom: h - bw,
                    paint,
                });
            }
        }

        if let Some(text) = &style.text {
            let size = style.text_size;
            let measured = metrics.measure_text(text, size);
            frame.commands.push(DrawCommand::Text {
                text: text.clone(),
                x: (w - measured) / 2.0,
                baseline: h / 2.0 - (metrics.descent(size) + metrics.ascent(size)) / 2.0,
                size,
                color: style.text_color,
            });
        }

        frame
    }
}
