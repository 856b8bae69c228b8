//! CPU execution of frames into RGBA images.
//!
//! Frames are painted on a `tiny_skia` pixmap without anti-aliasing, so a
//! pixel is covered when its center lies inside the shape.

use image::{Rgba, RgbaImage};
use std::ops::Range;
use std::path::Path;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Mask, PathBuilder, Pattern, Pixmap, Rect, SpreadMode,
    Stroke, Transform,
};

use super::{DrawCommand, Frame, Paint};
use crate::color::Color;
use crate::wave::{invert_matrix, WaveTexture};

/// Errors that can occur while producing image output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Frame has no pixels ({0}x{1})")]
    EmptyFrame(u32, u32),
}

/// Execute `frame` on a transparent canvas of the frame's size.
///
/// Wave paints sample `texture`; without one they are skipped. Text commands
/// are left to the host, which owns the glyph rasterizer.
pub fn rasterize(frame: &Frame, texture: Option<&WaveTexture>) -> RgbaImage {
    let Some(mut canvas) = Pixmap::new(frame.width, frame.height) else {
        return RgbaImage::new(frame.width, frame.height);
    };

    for command in &frame.commands {
        match command {
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
            } => {
                if let Some(path) = PathBuilder::from_circle(center.0, center.1, *radius) {
                    fill_shape(&mut canvas, &path, paint, texture);
                }
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                stroke_width,
                color,
            } => {
                if let Some(path) = PathBuilder::from_circle(center.0, center.1, *radius) {
                    stroke_shape(&mut canvas, &path, *stroke_width, *color);
                }
            }
            DrawCommand::FillRect {
                left,
                top,
                right,
                bottom,
                paint,
            } => {
                if let Some(rect) = Rect::from_ltrb(*left, *top, *right, *bottom) {
                    fill_shape(&mut canvas, &PathBuilder::from_rect(rect), paint, texture);
                }
            }
            DrawCommand::StrokeRect {
                left,
                top,
                right,
                bottom,
                stroke_width,
                color,
            } => {
                if let Some(rect) = Rect::from_ltrb(*left, *top, *right, *bottom) {
                    stroke_shape(&mut canvas, &PathBuilder::from_rect(rect), *stroke_width, *color);
                }
            }
            DrawCommand::Text { text, .. } => {
                log::trace!("Skipping glyph rasterization for label {:?}", text);
            }
        }
    }

    to_image(&canvas)
}

fn solid_paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

fn pattern_paint(source: &Pixmap, matrix: Transform) -> tiny_skia::Paint<'_> {
    tiny_skia::Paint {
        shader: Pattern::new(
            source.as_ref(),
            SpreadMode::Repeat,
            FilterQuality::Nearest,
            1.0,
            matrix,
        ),
        anti_alias: false,
        ..Default::default()
    }
}

fn stroke_shape(canvas: &mut Pixmap, path: &tiny_skia::Path, width: f32, color: Color) {
    // zero width would draw a hairline
    if width <= 0.0 {
        return;
    }
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    canvas.stroke_path(path, &solid_paint(color), &stroke, Transform::identity(), None);
}

fn fill_shape(
    canvas: &mut Pixmap,
    shape: &tiny_skia::Path,
    paint: &Paint,
    texture: Option<&WaveTexture>,
) {
    match paint {
        Paint::Solid(color) => {
            canvas.fill_path(
                shape,
                &solid_paint(*color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        Paint::Wave { matrix } => {
            let Some(texture) = texture else {
                return;
            };
            if invert_matrix(*matrix).is_none() {
                log::warn!("Wave matrix is not invertible, skipping wave fill: {:?}", matrix);
                return;
            }
            fill_wave(canvas, shape, texture.image(), *matrix);
        }
    }
}

/// Fill `shape` with `image` mapped through `matrix`.
///
/// The pattern repeats along x. Target rows that map above or below the
/// bitmap take its first or last row.
fn fill_wave(canvas: &mut Pixmap, shape: &tiny_skia::Path, image: &RgbaImage, matrix: Transform) {
    let rows = image.height();
    let (Some(texture), Some(first_row), Some(last_row)) = (
        premultiplied(image, 0..rows),
        premultiplied(image, 0..1),
        premultiplied(image, rows.saturating_sub(1)..rows),
    ) else {
        return;
    };

    if matrix.kx != 0.0 || matrix.ky != 0.0 {
        log::debug!("Skewed wave matrix, tiling the texture on both axes: {:?}", matrix);
        canvas.fill_path(
            shape,
            &pattern_paint(&texture, matrix),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        return;
    }

    let Some(mut clip) = Mask::new(canvas.width(), canvas.height()) else {
        return;
    };
    clip.fill_path(shape, FillRule::Winding, false, Transform::identity());

    // target rows where texture row 0 and the bottom edge land
    let top_edge = matrix.ty;
    let bottom_edge = matrix.sy * rows as f32 + matrix.ty;
    let (before, after) = if matrix.sy > 0.0 {
        (&first_row, &last_row)
    } else {
        (&last_row, &first_row)
    };
    let band_top = top_edge.min(bottom_edge);
    let band_bottom = top_edge.max(bottom_edge);

    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let bands = [
        (0.0, band_top, before),
        (band_top, band_bottom, &texture),
        (band_bottom, height, after),
    ];
    for (top, bottom, source) in bands {
        let (top, bottom) = (top.clamp(0.0, height), bottom.clamp(0.0, height));
        let Some(band) = Rect::from_ltrb(0.0, top, width, bottom) else {
            continue;
        };
        canvas.fill_path(
            &PathBuilder::from_rect(band),
            &pattern_paint(source, matrix),
            FillRule::Winding,
            Transform::identity(),
            Some(&clip),
        );
    }
}

/// Copy `rows` of a straight-alpha image into a premultiplied pixmap.
fn premultiplied(image: &RgbaImage, rows: Range<u32>) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), rows.end.checked_sub(rows.start)?)?;
    let width = image.width() as usize;
    for (line, y) in pixmap.pixels_mut().chunks_mut(width).zip(rows) {
        for (x, pixel) in line.iter_mut().enumerate() {
            let [r, g, b, a] = image.get_pixel(x as u32, y).0;
            *pixel = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
    }
    Some(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (out, pixel) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = pixel.demultiply();
        *out = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

/// Write a rendered frame as PNG.
pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<(), RenderError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RenderError::EmptyFrame(image.width(), image.height()));
    }
    image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    log::debug!("Saved {}x{} frame to {}", image.width(), image.height(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{scale_about, WaveFrameTransformer, WaveParameters, WaveTextureBuilder};

    const RED: Color = Color::from_argb(0xFFFF_0000);
    const BG: Color = Color::from_argb(0x28FF_FFFF);
    const FRONT: Color = Color::from_argb(0x3CFF_FFFF);

    fn frame(commands: Vec<DrawCommand>) -> Frame {
        Frame {
            width: 20,
            height: 20,
            commands,
        }
    }

    /// Fill the whole 40x40 target with the wave.
    fn wave_fill(texture: &WaveTexture, matrix: Transform) -> RgbaImage {
        rasterize(
            &Frame {
                width: 40,
                height: 40,
                commands: vec![DrawCommand::FillRect {
                    left: 0.0,
                    top: 0.0,
                    right: 40.0,
                    bottom: 40.0,
                    paint: Paint::Wave { matrix },
                }],
            },
            Some(texture),
        )
    }

    fn wave_params(shift: f32, level: f32) -> WaveParameters {
        WaveParameters {
            wave_shift_ratio: shift,
            water_level_ratio: level,
            ..Default::default()
        }
    }

    #[test]
    fn test_solid_circle_coverage() {
        let image = rasterize(
            &frame(vec![DrawCommand::FillCircle {
                center: (10.0, 10.0),
                radius: 5.0,
                paint: Paint::Solid(RED),
            }]),
            None,
        );
        assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(10, 16).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroke_circle_leaves_center_empty() {
        let image = rasterize(
            &frame(vec![DrawCommand::StrokeCircle {
                center: (10.0, 10.0),
                radius: 8.0,
                stroke_width: 2.0,
                color: RED,
            }]),
            None,
        );
        assert_eq!(image.get_pixel(10, 10).0[3], 0);
        assert_eq!(image.get_pixel(10, 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_stroke_rect_is_hollow() {
        let image = rasterize(
            &frame(vec![DrawCommand::StrokeRect {
                left: 2.0,
                top: 2.0,
                right: 18.0,
                bottom: 18.0,
                stroke_width: 2.0,
                color: RED,
            }]),
            None,
        );
        assert_eq!(image.get_pixel(1, 10).0[3], 255);
        assert_eq!(image.get_pixel(10, 10).0[3], 0);
    }

    #[test]
    fn test_zero_width_stroke_draws_nothing() {
        let image = rasterize(
            &frame(vec![DrawCommand::StrokeRect {
                left: 2.0,
                top: 2.0,
                right: 18.0,
                bottom: 18.0,
                stroke_width: 0.0,
                color: RED,
            }]),
            None,
        );
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_wave_fill_without_texture_is_skipped() {
        let image = rasterize(
            &frame(vec![DrawCommand::FillRect {
                left: 0.0,
                top: 0.0,
                right: 20.0,
                bottom: 20.0,
                paint: Paint::Wave {
                    matrix: Transform::identity(),
                },
            }]),
            None,
        );
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_collapsed_wave_matrix_is_skipped() {
        let texture = WaveTextureBuilder::build(40, 40, RED, RED).unwrap();
        let image = wave_fill(&texture, scale_about(1.0, 0.0, 0.0, 20.0));
        assert_eq!(image.dimensions(), (40, 40));
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_wave_fill_follows_water_level() {
        let texture = WaveTextureBuilder::build(40, 40, RED, RED).unwrap();
        let fill = |level: f32| {
            let matrix = WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.0, level));
            wave_fill(&texture, matrix)
        };

        let filled = fill(1.0).pixels().filter(|p| p.0[3] > 0).count();
        let drained = fill(0.0).pixels().filter(|p| p.0[3] > 0).count();
        assert!(filled > 40 * 30);
        assert!(drained < 40 * 10);
    }

    #[test]
    fn test_wave_texture_repeats_horizontally() {
        let texture = WaveTextureBuilder::build(40, 40, BG, FRONT).unwrap();
        let source = texture.image();
        let matrix = WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.5, 0.5));
        let image = wave_fill(&texture, matrix);

        // half a width of shift; columns left of it sample the previous tile
        for x in 0..40u32 {
            let column = (x as i64 - 20).rem_euclid(41) as u32;
            for y in 0..40 {
                assert_eq!(
                    image.get_pixel(x, y).0[3],
                    source.get_pixel(column, y).0[3],
                    "target ({}, {}) texture column {}",
                    x,
                    y,
                    column
                );
            }
        }
    }

    #[test]
    fn test_full_shift_cycle_lands_one_column_over() {
        let texture = WaveTextureBuilder::build(40, 40, BG, FRONT).unwrap();
        let start = wave_fill(
            &texture,
            WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.0, 0.5)),
        );
        let wrapped = wave_fill(
            &texture,
            WaveFrameTransformer::shader_matrix(&texture, &wave_params(1.0, 0.5)),
        );
        // the texture period is width + 1
        for x in 0..39u32 {
            for y in 0..40 {
                assert_eq!(wrapped.get_pixel(x, y).0[3], start.get_pixel(x + 1, y).0[3]);
            }
        }
    }

    #[test]
    fn test_wave_texture_clamps_vertically() {
        let texture = WaveTextureBuilder::build(40, 40, BG, FRONT).unwrap();
        let source = texture.image();
        let last = source.height() - 1;

        // full: the texture is lifted by 20 rows and ends at target row 21
        let full = wave_fill(
            &texture,
            WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.0, 1.0)),
        );
        for x in 0..40u32 {
            for y in 0..21 {
                assert_eq!(full.get_pixel(x, y).0[3], source.get_pixel(x, y + 20).0[3]);
            }
            for y in 21..40 {
                let alpha = full.get_pixel(x, y).0[3];
                assert!(alpha > 0);
                assert_eq!(alpha, source.get_pixel(x, last).0[3], "row {}", y);
            }
        }

        // empty: rows above the texture take its transparent first row
        let empty = wave_fill(
            &texture,
            WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.0, 0.0)),
        );
        for x in 0..40u32 {
            for y in 0..20 {
                assert_eq!(empty.get_pixel(x, y).0[3], 0, "row {}", y);
            }
        }
    }

    #[test]
    fn test_wave_fill_is_clipped_to_shape() {
        let texture = WaveTextureBuilder::build(40, 40, RED, RED).unwrap();
        let matrix = WaveFrameTransformer::shader_matrix(&texture, &wave_params(0.0, 1.0));
        let image = rasterize(
            &Frame {
                width: 40,
                height: 40,
                commands: vec![DrawCommand::FillCircle {
                    center: (20.0, 20.0),
                    radius: 10.0,
                    paint: Paint::Wave { matrix },
                }],
            },
            Some(&texture),
        );
        assert_eq!(image.get_pixel(20, 35).0[3], 0);
        assert_eq!(image.get_pixel(20, 25).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png_rejects_empty_image() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_png(&RgbaImage::new(0, 0), dir.path().join("empty.png"));
        assert!(matches!(result, Err(RenderError::EmptyFrame(0, 0))));
    }
}
