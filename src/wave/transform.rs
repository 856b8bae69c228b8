//! Per-frame wave transform.

use tiny_skia::Transform;

use super::{
    WaveParameters, WaveTexture, DEFAULT_AMPLITUDE_RATIO, DEFAULT_WATER_LEVEL_RATIO,
    DEFAULT_WAVE_LENGTH_RATIO,
};

/// Transform that scales by `(sx, sy)` keeping `(px, py)` fixed.
pub fn scale_about(sx: f32, sy: f32, px: f32, py: f32) -> Transform {
    Transform::from_translate(px, py)
        .pre_scale(sx, sy)
        .pre_translate(-px, -py)
}

/// Inverse of `matrix`, or `None` when it collapses an axis.
pub fn invert_matrix(matrix: Transform) -> Option<Transform> {
    let det = matrix.sx * matrix.sy - matrix.kx * matrix.ky;
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    matrix.invert()
}

/// Turns the current wave parameters into texture transforms and frames.
pub struct WaveFrameTransformer;

impl WaveFrameTransformer {
    /// Transform from texture space to target space for this frame.
    ///
    /// Scaling around the default water line changes wavelength and amplitude
    /// without touching the texture; the translation moves the phase and the
    /// water level.
    pub fn shader_matrix(texture: &WaveTexture, params: &WaveParameters) -> Transform {
        let (width, height) = texture.view_size();
        scale_about(
            params.wave_length_ratio / DEFAULT_WAVE_LENGTH_RATIO,
            params.amplitude_ratio / DEFAULT_AMPLITUDE_RATIO,
            0.0,
            texture.default_water_level(),
        )
        .post_translate(
            params.wave_shift_ratio * width as f32,
            (DEFAULT_WATER_LEVEL_RATIO - params.water_level_ratio) * height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::wave::WaveTextureBuilder;
    use tiny_skia::Point;

    fn apply(m: Transform, x: f32, y: f32) -> (f32, f32) {
        let mut points = [Point::from_xy(x, y)];
        m.map_points(&mut points);
        (points[0].x, points[0].y)
    }

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn test_scale_about_keeps_pivot() {
        let m = scale_about(2.0, 3.0, 5.0, 7.0);
        assert!(approx(apply(m, 5.0, 7.0), (5.0, 7.0)));
        assert!(approx(apply(m, 6.0, 8.0), (7.0, 10.0)));
    }

    #[test]
    fn test_post_translate_applies_after_scale() {
        let m = scale_about(2.0, 2.0, 0.0, 0.0).post_translate(10.0, -4.0);
        assert!(approx(apply(m, 1.0, 1.0), (12.0, -2.0)));
    }

    #[test]
    fn test_invert_round_trips() {
        let m = scale_about(0.5, 0.25, 0.0, 50.0).post_translate(37.0, -12.0);
        let inv = invert_matrix(m).unwrap();
        let (x, y) = apply(m, 13.0, 44.0);
        assert!(approx(apply(inv, x, y), (13.0, 44.0)));
        assert!(invert_matrix(scale_about(1.0, 0.0, 0.0, 0.0)).is_none());
        assert!(invert_matrix(scale_about(1.0, f32::INFINITY, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_default_parameters_give_identity() {
        let texture = WaveTextureBuilder::build(100, 100, Color::WHITE, Color::BLACK).unwrap();
        let m = WaveFrameTransformer::shader_matrix(&texture, &WaveParameters::default());
        assert!(approx(apply(m, 10.0, 20.0), (10.0, 20.0)));
    }

    #[test]
    fn test_shift_and_level_translate() {
        let texture = WaveTextureBuilder::build(200, 100, Color::WHITE, Color::BLACK).unwrap();
        let params = WaveParameters {
            wave_shift_ratio: 0.25,
            water_level_ratio: 0.8,
            ..Default::default()
        };
        let m = WaveFrameTransformer::shader_matrix(&texture, &params);
        // the default water line moves up by 0.3 of the height
        assert!(approx(apply(m, 0.0, 50.0), (50.0, 20.0)));
    }

    #[test]
    fn test_amplitude_scales_around_water_line() {
        let texture = WaveTextureBuilder::build(100, 100, Color::WHITE, Color::BLACK).unwrap();
        let params = WaveParameters {
            amplitude_ratio: 0.025,
            wave_length_ratio: 2.0,
            ..Default::default()
        };
        let m = WaveFrameTransformer::shader_matrix(&texture, &params);
        assert!(approx(apply(m, 0.0, 50.0), (0.0, 50.0)));
        assert!(approx(apply(m, 10.0, 54.0), (20.0, 52.0)));
        assert_eq!((m.kx, m.ky), (0.0, 0.0));
    }
}
