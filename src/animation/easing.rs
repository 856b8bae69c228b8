//! Easing curves mapping linear progress in `[0, 1]` to eased progress.

use std::f32::consts::PI;

pub type EaseFn = fn(f32) -> f32;

pub const LINEAR: EaseFn = |t: f32| -> f32 { t };

/// Quadratic ease-out, starts fast and slows into the target.
pub const DECELERATE: EaseFn = |t: f32| -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv
};

pub const ACCELERATE: EaseFn = |t: f32| -> f32 { t * t };

pub const ACCELERATE_DECELERATE: EaseFn = |t: f32| -> f32 { ((t + 1.0) * PI).cos() * 0.5 + 0.5 };
