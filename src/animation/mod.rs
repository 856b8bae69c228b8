//! Time-driven value interpolation.
//!
//! Each animated gauge parameter is driven by its own [`Animator`], sampled once
//! per frame with the elapsed time since the previous frame.

pub mod animator;
pub mod easing;

pub use animator::{Animator, Interpolate, RepeatMode};
pub use easing::{EaseFn, ACCELERATE, ACCELERATE_DECELERATE, DECELERATE, LINEAR};
