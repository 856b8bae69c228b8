use std::time::Duration;

use super::{EaseFn, LINEAR};

/// Values an [`Animator`] can interpolate between.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, progress: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(self, to: Self, progress: f32) -> Self {
        self + (to - self) * progress
    }
}

/// What happens when an animator reaches the end of its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop at `to` and report finished.
    #[default]
    Once,
    /// Jump back to `from` and play again, forever.
    Loop,
    /// Play back toward `from`, then forward again, forever. Each leg lasts `duration`.
    Reverse,
}

/// A single-value interpolator advanced by an external clock.
#[derive(Debug, Clone, Copy)]
pub struct Animator<T: Interpolate> {
    from: T,
    to: T,
    duration: Duration,
    easing: EaseFn,
    repeat: RepeatMode,
    elapsed: Duration,
    running: bool,
    finished: bool,
    value: T,
}

impl<T: Interpolate> Animator<T> {
    /// Create a running animator positioned at `from`.
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: LINEAR,
            repeat: RepeatMode::Once,
            elapsed: Duration::ZERO,
            running: true,
            finished: false,
            value: from,
        }
    }

    pub fn with_easing(mut self, easing: EaseFn) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    /// Advance by `delta` and return the new value.
    pub fn tick(&mut self, delta: Duration) -> T {
        if !self.running {
            return self.value;
        }

        self.elapsed = self.elapsed.saturating_add(delta);

        if self.duration.is_zero() {
            self.value = self.to;
            if self.repeat == RepeatMode::Once {
                self.finish();
            }
            return self.value;
        }

        match self.repeat {
            RepeatMode::Once => {
                if self.elapsed >= self.duration {
                    self.elapsed = self.duration;
                    self.finish();
                }
            }
            RepeatMode::Loop => self.elapsed = wrap(self.elapsed, self.duration),
            RepeatMode::Reverse => self.elapsed = wrap(self.elapsed, self.duration.saturating_mul(2)),
        }

        self.value = self.sample();
        self.value
    }

    fn sample(&self) -> T {
        let d = self.duration.as_secs_f64();
        let t = self.elapsed.as_secs_f64() / d;
        let progress = match self.repeat {
            RepeatMode::Once | RepeatMode::Loop => t.min(1.0),
            RepeatMode::Reverse if t <= 1.0 => t,
            RepeatMode::Reverse => 2.0 - t,
        };
        self.from.interpolate(self.to, (self.easing)(progress as f32))
    }

    fn finish(&mut self) {
        self.running = false;
        self.finished = true;
    }

    /// Restart toward `to` from wherever the value currently is.
    pub fn retarget(&mut self, to: T) {
        self.from = self.value;
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.running = true;
        self.finished = false;
    }

    /// Resume a stopped animator. A finished one replays from `from`.
    pub fn start(&mut self) {
        if self.finished {
            self.elapsed = Duration::ZERO;
            self.value = self.from;
            self.finished = false;
        }
        self.running = true;
    }

    /// Freeze at the current value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn wrap(elapsed: Duration, period: Duration) -> Duration {
    let nanos = elapsed.as_nanos() % period.as_nanos();
    Duration::from_nanos(nanos as u64)
}
